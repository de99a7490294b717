use std::rc::Rc;

use tracing::debug;

use crate::nav::accordion::AccordionGroup;
use crate::nav::events::{CloseReason, Key, NavUpdate};
use crate::nav::focus::{FocusTrap, Focusable, TrapOutcome};
use crate::nav::menu::{LinkKind, MenuConfig, MenuItem, MenuLink, MobileRenderMode};
use crate::platform::{Chrome, FocusId, Router};

pub const COMING_SOON: &str = "Coming soon…";
pub const CLOSE_BUTTON_ID: &str = "close";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkView {
    pub id: FocusId,
    pub label: String,
    pub href: String,
    pub kind: LinkKind,
}

impl LinkView {
    fn new(id: String, label: &str, href: &str) -> Self {
        Self {
            id: FocusId::new(id),
            label: label.to_string(),
            href: href.to_string(),
            kind: LinkKind::classify(href),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccordionBody {
    Links(Vec<LinkView>),
    ComingSoon(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelNode {
    Link(LinkView),
    Accordion {
        label: String,
        toggle: FocusId,
        expanded: bool,
        /// Chevron rotation in degrees.
        chevron: u16,
        body: Option<AccordionBody>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub nodes: Vec<PanelNode>,
    pub calls_to_action: Vec<LinkView>,
    pub close_button: FocusId,
}

impl PanelView {
    /// Focusable elements in document order.
    pub fn focusables(&self) -> Vec<Focusable> {
        let mut out = Vec::new();
        for node in &self.nodes {
            match node {
                PanelNode::Link(link) => out.push(Focusable::anchor(link.id.clone(), &link.href)),
                PanelNode::Accordion { toggle, body, .. } => {
                    out.push(Focusable::button(toggle.clone()));
                    if let Some(AccordionBody::Links(links)) = body {
                        out.extend(
                            links
                                .iter()
                                .map(|link| Focusable::anchor(link.id.clone(), &link.href)),
                        );
                    }
                }
            }
        }
        out.extend(
            self.calls_to_action
                .iter()
                .map(|link| Focusable::anchor(link.id.clone(), &link.href)),
        );
        out.push(Focusable::button(self.close_button.clone()));
        out
    }

    pub fn has_toggle_for(&self, label: &str) -> bool {
        self.nodes.iter().any(|node| {
            matches!(node, PanelNode::Accordion { label: l, .. } if l == label)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelEvent {
    Backdrop,
    CloseButton,
    Key(Key),
    Toggle(String),
    LinkClick(String),
}

/// Slide-in panel for narrow viewports. The shell owns the open state and
/// mounts the panel through [`MobileMenuPanel::sync`].
pub struct MobileMenuPanel {
    menu: Rc<MenuConfig>,
    accordion: AccordionGroup,
    trap: Option<FocusTrap>,
}

impl MobileMenuPanel {
    pub fn new(menu: Rc<MenuConfig>) -> Self {
        let accordion = AccordionGroup::new(menu.accordion_labels());
        Self {
            menu,
            accordion,
            trap: None,
        }
    }

    pub fn accordion(&self) -> &AccordionGroup {
        &self.accordion
    }

    pub fn is_mounted(&self) -> bool {
        self.trap.is_some()
    }

    pub fn focus_order(&self) -> &[FocusId] {
        self.trap.as_ref().map(FocusTrap::order).unwrap_or(&[])
    }

    /// Mounts or unmounts the panel. Repeated calls with the same state are no-ops.
    pub fn sync(&mut self, is_open: bool, chrome: &mut dyn Chrome) {
        match (is_open, self.trap.take()) {
            (true, None) => {
                let focusables = self.view().focusables();
                self.trap = Some(FocusTrap::activate(&focusables, chrome));
                debug!("mobile panel mounted");
            }
            (false, Some(trap)) => {
                trap.deactivate(chrome);
                debug!("mobile panel unmounted");
            }
            (_, trap) => self.trap = trap,
        }
    }

    pub fn render(&self, is_open: bool) -> Option<PanelView> {
        is_open.then(|| self.view())
    }

    pub fn handle(
        &mut self,
        event: PanelEvent,
        chrome: &mut dyn Chrome,
        router: &mut dyn Router,
    ) -> NavUpdate {
        let Some(trap) = self.trap.as_ref() else {
            debug!(?event, "panel not mounted, ignoring");
            return NavUpdate::default();
        };

        match event {
            PanelEvent::Backdrop => close_with(CloseReason::Backdrop),
            PanelEvent::CloseButton => close_with(CloseReason::CloseButton),
            PanelEvent::Key(key) => match trap.handle_key(key, chrome) {
                TrapOutcome::Escape => close_with(CloseReason::Escape),
                TrapOutcome::Wrapped => NavUpdate {
                    prevent_default: true,
                    ..Default::default()
                },
                TrapOutcome::Unhandled => NavUpdate::default(),
            },
            PanelEvent::Toggle(label) => {
                self.accordion.toggle(&label);
                let focusables = self.view().focusables();
                if let Some(trap) = self.trap.as_mut() {
                    trap.retarget(&focusables, chrome);
                }
                NavUpdate::refresh()
            }
            PanelEvent::LinkClick(href) => {
                follow(&href, router);
                close_with(CloseReason::Navigation)
            }
        }
    }

    fn view(&self) -> PanelView {
        let nodes = self
            .menu
            .items
            .iter()
            .map(|item| self.node_for(item))
            .collect();
        let calls_to_action = self
            .menu
            .calls_to_action
            .iter()
            .enumerate()
            .map(|(idx, link)| LinkView::new(format!("cta:{idx}"), &link.label, &link.href))
            .collect();
        PanelView {
            nodes,
            calls_to_action,
            close_button: FocusId::new(CLOSE_BUTTON_ID),
        }
    }

    fn node_for(&self, item: &MenuItem) -> PanelNode {
        let id = format!("nav:{}", item.label);
        if let MobileRenderMode::Link { href } = &item.mobile_render_mode {
            return PanelNode::Link(LinkView::new(id, &item.label, href));
        }
        if !item.has_dropdown {
            return PanelNode::Link(LinkView::new(id, &item.label, &item.href));
        }

        let expanded = self.accordion.is_expanded(&item.label);
        let body = expanded.then(|| accordion_body(&item.label, &item.dropdown_items));
        PanelNode::Accordion {
            label: item.label.clone(),
            toggle: FocusId::new(id),
            expanded,
            chevron: if expanded { 180 } else { 0 },
            body,
        }
    }
}

fn accordion_body(parent: &str, links: &[MenuLink]) -> AccordionBody {
    if links.is_empty() {
        return AccordionBody::ComingSoon(COMING_SOON);
    }
    AccordionBody::Links(
        links
            .iter()
            .enumerate()
            .map(|(idx, link)| {
                LinkView::new(format!("nav:{parent}/{idx}"), &link.label, &link.href)
            })
            .collect(),
    )
}

fn close_with(reason: CloseReason) -> NavUpdate {
    NavUpdate {
        refresh: true,
        prevent_default: false,
        closed: Some(reason),
    }
}

/// Follows an href according to its kind.
pub fn follow(href: &str, router: &mut dyn Router) {
    match LinkKind::classify(href) {
        LinkKind::Fragment => router.scroll_to(href),
        LinkKind::External => router.open_external(href),
        LinkKind::Internal => router.navigate(href),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{HeadlessChrome, HeadlessRouter, RouterCall};

    fn panel() -> MobileMenuPanel {
        MobileMenuPanel::new(Rc::new(MenuConfig::default()))
    }

    fn mounted() -> (MobileMenuPanel, HeadlessChrome, HeadlessRouter) {
        let mut p = panel();
        let mut chrome = HeadlessChrome::new();
        p.sync(true, &mut chrome);
        (p, chrome, HeadlessRouter::new())
    }

    #[test]
    fn closed_panel_renders_nothing() {
        assert_eq!(panel().render(false), None);
    }

    #[test]
    fn mounting_focuses_the_first_link_and_locks_scroll() {
        let (p, chrome, _) = mounted();
        assert!(p.is_mounted());
        assert!(chrome.scroll_locked());
        assert_eq!(chrome.focused().map(FocusId::as_str), Some("nav:Home"));
    }

    #[test]
    fn syncing_open_twice_keeps_focus_and_single_lock() {
        let (mut p, mut chrome, _) = mounted();
        p.sync(true, &mut chrome);
        assert_eq!(chrome.focused().map(FocusId::as_str), Some("nav:Home"));
        assert_eq!(chrome.count(&crate::platform::ChromeCall::LockScroll), 1);
    }

    #[test]
    fn classes_renders_as_a_programs_link() {
        let view = panel().render(true).unwrap();
        assert!(!view.has_toggle_for("Classes"));
        let classes = view
            .nodes
            .iter()
            .find_map(|n| match n {
                PanelNode::Link(link) if link.label == "Classes" => Some(link),
                _ => None,
            })
            .unwrap();
        assert_eq!(classes.href, "/programs");
    }

    #[test]
    fn classes_stays_a_link_even_without_dropdown_items() {
        let mut menu = MenuConfig::default();
        for item in menu.items.iter_mut().filter(|i| i.label == "Classes") {
            item.dropdown_items.clear();
            item.mega_menu = None;
        }
        let view = MobileMenuPanel::new(Rc::new(menu)).render(true).unwrap();
        assert!(!view.has_toggle_for("Classes"));
    }

    #[test]
    fn expanded_group_shows_links_and_rotated_chevron() {
        let (mut p, mut chrome, mut router) = mounted();
        p.handle(PanelEvent::Toggle("About".into()), &mut chrome, &mut router);
        let view = p.render(true).unwrap();
        let about = view
            .nodes
            .iter()
            .find(|n| matches!(n, PanelNode::Accordion { label, .. } if label == "About"))
            .unwrap();
        match about {
            PanelNode::Accordion {
                expanded,
                chevron,
                body: Some(AccordionBody::Links(links)),
                ..
            } => {
                assert!(*expanded);
                assert_eq!(*chevron, 180);
                assert_eq!(links.len(), 3);
            }
            other => panic!("unexpected node {other:?}"),
        }
        assert!(p.focus_order().contains(&FocusId::new("nav:About/1")));
    }

    #[test]
    fn duplicate_labels_still_get_distinct_focus_ids() {
        let mut menu = MenuConfig::default();
        let book = MenuLink::new("Book", "/trial");
        menu.calls_to_action = vec![book.clone(), book];
        for item in menu.items.iter_mut().filter(|i| i.label == "About") {
            let team = MenuLink::new("Team", "/team");
            item.dropdown_items = vec![team.clone(), team];
        }
        let mut p = MobileMenuPanel::new(Rc::new(menu));
        let mut chrome = HeadlessChrome::new();
        let mut router = HeadlessRouter::new();
        p.sync(true, &mut chrome);
        p.handle(PanelEvent::Toggle("About".into()), &mut chrome, &mut router);

        let order = p.focus_order();
        for (i, id) in order.iter().enumerate() {
            assert!(!order[i + 1..].contains(id), "duplicate focus id {id}");
        }
    }

    #[test]
    fn empty_group_shows_placeholder() {
        let (mut p, mut chrome, mut router) = mounted();
        p.handle(PanelEvent::Toggle("Events".into()), &mut chrome, &mut router);
        let view = p.render(true).unwrap();
        assert!(view.nodes.iter().any(|n| matches!(
            n,
            PanelNode::Accordion {
                body: Some(AccordionBody::ComingSoon(COMING_SOON)),
                ..
            }
        )));
    }

    #[test]
    fn every_close_trigger_requests_close() {
        for (event, reason) in [
            (PanelEvent::Backdrop, CloseReason::Backdrop),
            (PanelEvent::CloseButton, CloseReason::CloseButton),
            (PanelEvent::Key(Key::Escape), CloseReason::Escape),
            (PanelEvent::LinkClick("/pricing".into()), CloseReason::Navigation),
        ] {
            let (mut p, mut chrome, mut router) = mounted();
            let update = p.handle(event, &mut chrome, &mut router);
            assert_eq!(update.closed, Some(reason));
        }
    }

    #[test]
    fn links_are_followed_by_kind() {
        let (mut p, mut chrome, mut router) = mounted();
        p.handle(PanelEvent::LinkClick("#testimonials".into()), &mut chrome, &mut router);
        p.handle(PanelEvent::LinkClick("https://shop.example.com".into()), &mut chrome, &mut router);
        p.handle(PanelEvent::LinkClick("/team".into()), &mut chrome, &mut router);
        assert_eq!(
            router.calls(),
            &[
                RouterCall::ScrollTo("testimonials".into()),
                RouterCall::OpenExternal("https://shop.example.com".into()),
                RouterCall::Navigate("/team".into()),
            ]
        );
    }

    #[test]
    fn unmounted_panel_ignores_events() {
        let mut p = panel();
        let mut chrome = HeadlessChrome::new();
        let mut router = HeadlessRouter::new();
        let update = p.handle(PanelEvent::Backdrop, &mut chrome, &mut router);
        assert_eq!(update, NavUpdate::default());
        assert!(router.calls().is_empty());
    }
}
