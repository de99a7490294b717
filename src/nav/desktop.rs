use std::rc::Rc;

use indexmap::IndexMap;
use tracing::debug;

use crate::nav::events::{ClickTarget, ContainerId};
use crate::nav::menu::{LinkKind, MegaMenu, MenuConfig, MenuItem, MenuLink};
use crate::nav::mobile::{follow, COMING_SOON};
use crate::platform::Router;

pub const EXTERNAL_REL: &str = "noopener noreferrer";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopLink {
    pub label: String,
    pub href: String,
    pub kind: LinkKind,
    pub new_tab: bool,
    pub rel: Option<&'static str>,
}

impl DesktopLink {
    fn new(label: &str, href: &str) -> Self {
        let kind = LinkKind::classify(href);
        let external = kind == LinkKind::External;
        Self {
            label: label.to_string(),
            href: href.to_string(),
            kind,
            new_tab: external,
            rel: external.then_some(EXTERNAL_REL),
        }
    }
}

impl From<&MenuLink> for DesktopLink {
    fn from(link: &MenuLink) -> Self {
        DesktopLink::new(&link.label, &link.href)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MegaSectionView {
    pub heading: DesktopLink,
    pub links: Vec<DesktopLink>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MegaColumnView {
    pub heading: Option<String>,
    pub sections: Vec<MegaSectionView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownPanel {
    List(Vec<DesktopLink>),
    Mega(Vec<MegaColumnView>),
    ComingSoon(&'static str),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopNode {
    Link(DesktopLink),
    Dropdown {
        label: String,
        href: String,
        container: ContainerId,
        open: bool,
        panel: Option<DropdownPanel>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopView {
    pub items: Vec<DesktopNode>,
}

impl DesktopView {
    pub fn open_panel(&self) -> Option<(&str, &DropdownPanel)> {
        self.items.iter().find_map(|node| match node {
            DesktopNode::Dropdown {
                label,
                panel: Some(panel),
                ..
            } => Some((label.as_str(), panel)),
            _ => None,
        })
    }
}

/// Hover-driven dropdown bar. At most one dropdown is open at a time.
pub struct DesktopDropdownNav {
    menu: Rc<MenuConfig>,
    open: Option<String>,
    containers: IndexMap<String, ContainerId>,
}

impl DesktopDropdownNav {
    pub fn new(menu: Rc<MenuConfig>) -> Self {
        let containers = menu
            .items
            .iter()
            .filter(|item| item.has_dropdown)
            .enumerate()
            .map(|(idx, item)| (item.label.clone(), ContainerId(idx as u32)))
            .collect();
        Self {
            menu,
            open: None,
            containers,
        }
    }

    pub fn open_label(&self) -> Option<&str> {
        self.open.as_deref()
    }

    pub fn container_of(&self, label: &str) -> Option<ContainerId> {
        self.containers.get(label).copied()
    }

    /// Opens the hovered item's dropdown, closing any other. Returns whether
    /// the state changed.
    pub fn hover_enter(&mut self, label: &str) -> bool {
        if !self.containers.contains_key(label) {
            return false;
        }
        if self.open.as_deref() == Some(label) {
            return false;
        }
        debug!(label, previous = ?self.open, "dropdown opened");
        self.open = Some(label.to_string());
        true
    }

    /// Mouse left the dropdown panel of `label`.
    pub fn leave_panel(&mut self, label: &str) -> bool {
        if self.open.as_deref() != Some(label) {
            return false;
        }
        debug!(label, "dropdown closed on leave");
        self.open = None;
        true
    }

    pub fn document_click(&mut self, target: &ClickTarget) -> bool {
        if self.open.is_none() {
            return false;
        }
        let inside = self
            .containers
            .values()
            .any(|container| target.is_within(*container));
        if inside {
            return false;
        }
        debug!(label = ?self.open, "dropdown closed on outside click");
        self.open = None;
        true
    }

    pub fn click_link(&mut self, href: &str, router: &mut dyn Router) {
        follow(href, router);
        self.open = None;
    }

    pub fn render(&self) -> DesktopView {
        let items = self
            .menu
            .items
            .iter()
            .map(|item| self.node_for(item))
            .collect();
        DesktopView { items }
    }

    fn node_for(&self, item: &MenuItem) -> DesktopNode {
        let Some(container) = self.container_of(&item.label) else {
            return DesktopNode::Link(DesktopLink::new(&item.label, &item.href));
        };
        let open = self.open.as_deref() == Some(item.label.as_str());
        DesktopNode::Dropdown {
            label: item.label.clone(),
            href: item.href.clone(),
            container,
            open,
            panel: open.then(|| dropdown_panel(item)),
        }
    }
}

fn dropdown_panel(item: &MenuItem) -> DropdownPanel {
    if let Some(mega) = &item.mega_menu {
        return DropdownPanel::Mega(mega_columns(mega));
    }
    if item.dropdown_items.is_empty() {
        return DropdownPanel::ComingSoon(COMING_SOON);
    }
    DropdownPanel::List(item.dropdown_items.iter().map(DesktopLink::from).collect())
}

fn mega_columns(mega: &MegaMenu) -> Vec<MegaColumnView> {
    mega.columns
        .iter()
        .map(|column| MegaColumnView {
            heading: column.heading.clone(),
            sections: column
                .sections
                .iter()
                .map(|section| MegaSectionView {
                    heading: DesktopLink::new(&section.heading, &section.href),
                    links: section.links.iter().map(DesktopLink::from).collect(),
                })
                .collect(),
        })
        .collect()
}
