use std::{mem, rc::Rc};

use tracing::debug;

use crate::nav::desktop::{DesktopDropdownNav, DesktopView};
use crate::nav::events::{CloseReason, Key, NavEvent, NavUpdate};
use crate::nav::menu::MenuConfig;
use crate::nav::mobile::{MobileMenuPanel, PanelEvent, PanelView};
use crate::nav::viewport::{Breakpoints, ViewportClass};
use crate::platform::{Chrome, FocusId, Router};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HamburgerView {
    pub expanded: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellView {
    pub viewport: ViewportClass,
    pub hamburger: Option<HamburgerView>,
    pub desktop: Option<DesktopView>,
    pub mobile: Option<PanelView>,
}

/// Top-level navigation. Owns the open/closed state of the slide-in panel;
/// the desktop bar never reads it.
pub struct NavigationShell<C: Chrome> {
    breakpoints: Breakpoints,
    viewport: ViewportClass,
    open: bool,
    desktop: DesktopDropdownNav,
    mobile: MobileMenuPanel,
    chrome: C,
}

impl<C: Chrome> NavigationShell<C> {
    pub fn new(menu: MenuConfig, breakpoints: Breakpoints, width: i32, chrome: C) -> Self {
        let menu = Rc::new(menu);
        Self {
            breakpoints,
            viewport: breakpoints.classify(width),
            open: false,
            desktop: DesktopDropdownNav::new(Rc::clone(&menu)),
            mobile: MobileMenuPanel::new(menu),
            chrome,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn viewport(&self) -> ViewportClass {
        self.viewport
    }

    pub fn chrome(&self) -> &C {
        &self.chrome
    }

    pub fn chrome_mut(&mut self) -> &mut C {
        &mut self.chrome
    }

    pub fn desktop(&self) -> &DesktopDropdownNav {
        &self.desktop
    }

    pub fn mobile(&self) -> &MobileMenuPanel {
        &self.mobile
    }

    /// Focusable elements of the mounted panel, in document order.
    pub fn focus_order(&self) -> &[FocusId] {
        self.mobile.focus_order()
    }

    /// Opens the panel. Opening an open panel leaves focus where it is.
    pub fn open(&mut self) {
        self.set_open(true);
    }

    pub fn toggle(&mut self) {
        if self.open {
            self.close(CloseReason::Toggle);
        } else {
            self.set_open(true);
        }
    }

    pub fn close(&mut self, reason: CloseReason) {
        if self.open {
            debug!(%reason, "closing mobile panel");
        }
        self.set_open(false);
    }

    fn set_open(&mut self, open: bool) {
        self.open = open;
        self.mobile.sync(open, &mut self.chrome);
    }

    pub fn handle(&mut self, event: NavEvent, router: &mut dyn Router) -> NavUpdate {
        let update = match event {
            NavEvent::Resize(width) => {
                let viewport = self.breakpoints.classify(width);
                if viewport == self.viewport {
                    return NavUpdate::default();
                }
                debug!(width, from = %self.viewport, to = %viewport, "viewport changed");
                self.viewport = viewport;
                NavUpdate::refresh()
            }
            NavEvent::HamburgerClick => {
                self.toggle();
                NavUpdate::refresh()
            }
            NavEvent::CloseButtonClick => self.to_panel(PanelEvent::CloseButton, router),
            NavEvent::BackdropClick => self.to_panel(PanelEvent::Backdrop, router),
            NavEvent::Key(key) => self.to_panel(PanelEvent::Key(key), router),
            NavEvent::ToggleGroup(label) => self.to_panel(PanelEvent::Toggle(label), router),
            NavEvent::PanelLinkClick(href) => self.to_panel(PanelEvent::LinkClick(href), router),
            NavEvent::HoverEnter(label) => changed(self.desktop.hover_enter(&label)),
            NavEvent::LeavePanel(label) => changed(self.desktop.leave_panel(&label)),
            NavEvent::DocumentClick(target) => changed(self.desktop.document_click(&target)),
            NavEvent::DesktopLinkClick(href) => {
                self.desktop.click_link(&href, router);
                NavUpdate::refresh()
            }
        };

        if let Some(reason) = update.closed {
            self.close(reason);
        }
        update
    }

    fn to_panel(&mut self, event: PanelEvent, router: &mut dyn Router) -> NavUpdate {
        if let PanelEvent::Key(Key::Other) = event {
            return NavUpdate::default();
        }
        self.mobile.handle(event, &mut self.chrome, router)
    }

    pub fn render(&self) -> ShellView {
        let desktop = self.viewport == ViewportClass::Desktop;
        ShellView {
            viewport: self.viewport,
            hamburger: (!desktop).then_some(HamburgerView {
                expanded: self.open,
            }),
            desktop: desktop.then(|| self.desktop.render()),
            mobile: self.mobile.render(self.open),
        }
    }

}

impl<C: Chrome + Default> NavigationShell<C> {
    /// Releases page-wide resources held by an open panel and hands back the chrome.
    pub fn teardown(mut self) -> C {
        self.close(CloseReason::Unmount);
        mem::take(&mut self.chrome)
    }
}

impl<C: Chrome> Drop for NavigationShell<C> {
    fn drop(&mut self) {
        if self.open {
            self.close(CloseReason::Unmount);
        }
    }
}

fn changed(changed: bool) -> NavUpdate {
    NavUpdate {
        refresh: changed,
        ..Default::default()
    }
}
