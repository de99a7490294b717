use tracing::{debug, warn};

use super::{Chrome, FocusId, Router};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChromeCall {
    LockScroll,
    UnlockScroll,
    Focus(FocusId),
}

/// In-memory chrome that records every call.
#[derive(Debug, Default)]
pub struct HeadlessChrome {
    scroll_locked: bool,
    focused: Option<FocusId>,
    calls: Vec<ChromeCall>,
}

impl HeadlessChrome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[ChromeCall] {
        &self.calls
    }

    pub fn count(&self, call: &ChromeCall) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    /// Sequential focus navigation, standing in for the browser's default Tab
    /// handling. Focus leaves the document past either end.
    pub fn advance_focus(&mut self, order: &[FocusId], backwards: bool) {
        let position = self
            .focused
            .as_ref()
            .and_then(|current| order.iter().position(|id| id == current));
        let next = match (position, backwards) {
            (None, false) => order.first(),
            (None, true) => order.last(),
            (Some(p), false) => order.get(p + 1),
            (Some(p), true) => p.checked_sub(1).and_then(|p| order.get(p)),
        };
        match next.cloned() {
            Some(id) => self.focus(&id),
            None => self.focused = None,
        }
    }
}

impl Chrome for HeadlessChrome {
    fn lock_scroll(&mut self) {
        if self.scroll_locked {
            warn!("scroll already locked");
        }
        self.scroll_locked = true;
        self.calls.push(ChromeCall::LockScroll);
    }

    fn unlock_scroll(&mut self) {
        if !self.scroll_locked {
            warn!("scroll was not locked");
        }
        self.scroll_locked = false;
        self.calls.push(ChromeCall::UnlockScroll);
    }

    fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    fn focus(&mut self, id: &FocusId) {
        debug!(%id, "focus");
        self.focused = Some(id.clone());
        self.calls.push(ChromeCall::Focus(id.clone()));
    }

    fn focused(&self) -> Option<&FocusId> {
        self.focused.as_ref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterCall {
    Navigate(String),
    ScrollTo(String),
    OpenExternal(String),
}

#[derive(Debug, Default)]
pub struct HeadlessRouter {
    calls: Vec<RouterCall>,
}

impl HeadlessRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[RouterCall] {
        &self.calls
    }

    pub fn last(&self) -> Option<&RouterCall> {
        self.calls.last()
    }
}

impl Router for HeadlessRouter {
    fn navigate(&mut self, href: &str) {
        self.calls.push(RouterCall::Navigate(href.to_string()));
    }

    fn scroll_to(&mut self, fragment: &str) {
        self.calls
            .push(RouterCall::ScrollTo(fragment.trim_start_matches('#').to_string()));
    }

    fn open_external(&mut self, href: &str) {
        self.calls.push(RouterCall::OpenExternal(href.to_string()));
    }
}
