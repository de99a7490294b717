use std::fmt;

/// Identifier of a focusable element in a rendered view.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusId(String);

impl FocusId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FocusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Page-wide UI state shared by every component: the document scroll policy and
/// the focused element. Only one owner may hold the scroll lock at a time.
pub trait Chrome {
    fn lock_scroll(&mut self);
    fn unlock_scroll(&mut self);
    fn scroll_locked(&self) -> bool;
    fn focus(&mut self, id: &FocusId);
    fn focused(&self) -> Option<&FocusId>;
}

/// Client-side navigation. Internal hrefs are routed, fragments are
/// smooth-scrolled and external hrefs open in a new tab.
pub trait Router {
    fn navigate(&mut self, href: &str);
    fn scroll_to(&mut self, fragment: &str);
    fn open_external(&mut self, href: &str);
}

mod headless;

pub use headless::{ChromeCall, HeadlessChrome, HeadlessRouter, RouterCall};
