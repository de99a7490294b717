use tracing::debug;

use crate::nav::events::Key;
use crate::platform::{Chrome, FocusId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FocusableKind {
    Anchor { href: Option<String> },
    Button { disabled: bool },
}

/// An element of a rendered container, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Focusable {
    pub id: FocusId,
    pub kind: FocusableKind,
}

impl Focusable {
    pub fn anchor(id: FocusId, href: &str) -> Self {
        Self {
            id,
            kind: FocusableKind::Anchor {
                href: Some(href.to_string()),
            },
        }
    }

    pub fn button(id: FocusId) -> Self {
        Self {
            id,
            kind: FocusableKind::Button { disabled: false },
        }
    }

    /// Anchors need an href attribute (even an empty one), buttons must not be disabled.
    pub fn is_focusable(&self) -> bool {
        match &self.kind {
            FocusableKind::Anchor { href } => href.is_some(),
            FocusableKind::Button { disabled } => !disabled,
        }
    }
}

/// What the trap did with a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrapOutcome {
    /// Left to the browser's default behaviour.
    Unhandled,
    /// Default prevented and focus wrapped around the container.
    Wrapped,
    /// Escape was pressed; the owner decides what closing means.
    Escape,
}

/// Keyboard focus trap. Holds the scroll lock while active; `deactivate`
/// consumes the trap, so the lock is released once per activation.
#[derive(Debug)]
pub struct FocusTrap {
    order: Vec<FocusId>,
}

fn focusable_order(container: &[Focusable]) -> Vec<FocusId> {
    container
        .iter()
        .filter(|el| el.is_focusable())
        .map(|el| el.id.clone())
        .collect()
}

impl FocusTrap {
    pub fn activate(container: &[Focusable], chrome: &mut dyn Chrome) -> Self {
        let order = focusable_order(container);
        chrome.lock_scroll();
        if let Some(first) = order.first() {
            chrome.focus(first);
        }
        debug!(focusable = order.len(), "focus trap activated");
        Self { order }
    }

    pub fn order(&self) -> &[FocusId] {
        &self.order
    }

    pub fn handle_key(&self, key: Key, chrome: &mut dyn Chrome) -> TrapOutcome {
        match key {
            Key::Escape => TrapOutcome::Escape,
            Key::Tab | Key::ShiftTab => {
                let (Some(first), Some(last)) = (self.order.first(), self.order.last()) else {
                    return TrapOutcome::Unhandled;
                };
                let focused = chrome.focused().cloned();
                match (key, focused) {
                    (Key::Tab, Some(current)) if current == *last => {
                        chrome.focus(first);
                        TrapOutcome::Wrapped
                    }
                    (Key::ShiftTab, Some(current)) if current == *first => {
                        chrome.focus(last);
                        TrapOutcome::Wrapped
                    }
                    _ => TrapOutcome::Unhandled,
                }
            }
            Key::Other => TrapOutcome::Unhandled,
        }
    }

    /// Replaces the focusable set after the container changed. Focus stays put
    /// when its element survived, otherwise it moves to the first element.
    pub fn retarget(&mut self, container: &[Focusable], chrome: &mut dyn Chrome) {
        self.order = focusable_order(container);
        let survived = chrome
            .focused()
            .is_some_and(|current| self.order.contains(current));
        if !survived {
            if let Some(first) = self.order.first() {
                chrome.focus(first);
            }
        }
    }

    pub fn deactivate(self, chrome: &mut dyn Chrome) {
        chrome.unlock_scroll();
        debug!("focus trap released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{ChromeCall, HeadlessChrome};

    fn container() -> Vec<Focusable> {
        vec![
            Focusable::anchor(FocusId::new("home"), "/"),
            Focusable {
                id: FocusId::new("placeholder"),
                kind: FocusableKind::Anchor { href: None },
            },
            Focusable {
                id: FocusId::new("disabled"),
                kind: FocusableKind::Button { disabled: true },
            },
            Focusable::button(FocusId::new("toggle")),
            Focusable::button(FocusId::new("close")),
        ]
    }

    fn focused(chrome: &HeadlessChrome) -> Option<&str> {
        chrome.focused().map(FocusId::as_str)
    }

    #[test]
    fn activation_locks_scroll_and_focuses_first() {
        let mut chrome = HeadlessChrome::new();
        let trap = FocusTrap::activate(&container(), &mut chrome);
        assert!(chrome.scroll_locked());
        assert_eq!(focused(&chrome), Some("home"));
        assert_eq!(trap.order().len(), 3);
    }

    #[test]
    fn anchor_with_empty_href_is_focusable() {
        let empty = Focusable::anchor(FocusId::new("empty"), "");
        assert!(empty.is_focusable());
        let missing = Focusable {
            id: FocusId::new("missing"),
            kind: FocusableKind::Anchor { href: None },
        };
        assert!(!missing.is_focusable());
    }

    #[test]
    fn tab_on_last_wraps_to_first() {
        let mut chrome = HeadlessChrome::new();
        let trap = FocusTrap::activate(&container(), &mut chrome);
        chrome.focus(&FocusId::new("close"));
        assert_eq!(trap.handle_key(Key::Tab, &mut chrome), TrapOutcome::Wrapped);
        assert_eq!(focused(&chrome), Some("home"));
    }

    #[test]
    fn shift_tab_on_first_wraps_to_last() {
        let mut chrome = HeadlessChrome::new();
        let trap = FocusTrap::activate(&container(), &mut chrome);
        assert_eq!(
            trap.handle_key(Key::ShiftTab, &mut chrome),
            TrapOutcome::Wrapped
        );
        assert_eq!(focused(&chrome), Some("close"));
    }

    #[test]
    fn tab_in_the_middle_is_left_to_the_browser() {
        let mut chrome = HeadlessChrome::new();
        let trap = FocusTrap::activate(&container(), &mut chrome);
        assert_eq!(trap.handle_key(Key::Tab, &mut chrome), TrapOutcome::Unhandled);
        assert_eq!(focused(&chrome), Some("home"));
    }

    #[test]
    fn escape_is_reported_not_acted_on() {
        let mut chrome = HeadlessChrome::new();
        let trap = FocusTrap::activate(&container(), &mut chrome);
        assert_eq!(trap.handle_key(Key::Escape, &mut chrome), TrapOutcome::Escape);
        assert!(chrome.scroll_locked());
    }

    #[test]
    fn empty_container_is_a_no_op() {
        let mut chrome = HeadlessChrome::new();
        let trap = FocusTrap::activate(&[], &mut chrome);
        assert_eq!(chrome.focused(), None);
        assert_eq!(trap.handle_key(Key::Tab, &mut chrome), TrapOutcome::Unhandled);
        assert_eq!(
            trap.handle_key(Key::ShiftTab, &mut chrome),
            TrapOutcome::Unhandled
        );
        trap.deactivate(&mut chrome);
        assert!(!chrome.scroll_locked());
    }

    #[test]
    fn deactivate_unlocks_exactly_once() {
        let mut chrome = HeadlessChrome::new();
        let trap = FocusTrap::activate(&container(), &mut chrome);
        trap.deactivate(&mut chrome);
        assert!(!chrome.scroll_locked());
        assert_eq!(chrome.count(&ChromeCall::LockScroll), 1);
        assert_eq!(chrome.count(&ChromeCall::UnlockScroll), 1);
    }

    #[test]
    fn retarget_keeps_surviving_focus() {
        let mut chrome = HeadlessChrome::new();
        let mut trap = FocusTrap::activate(&container(), &mut chrome);
        chrome.focus(&FocusId::new("toggle"));

        let mut grown = container();
        grown.insert(4, Focusable::anchor(FocusId::new("sub"), "/sub"));
        trap.retarget(&grown, &mut chrome);
        assert_eq!(focused(&chrome), Some("toggle"));
        assert_eq!(trap.order().len(), 4);

        trap.retarget(&grown[..1], &mut chrome);
        assert_eq!(focused(&chrome), Some("home"));
    }
}
