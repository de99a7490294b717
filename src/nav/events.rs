use std::fmt;

/// Keys the navigation reacts to. Everything else is `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    ShiftTab,
    Escape,
    Other,
}

/// Opaque handle of a dropdown's container element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ContainerId(pub u32);

/// The clicked element, described by the containers it sits in (innermost first).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClickTarget {
    pub ancestors: Vec<ContainerId>,
}

impl ClickTarget {
    pub fn outside() -> Self {
        Self::default()
    }

    pub fn inside(container: ContainerId) -> Self {
        Self {
            ancestors: vec![container],
        }
    }

    pub fn is_within(&self, container: ContainerId) -> bool {
        self.ancestors.contains(&container)
    }
}

/// Why the slide-in panel closed. All reasons lead to the same end state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    Backdrop,
    CloseButton,
    Escape,
    Navigation,
    Toggle,
    /// The shell went away while the panel was open.
    Unmount,
}

impl fmt::Display for CloseReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CloseReason::Backdrop => "backdrop",
            CloseReason::CloseButton => "close-button",
            CloseReason::Escape => "escape",
            CloseReason::Navigation => "navigation",
            CloseReason::Toggle => "toggle",
            CloseReason::Unmount => "unmount",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavEvent {
    Resize(i32),
    HamburgerClick,
    CloseButtonClick,
    BackdropClick,
    Key(Key),
    /// Expand/collapse control inside the slide-in panel.
    ToggleGroup(String),
    /// Any link inside the slide-in panel, including calls-to-action.
    PanelLinkClick(String),
    HoverEnter(String),
    LeavePanel(String),
    DocumentClick(ClickTarget),
    /// Any link in the desktop bar or one of its dropdowns.
    DesktopLinkClick(String),
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NavUpdate {
    pub refresh: bool,
    pub prevent_default: bool,
    pub closed: Option<CloseReason>,
}

impl NavUpdate {
    pub fn refresh() -> Self {
        Self {
            refresh: true,
            ..Default::default()
        }
    }
}
