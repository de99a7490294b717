pub mod accordion;
pub mod desktop;
pub mod events;
pub mod focus;
pub mod menu;
pub mod mobile;
pub mod shell;
pub mod viewport;

pub use events::{ClickTarget, CloseReason, Key, NavEvent, NavUpdate};
pub use menu::{MenuConfig, MenuItem, MenuLink};
pub use shell::{NavigationShell, ShellView};
pub use viewport::{classify, Breakpoints, ViewportClass};
