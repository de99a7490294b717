use serde::{Deserialize, Serialize};

/// A single `{label, href}` pair used by dropdowns, mega-menus and calls-to-action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuLink {
    pub label: String,
    pub href: String,
}

impl MenuLink {
    pub fn new(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
        }
    }
}

/// How an href is followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkKind {
    /// `#section` on the current page; smooth-scrolled to.
    Fragment,
    /// Absolute URL or `mailto:` / `tel:`; opened in a new tab with `rel="noopener noreferrer"`.
    External,
    /// Client-side route.
    Internal,
}

impl LinkKind {
    pub fn classify(href: &str) -> Self {
        let href = href.trim();
        if href.starts_with('#') {
            return LinkKind::Fragment;
        }
        let lower = href.to_ascii_lowercase();
        if ["http://", "https://", "mailto:", "tel:", "//"]
            .iter()
            .any(|scheme| lower.starts_with(scheme))
        {
            return LinkKind::External;
        }
        LinkKind::Internal
    }
}

/// Per-item override for the slide-in panel.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MobileRenderMode {
    /// Dropdown items render as an expandable group.
    #[default]
    Accordion,
    /// The item renders as a plain link to `href`, whatever its dropdown contents.
    Link { href: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaSection {
    pub heading: String,
    pub href: String,
    #[serde(default)]
    pub links: Vec<MenuLink>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaColumn {
    #[serde(default)]
    pub heading: Option<String>,
    #[serde(default)]
    pub sections: Vec<MegaSection>,
}

/// Multi-column dropdown layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MegaMenu {
    pub columns: Vec<MegaColumn>,
}

/// A top-level navigation entry. Loaded once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub has_dropdown: bool,
    #[serde(default)]
    pub dropdown_items: Vec<MenuLink>,
    #[serde(default)]
    pub mega_menu: Option<MegaMenu>,
    #[serde(default)]
    pub mobile_render_mode: MobileRenderMode,
}

impl MenuItem {
    pub fn link(label: &str, href: &str) -> Self {
        Self {
            label: label.to_string(),
            href: href.to_string(),
            has_dropdown: false,
            dropdown_items: Vec::new(),
            mega_menu: None,
            mobile_render_mode: MobileRenderMode::Accordion,
        }
    }

    pub fn dropdown(label: &str, href: &str, items: Vec<MenuLink>) -> Self {
        Self {
            has_dropdown: true,
            dropdown_items: items,
            ..Self::link(label, href)
        }
    }

    pub fn with_mega_menu(mut self, mega: MegaMenu) -> Self {
        self.has_dropdown = true;
        self.mega_menu = Some(mega);
        self
    }

    pub fn with_mobile_link(mut self, href: &str) -> Self {
        self.mobile_render_mode = MobileRenderMode::Link {
            href: href.to_string(),
        };
        self
    }

    /// True when the slide-in panel should offer an expand/collapse control.
    pub fn is_mobile_accordion(&self) -> bool {
        self.has_dropdown && self.mobile_render_mode == MobileRenderMode::Accordion
    }
}

/// The full, read-only navigation content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuConfig {
    pub items: Vec<MenuItem>,
    pub calls_to_action: Vec<MenuLink>,
}

impl MenuConfig {
    pub fn item(&self, label: &str) -> Option<&MenuItem> {
        self.items.iter().find(|item| item.label == label)
    }

    /// Labels that may appear in an accordion's expanded set.
    pub fn accordion_labels(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|item| item.is_mobile_accordion())
            .map(|item| item.label.clone())
            .collect()
    }
}

impl Default for MenuConfig {
    fn default() -> Self {
        Self {
            items: default_menu(),
            calls_to_action: default_calls_to_action(),
        }
    }
}

pub fn default_calls_to_action() -> Vec<MenuLink> {
    vec![
        MenuLink::new("Book a Free Trial", "/trial"),
        MenuLink::new("Contact Us", "/contact"),
    ]
}

pub fn default_menu() -> Vec<MenuItem> {
    let styles = MegaColumn {
        heading: Some("Dance Styles".to_string()),
        sections: vec![
            MegaSection {
                heading: "Ballet".to_string(),
                href: "/programs/ballet".to_string(),
                links: vec![
                    MenuLink::new("Baby Ballet", "/programs/ballet/baby"),
                    MenuLink::new("Classical Ballet", "/programs/ballet/classical"),
                ],
            },
            MegaSection {
                heading: "Contemporary".to_string(),
                href: "/programs/contemporary".to_string(),
                links: Vec::new(),
            },
            MegaSection {
                heading: "Hip Hop".to_string(),
                href: "/programs/hip-hop".to_string(),
                links: Vec::new(),
            },
            MegaSection {
                heading: "Tap & Jazz".to_string(),
                href: "/programs/tap-jazz".to_string(),
                links: Vec::new(),
            },
        ],
    };
    let music = MegaColumn {
        heading: Some("Music".to_string()),
        sections: vec![
            MegaSection {
                heading: "Singing".to_string(),
                href: "/programs/singing".to_string(),
                links: Vec::new(),
            },
            MegaSection {
                heading: "Piano".to_string(),
                href: "/programs/piano".to_string(),
                links: Vec::new(),
            },
        ],
    };
    let featured = MegaColumn {
        heading: Some("Featured".to_string()),
        sections: vec![
            MegaSection {
                heading: "Holiday Workshops".to_string(),
                href: "/programs/workshops".to_string(),
                links: Vec::new(),
            },
            MegaSection {
                heading: "Exam Preparation".to_string(),
                href: "/programs/exams".to_string(),
                links: Vec::new(),
            },
        ],
    };

    vec![
        MenuItem::link("Home", "/"),
        MenuItem::dropdown(
            "About",
            "/about",
            vec![
                MenuLink::new("Our Story", "/about"),
                MenuLink::new("Our Team", "/team"),
                MenuLink::new("Testimonials", "#testimonials"),
            ],
        ),
        MenuItem::dropdown(
            "Classes",
            "/programs",
            vec![
                MenuLink::new("All Programs", "/programs"),
                MenuLink::new("Timetable", "/timetable"),
            ],
        )
        .with_mega_menu(MegaMenu {
            columns: vec![styles, music, featured],
        })
        .with_mobile_link("/programs"),
        MenuItem::dropdown("Events", "/events", Vec::new()),
        MenuItem::link("Pricing", "/pricing"),
        MenuItem::link("Shop", "https://shop.example.com"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_link_kinds() {
        assert_eq!(LinkKind::classify("#contact"), LinkKind::Fragment);
        assert_eq!(LinkKind::classify("https://x.test"), LinkKind::External);
        assert_eq!(LinkKind::classify("HTTP://x.test"), LinkKind::External);
        assert_eq!(LinkKind::classify("mailto:a@b.c"), LinkKind::External);
        assert_eq!(LinkKind::classify("/programs"), LinkKind::Internal);
        assert_eq!(LinkKind::classify("programs"), LinkKind::Internal);
    }

    #[test]
    fn classes_is_a_mobile_link_in_default_content() {
        let menu = MenuConfig::default();
        let classes = menu.item("Classes").unwrap();
        assert!(classes.has_dropdown);
        assert!(!classes.is_mobile_accordion());
        assert_eq!(
            classes.mobile_render_mode,
            MobileRenderMode::Link {
                href: "/programs".to_string()
            }
        );
    }

    #[test]
    fn accordion_labels_only_cover_dropdown_items() {
        let menu = MenuConfig::default();
        assert_eq!(menu.accordion_labels(), vec!["About", "Events"]);
    }

    #[test]
    fn mobile_render_mode_defaults_to_accordion_when_absent() {
        let item: MenuItem = serde_json::from_str(
            r#"{"label":"About","href":"/about","has_dropdown":true}"#,
        )
        .unwrap();
        assert!(item.is_mobile_accordion());

        let item: MenuItem = serde_json::from_str(
            r#"{"label":"Classes","href":"/c","has_dropdown":true,
                "mobile_render_mode":{"mode":"link","href":"/programs"}}"#,
        )
        .unwrap();
        assert!(!item.is_mobile_accordion());
    }
}
