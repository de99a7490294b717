use serde::{Deserialize, Serialize};

pub const DEFAULT_MD: i32 = 768;
pub const DEFAULT_LG: i32 = 1024;

/// Pixel thresholds separating the viewport classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub md: i32,
    pub lg: i32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            md: DEFAULT_MD,
            lg: DEFAULT_LG,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewportClass {
    Mobile,
    Tablet,
    Desktop,
}

impl ViewportClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewportClass::Mobile => "mobile",
            ViewportClass::Tablet => "tablet",
            ViewportClass::Desktop => "desktop",
        }
    }
}

impl std::fmt::Display for ViewportClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Breakpoints {
    /// Classifies a window width. Any integer is accepted; negative widths are `Mobile`.
    pub fn classify(&self, width: i32) -> ViewportClass {
        if width < self.md {
            ViewportClass::Mobile
        } else if width < self.lg {
            ViewportClass::Tablet
        } else {
            ViewportClass::Desktop
        }
    }
}

/// Classifies against the default breakpoints.
pub fn classify(width: i32) -> ViewportClass {
    Breakpoints::default().classify(width)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_below_md_are_mobile() {
        for w in [i32::MIN, -1, 0, 390, DEFAULT_MD - 1] {
            assert_eq!(classify(w), ViewportClass::Mobile, "width {w}");
        }
    }

    #[test]
    fn widths_between_md_and_lg_are_tablet() {
        for w in [DEFAULT_MD, 800, DEFAULT_LG - 1] {
            assert_eq!(classify(w), ViewportClass::Tablet, "width {w}");
        }
    }

    #[test]
    fn widths_from_lg_are_desktop() {
        for w in [DEFAULT_LG, 1280, i32::MAX] {
            assert_eq!(classify(w), ViewportClass::Desktop, "width {w}");
        }
    }

    #[test]
    fn custom_breakpoints_are_respected() {
        let bp = Breakpoints { md: 600, lg: 900 };
        assert_eq!(bp.classify(599), ViewportClass::Mobile);
        assert_eq!(bp.classify(600), ViewportClass::Tablet);
        assert_eq!(bp.classify(900), ViewportClass::Desktop);
    }
}
