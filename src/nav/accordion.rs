use indexmap::IndexSet;
use tracing::{debug, warn};

/// Independently expandable groups keyed by label. Any number of groups may be
/// expanded at once.
#[derive(Debug, Clone, Default)]
pub struct AccordionGroup {
    eligible: IndexSet<String>,
    expanded: IndexSet<String>,
}

impl AccordionGroup {
    /// Only `eligible` labels can ever be expanded.
    pub fn new<I, S>(eligible: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            eligible: eligible.into_iter().map(Into::into).collect(),
            expanded: IndexSet::new(),
        }
    }

    /// Flips `label` and returns its new state. Unknown labels are ignored.
    pub fn toggle(&mut self, label: &str) -> bool {
        if !self.eligible.contains(label) {
            warn!(label, "ignoring toggle of a label without an accordion");
            return false;
        }
        let expanded = if self.expanded.shift_remove(label) {
            false
        } else {
            self.expanded.insert(label.to_string());
            true
        };
        debug!(label, expanded, "accordion toggled");
        expanded
    }

    pub fn is_expanded(&self, label: &str) -> bool {
        self.expanded.contains(label)
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    /// Expanded labels in the order they were opened.
    pub fn expanded(&self) -> impl Iterator<Item = &str> {
        self.expanded.iter().map(String::as_str)
    }
}
