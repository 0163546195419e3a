//! The single writer of "which environment is open"

/// Name of the currently open environment, if any.
///
/// `select` does not check the name against any index: a selection can be made
/// from an address before the environments it refers to have been fetched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Select `name`. Returns false when it was already selected.
    pub fn select(&mut self, name: &str) -> bool {
        if self.selected.as_deref() == Some(name) {
            return false;
        }
        self.selected = Some(name.to_string());
        true
    }

    /// Clear the selection. Returns false when nothing was selected.
    pub fn clear(&mut self) -> bool {
        self.selected.take().is_some()
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    pub fn is_open(&self) -> bool {
        self.selected.is_some()
    }
}
