//! Row selection keyed by row identity.

use crate::rows::RowId;
use std::collections::HashSet;

/// State of the header's select-all checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckState {
    /// Nothing in scope is selected.
    Unchecked,
    /// Some but not all rows in scope are selected.
    Indeterminate,
    /// Every row in scope is selected.
    Checked,
}

impl CheckState {
    /// Checkbox glyph.
    pub fn glyph(self) -> &'static str {
        match self {
            CheckState::Unchecked => "[ ]",
            CheckState::Indeterminate => "[-]",
            CheckState::Checked => "[x]",
        }
    }
}

/// Tracks which rows are selected.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    selected: HashSet<RowId>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `id` is selected.
    pub fn is_selected(&self, id: RowId) -> bool {
        self.selected.contains(&id)
    }

    /// Flips the selection of one row.
    pub fn toggle(&mut self, id: RowId) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }
    }

    /// Checkbox state for the rows in `scope`. An empty scope is unchecked.
    pub fn check_state(&self, scope: &[RowId]) -> CheckState {
        let hits = scope.iter().filter(|id| self.selected.contains(*id)).count();
        if scope.is_empty() || hits == 0 {
            CheckState::Unchecked
        } else if hits == scope.len() {
            CheckState::Checked
        } else {
            CheckState::Indeterminate
        }
    }

    /// Clears the selection when every row in `scope` is selected, otherwise
    /// selects exactly the rows in `scope`.
    pub fn toggle_all(&mut self, scope: &[RowId]) {
        if self.check_state(scope) == CheckState::Checked {
            self.selected.clear();
        } else {
            self.selected = scope.iter().copied().collect();
        }
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Selected ids.
    pub fn ids(&self) -> &HashSet<RowId> {
        &self.selected
    }

    /// Number of selected rows.
    pub fn len(&self) -> usize {
        self.selected.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }
}
