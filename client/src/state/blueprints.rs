//! Blueprint-list state for the sidebar.
//!
//! DESIGN
//! ======
//! The list is an inventory of the author's blueprints, kept apart from the
//! open blueprint in `board` so a list reload never disturbs drawing.

#[cfg(test)]
#[path = "blueprints_test.rs"]
mod blueprints_test;

use frames::BlueprintSummary;

/// Name selected when nothing else remains after a delete.
pub const FALLBACK_NAME: &str = "plano-1";

/// The current author's blueprints as last fetched.
#[derive(Clone, Debug, Default)]
pub struct BlueprintsState {
    pub items: Vec<BlueprintSummary>,
    pub loading: bool,
    pub create_pending: bool,
    pub error: Option<String>,
}

impl BlueprintsState {
    pub fn contains(&self, name: &str) -> bool {
        self.items.iter().any(|item| item.name == name)
    }

    pub fn total(&self) -> usize {
        self.items.len()
    }
}

/// Counter bumped whenever the list must be fetched again.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ListRefresh(pub u64);

impl ListRefresh {
    pub fn bump(&mut self) {
        self.0 = self.0.wrapping_add(1);
    }
}

/// Name to open after `deleted` is removed: the first other listed
/// blueprint, else [`FALLBACK_NAME`].
pub fn next_selection_after_delete(items: &[BlueprintSummary], deleted: &str) -> String {
    items
        .iter()
        .find(|item| item.name != deleted)
        .map_or_else(|| FALLBACK_NAME.to_owned(), |item| item.name.clone())
}
