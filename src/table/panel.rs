//! Filter panel draft state.
//!
//! The panel edits a draft copy of the structured filters. Changing a field
//! replaces every draft entry for that field; the draft only takes effect
//! when the table applies it.

use super::filter::{MatchKind, StructuredFilter};
use crate::model::{FilterKind, Value};

/// Open/closed flag plus the draft filter list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterPanel {
    open: bool,
    draft: Vec<StructuredFilter>,
}

impl FilterPanel {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    #[must_use]
    pub fn draft(&self) -> &[StructuredFilter] {
        &self.draft
    }

    /// Replace the draft, e.g. with the filters currently applied.
    pub fn sync(&mut self, filters: &[StructuredFilter]) {
        self.draft = filters.to_vec();
    }

    /// Set the draft values of one field.
    ///
    /// Existing entries for `key` are dropped first. Empty values (an empty
    /// text box, an empty selection) leave the field unfiltered.
    pub fn set_field(&mut self, key: &str, kind: FilterKind, values: Vec<Value>) {
        self.draft.retain(|f| f.key != key);
        let match_kind = match kind {
            FilterKind::FreeText => MatchKind::FreeText,
            FilterKind::SingleSelect | FilterKind::MultiSelect => MatchKind::Exact,
        };
        let values = values
            .into_iter()
            .filter(|v| !v.to_string().is_empty());
        // single-value controls keep only the first value
        let limit = if kind.is_multiple() { usize::MAX } else { 1 };
        self.draft.extend(values.take(limit).map(|value| StructuredFilter {
            key: key.to_string(),
            kind: match_kind,
            value,
        }));
    }

    /// Draft values currently set for `key`.
    #[must_use]
    pub fn values_for(&self, key: &str) -> Vec<&Value> {
        self.draft
            .iter()
            .filter(|f| f.key == key)
            .map(|f| &f.value)
            .collect()
    }

    /// Clear the draft.
    pub fn reset(&mut self) {
        self.draft.clear();
    }
}
