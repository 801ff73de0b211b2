//! Column descriptors.
//!
//! A column names a field of the item type, how it is labelled, whether it
//! can be sorted or filtered, and how a cell is rendered. Columns are
//! declared once per table and never change afterwards.

use super::Record;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Cell render callback.
pub type RenderFn<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// How a filterable column is filtered in the filter panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum FilterKind {
    /// Free-text input, matched with the table's text matcher
    FreeText,
    /// Pick one of the column's distinct values
    SingleSelect,
    /// Pick any number of the column's distinct values
    MultiSelect,
}

impl FilterKind {
    /// Whether the panel accepts several values for this column.
    #[must_use]
    pub const fn is_multiple(self) -> bool {
        matches!(self, Self::MultiSelect)
    }
}

/// Describes one table column over items of type `T`.
pub struct Column<T> {
    key: String,
    label: String,
    sortable: bool,
    filter: Option<FilterKind>,
    render: RenderFn<T>,
}

impl<T: Record + 'static> Column<T> {
    /// Create a column that renders the field's display string.
    pub fn new(key: impl Into<String>, label: impl Into<String>) -> Self {
        let key = key.into();
        let field = key.clone();
        Self {
            key,
            label: label.into(),
            sortable: false,
            filter: None,
            render: Arc::new(move |item: &T| item.field_text(&field).unwrap_or_default()),
        }
    }
}

impl<T> Column<T> {
    /// Allow sorting by this column.
    #[must_use]
    pub const fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Allow filtering this column with the given kind of control.
    #[must_use]
    pub const fn filterable(mut self, kind: FilterKind) -> Self {
        self.filter = Some(kind);
        self
    }

    /// Replace the cell render callback.
    #[must_use]
    pub fn render(mut self, render: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.render = Arc::new(render);
        self
    }

    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    #[must_use]
    pub const fn is_sortable(&self) -> bool {
        self.sortable
    }

    #[must_use]
    pub const fn is_filterable(&self) -> bool {
        self.filter.is_some()
    }

    #[must_use]
    pub const fn filter_kind(&self) -> Option<FilterKind> {
        self.filter
    }

    /// Render one cell of this column.
    pub fn render_cell(&self, item: &T) -> String {
        (self.render)(item)
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            filter: self.filter,
            render: Arc::clone(&self.render),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("key", &self.key)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("filter", &self.filter)
            .finish_non_exhaustive()
    }
}
