//! Generic tabular data engine.
//!
//! Given an in-memory collection of [`Record`]s and a set of column
//! descriptors, a [`Table`] produces a searched or filtered, sorted,
//! paginated and role-gated view, and turns row controls into
//! [`TableEvent`]s for its host.
//!
//! # Pipeline
//!
//! ```text
//! source -> [structured filters | search] -> sort -> paginate -> visible page
//! ```
//!
//! Structured filters and search are alternative narrowings: whichever the
//! user touched last is applied. All state changes go through the reducer in
//! [`state`], which keeps the working collection, page count and visible page
//! consistent after every action.
//!
//! # Example
//!
//! ```
//! use postdesk::model::{post_columns, Post, Role};
//! use postdesk::table::{Table, TableOptions};
//!
//! let posts: Vec<Post> = (1..=25)
//!     .map(|id| Post { id, user_id: id % 3, title: format!("post {id}"), body: String::new() })
//!     .collect();
//!
//! let mut table = Table::new(post_columns(30), posts, Post::key, TableOptions::default())?;
//! table.search("post 1");
//! table.sort_by("id")?;
//! table.sort_by("id")?; // second click sorts descending
//!
//! assert_eq!(table.visible_page()[0].id, 19);
//! assert!(!table.affordances(Role::Reader).edit);
//! # Ok::<(), postdesk::ConsoleError>(())
//! ```

pub mod events;
pub mod filter;
pub mod gate;
pub mod paginate;
pub mod panel;
pub mod search;
pub mod sort;
pub mod state;

pub use events::TableEvent;
pub use filter::{Chip, MatchKind, StructuredFilter};
pub use gate::{Affordances, Permission};
pub use paginate::{DEFAULT_PAGE_SIZE, PageSpec};
pub use panel::FilterPanel;
pub use search::{MatchMode, SearchSpec, TextMatcher};
pub use sort::{SortOrder, SortSpec};
pub use state::{Action, IdentityFn, NarrowingMode, TableState, reduce};

use crate::error::{ConsoleError, Result};
use crate::model::{Column, Record, Role, Value};
use indexmap::IndexSet;
use std::collections::HashSet;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Construction options for a [`Table`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableOptions {
    pub page_size: NonZeroUsize,
    /// Field searched by the search box; `None` searches every field
    pub search_key: Option<String>,
    /// Label and placeholder of the search box
    pub filter_label: String,
    /// Display name of one item, used for the "Add" control
    pub name: String,
    pub matcher: TextMatcher,
}

impl Default for TableOptions {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            search_key: None,
            filter_label: "Search".to_string(),
            name: "Item".to_string(),
            matcher: TextMatcher::default(),
        }
    }
}

impl TableOptions {
    #[must_use]
    pub const fn with_page_size(mut self, page_size: NonZeroUsize) -> Self {
        self.page_size = page_size;
        self
    }

    #[must_use]
    pub fn with_search_key(mut self, key: Option<String>) -> Self {
        self.search_key = key;
        self
    }

    #[must_use]
    pub fn with_filter_label(mut self, label: impl Into<String>) -> Self {
        self.filter_label = label.into();
        self
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    #[must_use]
    pub const fn with_matcher(mut self, matcher: TextMatcher) -> Self {
        self.matcher = matcher;
        self
    }
}

/// A table instance: immutable columns plus view state.
pub struct Table<T> {
    columns: Arc<[Column<T>]>,
    options: TableOptions,
    state: TableState<T>,
    panel: FilterPanel,
}

impl<T: Record> Table<T> {
    /// Create a table over `items`.
    ///
    /// Fails if two columns share a key or the search key is not a column.
    pub fn new(
        columns: Vec<Column<T>>,
        items: impl Into<Arc<[T]>>,
        identity: impl Fn(&T) -> Value + Send + Sync + 'static,
        options: TableOptions,
    ) -> Result<Self> {
        let mut keys = HashSet::new();
        for column in &columns {
            if !keys.insert(column.key()) {
                return Err(ConsoleError::validation(format!(
                    "duplicate column key '{}'",
                    column.key()
                )));
            }
        }
        if let Some(key) = &options.search_key
            && !keys.contains(key.as_str())
        {
            return Err(ConsoleError::UnknownColumn(key.clone()));
        }

        let state = TableState::new(
            items,
            options.page_size,
            Arc::new(identity),
            options.matcher,
            options.search_key.clone(),
        );
        Ok(Self {
            columns: columns.into(),
            options,
            state,
            panel: FilterPanel::new(),
        })
    }

    /// Apply a raw reducer action.
    pub fn dispatch(&mut self, action: Action<T>) {
        self.state.apply(action);
    }

    /// Replace the source collection (fresh data from the collection source).
    pub fn set_items(&mut self, items: impl Into<Arc<[T]>>) {
        self.dispatch(Action::SetItems(items.into()));
    }

    /// Run the search box with `term` against the default search key.
    pub fn search(&mut self, term: impl Into<String>) {
        let spec = SearchSpec::new(term, self.options.search_key.clone());
        tracing::debug!(term = %spec.term, key = ?spec.key, "Search");
        self.dispatch(Action::SetSearch(spec));
    }

    /// Apply `filters` as the structured filter set.
    ///
    /// Every filter must name a filterable column.
    pub fn apply_filters(&mut self, filters: Vec<StructuredFilter>) -> Result<()> {
        for filter in &filters {
            self.filterable_column(&filter.key)?;
        }
        tracing::debug!(count = filters.len(), "Applying structured filters");
        self.panel.sync(&filters);
        self.dispatch(Action::SetStructuredFilters(filters));
        Ok(())
    }

    /// Set one field of the filter panel draft.
    pub fn set_filter_field(&mut self, key: &str, values: Vec<Value>) -> Result<()> {
        let kind = self
            .filterable_column(key)?
            .filter_kind()
            .ok_or_else(|| ConsoleError::UnknownColumn(key.to_string()))?;
        self.panel.set_field(key, kind, values);
        Ok(())
    }

    /// Apply the filter panel draft.
    pub fn submit_filter_panel(&mut self) -> Result<()> {
        let draft = self.panel.draft().to_vec();
        self.apply_filters(draft)
    }

    /// Remove the chip for `key`: every filter on that key goes.
    pub fn remove_chip(&mut self, key: &str) {
        let remaining = filter::without_key(self.state.filters(), key);
        self.panel.sync(&remaining);
        self.dispatch(Action::SetStructuredFilters(remaining));
    }

    /// Cancel filtering: clear the filters and close the panel.
    pub fn cancel_filters(&mut self) {
        self.dispatch(Action::ClearStructuredFilters);
        self.panel.reset();
        self.panel.close();
    }

    /// Open or close the filter panel, seeding the draft on open.
    pub fn toggle_filter_panel(&mut self) {
        if !self.panel.is_open() {
            self.panel.sync(self.state.filters());
        }
        self.panel.toggle();
    }

    /// Click on the header of `key`.
    pub fn sort_by(&mut self, key: &str) -> Result<()> {
        let column = self
            .column(key)
            .ok_or_else(|| ConsoleError::UnknownColumn(key.to_string()))?;
        if !column.is_sortable() {
            return Err(ConsoleError::validation(format!(
                "column '{key}' is not sortable"
            )));
        }
        let spec = SortSpec::after_click(self.state.sort(), key);
        tracing::debug!(key = %spec.key, order = ?spec.order, "Sort");
        self.dispatch(Action::SetSort(Some(spec)));
        Ok(())
    }

    /// Return to the source order.
    pub fn clear_sort(&mut self) {
        self.dispatch(Action::SetSort(None));
    }

    /// Jump to `page`. Out-of-range pages show nothing.
    pub fn go_to_page(&mut self, page: usize) {
        self.dispatch(Action::SetPage(page));
    }

    /// Follow the "next" control; `false` if it is disabled.
    pub fn next_page(&mut self) -> bool {
        match self.state.page().next() {
            Some(page) => {
                self.go_to_page(page);
                true
            }
            None => false,
        }
    }

    /// Follow the "previous" control; `false` if it is disabled.
    pub fn prev_page(&mut self) -> bool {
        match self.state.page().prev() {
            Some(page) => {
                self.go_to_page(page);
                true
            }
            None => false,
        }
    }

    pub fn set_page_size(&mut self, page_size: NonZeroUsize) {
        self.options.page_size = page_size;
        self.dispatch(Action::SetPageSize(page_size));
    }

    /// Distinct rendered values of a filterable column, in first-seen order.
    pub fn filter_options(&self, key: &str) -> Result<Vec<String>> {
        let column = self.filterable_column(key)?;
        let options: IndexSet<String> = self
            .state
            .source()
            .iter()
            .map(|item| column.render_cell(item))
            .collect();
        Ok(options.into_iter().collect())
    }

    /// Active filters grouped by key, labelled with the column label.
    #[must_use]
    pub fn chips(&self) -> Vec<Chip> {
        filter::chips(self.state.filters(), |key| {
            self.column(key).map(Column::label)
        })
    }

    /// Rendered cells of the visible page, one row per item.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.visible_page()
            .into_iter()
            .map(|item| self.columns.iter().map(|c| c.render_cell(item)).collect())
            .collect()
    }

    fn filterable_column(&self, key: &str) -> Result<&Column<T>> {
        self.column(key)
            .filter(|c| c.is_filterable())
            .ok_or_else(|| ConsoleError::UnknownColumn(key.to_string()))
    }
}

impl<T> Table<T> {
    #[must_use]
    pub fn columns(&self) -> &[Column<T>] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, key: &str) -> Option<&Column<T>> {
        self.columns.iter().find(|c| c.key() == key)
    }

    #[must_use]
    pub const fn options(&self) -> &TableOptions {
        &self.options
    }

    #[must_use]
    pub const fn state(&self) -> &TableState<T> {
        &self.state
    }

    #[must_use]
    pub const fn filter_panel(&self) -> &FilterPanel {
        &self.panel
    }

    /// Items on the current page.
    #[must_use]
    pub fn visible_page(&self) -> Vec<&T> {
        self.state.visible_items()
    }

    #[must_use]
    pub fn working_len(&self) -> usize {
        self.state.working_len()
    }

    #[must_use]
    pub const fn page_info(&self) -> PageSpec {
        *self.state.page()
    }

    /// Whether the visible page should show the "no data" state.
    #[must_use]
    pub fn is_empty_view(&self) -> bool {
        self.state.visible_positions().is_empty()
    }

    /// Label of the "Add" control.
    #[must_use]
    pub fn add_label(&self) -> String {
        format!("Add {}", self.options.name)
    }

    #[must_use]
    pub const fn affordances(&self, role: Role) -> Affordances {
        Affordances::for_role(role)
    }

    /// The source item with identity `id`.
    #[must_use]
    pub fn find(&self, id: &Value) -> Option<&T> {
        self.state
            .source()
            .iter()
            .find(|item| self.state.identity_of(item) == *id)
    }

    fn lookup(&self, id: &Value) -> Result<&T> {
        self.find(id)
            .ok_or_else(|| ConsoleError::UnknownItem(id.to_string()))
    }
}

impl<T: Clone> Table<T> {
    /// The "Add" control. Requires the create permission.
    pub fn request_new(&self, role: Role) -> Result<TableEvent<T>> {
        gate::require(role, Permission::Create)?;
        Ok(TableEvent::RequestNew)
    }

    /// The edit control of row `id`. Requires the edit permission.
    pub fn request_edit(&self, role: Role, id: &Value) -> Result<TableEvent<T>> {
        gate::require(role, Permission::Edit)?;
        Ok(TableEvent::RequestEdit(self.lookup(id)?.clone()))
    }

    /// The delete control of row `id`. Requires the delete permission.
    pub fn request_delete(&self, role: Role, id: &Value) -> Result<TableEvent<T>> {
        gate::require(role, Permission::Delete)?;
        Ok(TableEvent::RequestDelete(self.lookup(id)?.clone()))
    }

    /// A click on row `id`.
    pub fn activate_row(&self, id: &Value) -> Result<TableEvent<T>> {
        Ok(TableEvent::RowActivated(self.lookup(id)?.clone()))
    }
}

impl<T> std::fmt::Debug for Table<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Table")
            .field("columns", &self.columns)
            .field("options", &self.options)
            .field("state", &self.state)
            .field("panel", &self.panel)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{FilterKind, Post, post_columns};

    fn posts(n: u64) -> Vec<Post> {
        (1..=n)
            .map(|id| Post {
                id,
                user_id: (id - 1) % 3 + 1,
                title: format!("title {id}"),
                body: format!("body {id}"),
            })
            .collect()
    }

    fn table(n: u64) -> Table<Post> {
        Table::new(
            post_columns(30),
            posts(n),
            Post::key,
            TableOptions::default().with_search_key(Some("title".into())),
        )
        .unwrap()
    }

    fn visible_ids(table: &Table<Post>) -> Vec<u64> {
        table.visible_page().iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_rejects_unknown_search_key() {
        let result = Table::new(
            post_columns(30),
            posts(1),
            Post::key,
            TableOptions::default().with_search_key(Some("nope".into())),
        );
        assert!(matches!(result, Err(ConsoleError::UnknownColumn(_))));
    }

    #[test]
    fn test_rejects_duplicate_columns() {
        let mut columns = post_columns(30);
        columns.push(Column::new("id", "Again"));
        let result = Table::new(columns, posts(1), Post::key, TableOptions::default());
        assert!(matches!(result, Err(ConsoleError::Validation(_))));
    }

    #[test]
    fn test_navigation_controls() {
        let mut t = table(25);
        assert_eq!(t.page_info().total_pages, 3);
        assert!(!t.prev_page());
        assert!(t.next_page());
        assert!(t.next_page());
        assert!(!t.next_page());
        assert_eq!(t.page_info().current_page, 3);
        assert_eq!(visible_ids(&t), (21..=25).collect::<Vec<_>>());
        assert!(t.prev_page());
        assert_eq!(t.page_info().current_page, 2);
    }

    #[test]
    fn test_sort_requires_sortable_column() {
        let columns = vec![Column::new("id", "ID"), Column::new("title", "Title").sortable()];
        let mut t = Table::new(columns, posts(3), Post::key, TableOptions::default()).unwrap();
        assert!(t.sort_by("id").is_err());
        assert!(matches!(t.sort_by("zzz"), Err(ConsoleError::UnknownColumn(_))));
        assert!(t.sort_by("title").is_ok());
    }

    #[test]
    fn test_filter_panel_flow() {
        let mut t = table(9);
        t.toggle_filter_panel();
        assert!(t.filter_panel().is_open());

        t.set_filter_field("userId", vec![1u64.into(), 3u64.into()]).unwrap();
        t.submit_filter_panel().unwrap();
        assert_eq!(visible_ids(&t), vec![1, 4, 7, 3, 6, 9]);
        assert_eq!(t.chips()[0].text(), "User ID: 1, 3");

        t.remove_chip("userId");
        assert_eq!(t.working_len(), 9);
        assert!(t.chips().is_empty());

        t.set_filter_field("title", vec!["title 2".into()]).unwrap();
        t.submit_filter_panel().unwrap();
        assert_eq!(visible_ids(&t), vec![2]);

        t.cancel_filters();
        assert!(!t.filter_panel().is_open());
        assert_eq!(t.working_len(), 9);
    }

    #[test]
    fn test_filters_require_filterable_columns() {
        let columns = vec![Column::new("id", "ID").filterable(FilterKind::SingleSelect)];
        let mut t = Table::new(columns, posts(3), Post::key, TableOptions::default()).unwrap();
        assert!(t.apply_filters(vec![StructuredFilter::exact("title", "x")]).is_err());
        assert!(t.set_filter_field("title", vec!["x".into()]).is_err());
        assert!(t.apply_filters(vec![StructuredFilter::exact("id", 2u64)]).is_ok());
        assert_eq!(visible_ids(&t), vec![2]);
    }

    #[test]
    fn test_filter_options_are_distinct_rendered_values() {
        let t = table(7);
        assert_eq!(t.filter_options("userId").unwrap(), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_gated_events() {
        let t = table(3);
        let id = Value::from(2u64);

        assert_eq!(t.request_new(Role::Admin).unwrap(), TableEvent::RequestNew);
        assert!(t.request_new(Role::Editor).unwrap_err().is_access_denied());

        let event = t.request_edit(Role::Editor, &id).unwrap();
        assert_eq!(event.item().map(|p| p.id), Some(2));
        assert!(t.request_delete(Role::Editor, &id).unwrap_err().is_access_denied());
        assert!(t.request_edit(Role::Reader, &id).unwrap_err().is_access_denied());

        assert!(matches!(
            t.request_delete(Role::Admin, &Value::from(99u64)),
            Err(ConsoleError::UnknownItem(_))
        ));
        assert!(matches!(t.activate_row(&id), Ok(TableEvent::RowActivated(_))));
    }

    #[test]
    fn test_empty_view() {
        let mut t = table(3);
        t.search("no such title");
        assert!(t.is_empty_view());
        assert_eq!(t.page_info().total_pages, 0);
    }

    #[test]
    fn test_rows_render_cells() {
        let t = table(1);
        assert_eq!(t.rows(), vec![vec!["1", "1", "title 1", "body 1"]]);
        assert_eq!(t.add_label(), "Add Item");
    }
}
