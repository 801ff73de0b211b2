//! Table state and its reducer.
//!
//! [`TableState`] holds the source snapshot and every derived view. All
//! changes go through [`reduce`] (or [`TableState::apply`]), which stores
//! the action's payload and then runs the reaction rules synchronously, in
//! a fixed order:
//!
//! 1. rebuild the working collection if the source, the narrowing specs or
//!    the sort changed: source, then the active narrowing (structured
//!    filters or search, whichever the user touched last), then the sort;
//! 2. recompute the page count from the working length;
//! 3. re-slice the visible page.
//!
//! After any single action the working collection, page count and visible
//! page are mutually consistent.

use super::filter::{self, StructuredFilter};
use super::paginate::{self, PageSpec};
use super::search::{self, SearchSpec, TextMatcher};
use super::sort::{self, SortSpec};
use crate::model::{Record, Value};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Identity extractor: maps an item to its unique key.
pub type IdentityFn<T> = Arc<dyn Fn(&T) -> Value + Send + Sync>;

/// Which narrowing projection the user touched last.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NarrowingMode {
    /// Working collection is the whole source
    #[default]
    None,
    Search,
    StructuredFilter,
}

/// A named state transition.
#[derive(Debug, Clone)]
pub enum Action<T> {
    /// Replace the source snapshot (new data from the collection source)
    SetItems(Arc<[T]>),
    /// Set or clear the sort
    SetSort(Option<SortSpec>),
    /// Set the search and make it the active narrowing
    SetSearch(SearchSpec),
    /// Set the structured filters and make them the active narrowing
    SetStructuredFilters(Vec<StructuredFilter>),
    /// Drop every structured filter, restoring the unfiltered source
    ClearStructuredFilters,
    /// Move to a page (1-based, not clamped)
    SetPage(usize),
    /// Change the page size
    SetPageSize(NonZeroUsize),
    /// Store an already materialised page slice (positions into the source).
    /// Ignored unless it equals the current page of the working collection.
    SetVisiblePage(Vec<usize>),
}

/// Aggregate state of one table instance.
pub struct TableState<T> {
    source: Arc<[T]>,
    identity: IdentityFn<T>,
    matcher: TextMatcher,
    /// Positions into `source`, after narrowing and sorting
    working: Vec<usize>,
    sort: Option<SortSpec>,
    search: SearchSpec,
    filters: Vec<StructuredFilter>,
    mode: NarrowingMode,
    page: PageSpec,
    /// Positions into `source` on the current page
    visible: Vec<usize>,
}

impl<T: Record> TableState<T> {
    /// Initial state over `items`: unsorted, unfiltered, on page 1.
    pub fn new(
        items: impl Into<Arc<[T]>>,
        page_size: NonZeroUsize,
        identity: IdentityFn<T>,
        matcher: TextMatcher,
        search_key: Option<String>,
    ) -> Self {
        let mut state = Self {
            source: items.into(),
            identity,
            matcher,
            working: Vec::new(),
            sort: None,
            search: SearchSpec::new("", search_key),
            filters: Vec::new(),
            mode: NarrowingMode::None,
            page: PageSpec::new(page_size),
            visible: Vec::new(),
        };
        state.rebuild_working();
        state.refresh_page();
        state
    }

    /// Apply one action and run the reaction rules.
    pub fn apply(&mut self, action: Action<T>) {
        let rebuild = match action {
            Action::SetItems(items) => {
                self.source = items;
                // Fresh data discards narrowing; search and filter settings stay configured
                self.mode = NarrowingMode::None;
                true
            }
            Action::SetSort(spec) => {
                self.sort = spec;
                true
            }
            Action::SetSearch(spec) => {
                self.search = spec;
                self.mode = NarrowingMode::Search;
                true
            }
            Action::SetStructuredFilters(filters) => {
                self.filters = filters;
                self.mode = NarrowingMode::StructuredFilter;
                true
            }
            Action::ClearStructuredFilters => {
                self.filters.clear();
                self.mode = NarrowingMode::StructuredFilter;
                true
            }
            Action::SetPage(page) => {
                self.page.current_page = page;
                false
            }
            Action::SetPageSize(size) => {
                self.page.page_size = size;
                false
            }
            Action::SetVisiblePage(slice) => {
                let bounds = self.page.bounds(self.working.len());
                if slice != self.working[bounds] {
                    tracing::warn!(
                        page = self.page.current_page,
                        "Ignoring a page slice that does not match the working collection"
                    );
                }
                false
            }
        };

        if rebuild {
            self.rebuild_working();
        }
        self.refresh_page();
    }

    /// Rule 1: source -> active narrowing -> sort.
    fn rebuild_working(&mut self) {
        let source = &self.source;
        let mut working = match self.mode {
            NarrowingMode::None => (0..source.len()).collect(),
            NarrowingMode::Search => search::matching_indices(source, &self.search, &self.matcher),
            NarrowingMode::StructuredFilter => {
                let identity = &self.identity;
                filter::matching_indices(source, &self.filters, &self.matcher, |item| {
                    identity(item)
                })
            }
        };
        if let Some(spec) = &self.sort {
            sort::sort_indices(source, &mut working, spec);
        }
        tracing::debug!(
            mode = ?self.mode,
            source = source.len(),
            working = working.len(),
            "Rebuilt working collection"
        );
        self.working = working;
    }

    /// Rules 2 and 3: page count, then the visible slice.
    fn refresh_page(&mut self) {
        self.page.total_pages = paginate::total_pages(self.working.len(), self.page.page_size);
        let bounds = self.page.bounds(self.working.len());
        self.visible = self.working[bounds].to_vec();
    }
}

impl<T> TableState<T> {
    /// The source snapshot.
    #[must_use]
    pub fn source(&self) -> &[T] {
        &self.source
    }

    /// Shared handle to the source snapshot.
    #[must_use]
    pub fn source_handle(&self) -> Arc<[T]> {
        Arc::clone(&self.source)
    }

    /// Identity of `item`.
    pub fn identity_of(&self, item: &T) -> Value {
        (self.identity)(item)
    }

    /// Items of the working collection, in view order.
    pub fn working_items(&self) -> impl Iterator<Item = &T> {
        self.working.iter().map(|&idx| &self.source[idx])
    }

    #[must_use]
    pub fn working_len(&self) -> usize {
        self.working.len()
    }

    /// Items on the current page.
    #[must_use]
    pub fn visible_items(&self) -> Vec<&T> {
        self.visible
            .iter()
            .filter_map(|&idx| self.source.get(idx))
            .collect()
    }

    /// Source positions on the current page.
    #[must_use]
    pub fn visible_positions(&self) -> &[usize] {
        &self.visible
    }

    #[must_use]
    pub const fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    #[must_use]
    pub const fn search(&self) -> &SearchSpec {
        &self.search
    }

    #[must_use]
    pub fn filters(&self) -> &[StructuredFilter] {
        &self.filters
    }

    #[must_use]
    pub const fn mode(&self) -> NarrowingMode {
        self.mode
    }

    #[must_use]
    pub const fn page(&self) -> &PageSpec {
        &self.page
    }

    #[must_use]
    pub const fn matcher(&self) -> &TextMatcher {
        &self.matcher
    }
}

/// Pure reducer: `(state, action) -> state`.
#[must_use]
pub fn reduce<T: Record>(mut state: TableState<T>, action: Action<T>) -> TableState<T> {
    state.apply(action);
    state
}

impl<T> Clone for TableState<T> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            identity: Arc::clone(&self.identity),
            matcher: self.matcher,
            working: self.working.clone(),
            sort: self.sort.clone(),
            search: self.search.clone(),
            filters: self.filters.clone(),
            mode: self.mode,
            page: self.page,
            visible: self.visible.clone(),
        }
    }
}

impl<T> fmt::Debug for TableState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TableState")
            .field("source_len", &self.source.len())
            .field("working_len", &self.working.len())
            .field("sort", &self.sort)
            .field("search", &self.search)
            .field("filters", &self.filters)
            .field("mode", &self.mode)
            .field("page", &self.page)
            .field("visible", &self.visible)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Post;

    fn posts(n: u64) -> Vec<Post> {
        (1..=n)
            .map(|id| Post {
                id,
                user_id: (id - 1) % 3 + 1,
                title: format!("title {id}"),
                body: String::new(),
            })
            .collect()
    }

    fn state(items: Vec<Post>, page_size: usize) -> TableState<Post> {
        TableState::new(
            items,
            NonZeroUsize::new(page_size).unwrap(),
            Arc::new(Post::key),
            TextMatcher::default(),
            None,
        )
    }

    fn visible_ids(state: &TableState<Post>) -> Vec<u64> {
        state.visible_items().iter().map(|p| p.id).collect()
    }

    #[test]
    fn test_initial_state() {
        let state = state(posts(5), 2);
        assert_eq!(state.working_len(), 5);
        assert_eq!(state.page().total_pages, 3);
        assert_eq!(visible_ids(&state), vec![1, 2]);
        assert_eq!(state.mode(), NarrowingMode::None);
    }

    #[test]
    fn test_page_past_end_is_empty() {
        let state = reduce(state(posts(5), 2), Action::SetPage(3));
        assert_eq!(visible_ids(&state), vec![5]);

        let state = reduce(state, Action::SetPage(4));
        assert!(state.visible_items().is_empty());
        assert_eq!(state.page().current_page, 4);
        assert_eq!(state.page().total_pages, 3);
    }

    #[test]
    fn test_search_narrows_and_recounts() {
        let state = reduce(
            state(posts(12), 5),
            Action::SetSearch(SearchSpec::new("title 1", None)),
        );
        // title 1, title 10, title 11, title 12
        assert_eq!(state.working_len(), 4);
        assert_eq!(state.page().total_pages, 1);
        assert_eq!(state.mode(), NarrowingMode::Search);
    }

    #[test]
    fn test_filters_supersede_search() {
        let state = reduce(
            state(posts(6), 10),
            Action::SetSearch(SearchSpec::new("title 1", None)),
        );
        let state = reduce(
            state,
            Action::SetStructuredFilters(vec![StructuredFilter::exact("userId", 2u64)]),
        );
        assert_eq!(visible_ids(&state), vec![2, 5]);
        // both specs persist
        assert_eq!(state.search().term, "title 1");
        assert_eq!(state.filters().len(), 1);
    }

    #[test]
    fn test_clear_filters_restores_source_order() {
        let items = posts(6);
        let state = reduce(
            state(items.clone(), 10),
            Action::SetStructuredFilters(vec![StructuredFilter::exact("userId", 3u64)]),
        );
        let state = reduce(state, Action::ClearStructuredFilters);
        let ids: Vec<u64> = state.working_items().map(|p| p.id).collect();
        assert_eq!(ids, items.iter().map(|p| p.id).collect::<Vec<_>>());
        assert!(state.filters().is_empty());
    }

    #[test]
    fn test_sort_applies_to_narrowed_view() {
        let state = reduce(
            state(posts(6), 10),
            Action::SetStructuredFilters(vec![StructuredFilter::exact("userId", 1u64)]),
        );
        let state = reduce(state, Action::SetSort(Some(SortSpec::descending("id"))));
        assert_eq!(visible_ids(&state), vec![4, 1]);
    }

    #[test]
    fn test_set_items_resets_narrowing_keeps_specs() {
        let state = reduce(
            state(posts(6), 10),
            Action::SetStructuredFilters(vec![StructuredFilter::exact("userId", 1u64)]),
        );
        let state = reduce(state, Action::SetSort(Some(SortSpec::descending("id"))));
        let state = reduce(state, Action::SetItems(Arc::from(posts(3))));

        assert_eq!(state.mode(), NarrowingMode::None);
        assert_eq!(state.filters().len(), 1);
        assert_eq!(visible_ids(&state), vec![3, 2, 1]);
    }

    #[test]
    fn test_page_size_change_recounts() {
        let state = reduce(
            state(posts(10), 10),
            Action::SetPageSize(NonZeroUsize::new(3).unwrap()),
        );
        assert_eq!(state.page().total_pages, 4);
        assert_eq!(visible_ids(&state), vec![1, 2, 3]);
    }

    #[test]
    fn test_set_visible_page_must_match_current_page() {
        let state = reduce(state(posts(5), 2), Action::SetVisiblePage(vec![4]));
        assert_eq!(visible_ids(&state), vec![1, 2]);
        assert_eq!(state.page().current_page, 1);

        let state = reduce(state, Action::SetPage(3));
        let state = reduce(state, Action::SetVisiblePage(vec![4]));
        assert_eq!(visible_ids(&state), vec![5]);

        let state = reduce(state, Action::SetVisiblePage(Vec::new()));
        assert_eq!(visible_ids(&state), vec![5]);
    }
}
