//! Fixed-size pagination.
//!
//! Pages are 1-based. A page past the end is not an error: it is simply
//! empty. The current page is never clamped here.

use std::num::NonZeroUsize;
use std::ops::Range;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: NonZeroUsize = match NonZeroUsize::new(10) {
    Some(size) => size,
    None => unreachable!(),
};

/// Page size, current page and derived page count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSpec {
    pub page_size: NonZeroUsize,
    /// 1-based
    pub current_page: usize,
    /// `ceil(len / page_size)` of the working collection
    pub total_pages: usize,
}

impl Default for PageSpec {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PageSpec {
    #[must_use]
    pub const fn new(page_size: NonZeroUsize) -> Self {
        Self {
            page_size,
            current_page: 1,
            total_pages: 0,
        }
    }

    /// Index range of the current page within a collection of `len` items.
    #[must_use]
    pub fn bounds(&self, len: usize) -> Range<usize> {
        page_bounds(len, self.page_size, self.current_page)
    }

    #[must_use]
    pub const fn has_prev(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Page number behind the "previous" control, if enabled.
    #[must_use]
    pub const fn prev(&self) -> Option<usize> {
        if self.has_prev() {
            Some(self.current_page - 1)
        } else {
            None
        }
    }

    /// Page number behind the "next" control, if enabled.
    #[must_use]
    pub const fn next(&self) -> Option<usize> {
        if self.has_next() {
            Some(self.current_page + 1)
        } else {
            None
        }
    }

    /// Whether `page` is a valid direct-jump target.
    #[must_use]
    pub const fn contains(&self, page: usize) -> bool {
        page >= 1 && page <= self.total_pages
    }

    /// Page numbers offered for direct jumps.
    pub fn pages(&self) -> impl Iterator<Item = usize> {
        1..=self.total_pages
    }
}

/// Number of pages needed for `len` items.
#[must_use]
pub const fn total_pages(len: usize, page_size: NonZeroUsize) -> usize {
    len.div_ceil(page_size.get())
}

/// Index range of page `page` (1-based), clamped to `len`.
///
/// Page 0 and pages past the end yield an empty range.
#[must_use]
pub fn page_bounds(len: usize, page_size: NonZeroUsize, page: usize) -> Range<usize> {
    let Some(start) = page
        .checked_sub(1)
        .and_then(|p| p.checked_mul(page_size.get()))
    else {
        return 0..0;
    };
    let start = start.min(len);
    let end = start.saturating_add(page_size.get()).min(len);
    start..end
}

/// Slice of `items` shown on page `page`.
pub fn page<T>(items: &[T], page_size: NonZeroUsize, page: usize) -> &[T] {
    &items[page_bounds(items.len(), page_size, page)]
}
