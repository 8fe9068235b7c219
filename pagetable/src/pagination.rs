//! Pagination state and page arithmetic.

use std::ops::Range;

use serde::{Deserialize, Serialize};

/// Page size used by client tables when none is given.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Number of pages for `row_count` rows.
///
/// Never less than one: an empty row set is a single empty page. A zero
/// page size is treated as one.
pub fn page_count(row_count: usize, page_size: usize) -> usize {
    row_count.div_ceil(page_size.max(1)).max(1)
}

/// Zero-based page index plus page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationState {
    pub page_index: usize,
    pub page_size: usize,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    /// First page with the given size.
    pub fn new(page_size: usize) -> Self {
        Self {
            page_index: 0,
            page_size,
        }
    }

    /// Same size, different page.
    pub fn with_page_index(self, page_index: usize) -> Self {
        Self { page_index, ..self }
    }

    /// Pull `page_index` back into `[0, page_count - 1]`.
    pub fn clamped(self, page_count: usize) -> Self {
        let last = page_count.max(1) - 1;
        self.with_page_index(self.page_index.min(last))
    }

    pub fn can_previous(&self) -> bool {
        self.page_index > 0
    }

    pub fn can_next(&self, page_count: usize) -> bool {
        self.page_index + 1 < page_count
    }

    /// The previous page, or `None` on the first page.
    pub fn previous(self) -> Option<Self> {
        self.can_previous()
            .then(|| self.with_page_index(self.page_index - 1))
    }

    /// The next page, or `None` on the last page.
    pub fn next(self, page_count: usize) -> Option<Self> {
        self.can_next(page_count)
            .then(|| self.with_page_index(self.page_index + 1))
    }

    /// Slice of a materialized row set covered by this page.
    pub fn row_range(&self, row_count: usize) -> Range<usize> {
        let size = self.page_size.max(1);
        let start = self.page_index.saturating_mul(size).min(row_count);
        let end = start.saturating_add(size).min(row_count);
        start..end
    }
}
