//! Where server-mode pages come from.

use std::fmt::Display;

use async_trait::async_trait;
use log::warn;

use crate::pagination::PaginationState;
use crate::sort::{SortDirection, SortState};

/// Everything a remote source needs to produce one page.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PageRequest {
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
    /// Trimmed search text, `None` for no filter.
    pub search: Option<String>,
    pub sort: SortState,
}

impl PageRequest {
    pub fn new(pagination: &PaginationState, sort: &SortState, search: Option<String>) -> Self {
        Self {
            page: pagination.page_index + 1,
            page_size: pagination.page_size.max(1),
            search: search.filter(|s| !s.trim().is_empty()),
            sort: sort.clone(),
        }
    }

    /// Sort column, or `default` when unsorted.
    pub fn sort_by<'a>(&'a self, default: &'a str) -> &'a str {
        self.sort.sort_by_or(default)
    }

    pub fn sort_order(&self) -> SortDirection {
        self.sort.sort_order()
    }

    /// Cache key covering every request parameter.
    ///
    /// `scope` separates sources sharing one cache.
    pub fn cache_key(&self, scope: &str) -> String {
        format!(
            "{}:page={}:limit={}:search={}:sortBy={}:sortOrder={}",
            scope,
            self.page,
            self.page_size,
            self.search.as_deref().unwrap_or(""),
            self.sort.column_id().unwrap_or(""),
            self.sort_order().as_str(),
        )
    }
}

/// One fetched page.
#[derive(Debug, Clone, PartialEq)]
pub struct PageData<T> {
    /// Rows of the requested page only.
    pub rows: Vec<T>,
    /// Total rows across all pages.
    pub row_count: usize,
}

impl<T> PageData<T> {
    pub fn new(rows: Vec<T>, row_count: usize) -> Self {
        Self { rows, row_count }
    }

    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            row_count: 0,
        }
    }
}

impl<T> Default for PageData<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Remote page provider for a [`ServerPagedTable`](crate::ServerPagedTable).
#[async_trait]
pub trait PageSource<T: Send>: Send + Sync {
    type Error: Display + Send;

    async fn fetch(&self, request: &PageRequest) -> Result<PageData<T>, Self::Error>;

    /// Fetch, treating any failure as an empty page.
    ///
    /// The error is logged and handed back so callers can report it.
    async fn fetch_or_empty(&self, request: &PageRequest) -> (PageData<T>, Option<Self::Error>) {
        match self.fetch(request).await {
            Ok(data) => (data, None),
            Err(e) => {
                warn!("page fetch failed (page {}): {}", request.page, e);
                (PageData::empty(), Some(e))
            }
        }
    }
}
