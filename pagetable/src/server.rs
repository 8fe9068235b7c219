//! Server-driven paged table.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::debug;

use crate::column::Column;
use crate::debounce::{SEARCH_DEBOUNCE, SearchDebouncer};
use crate::navigator::PageNavigator;
use crate::pagination::{PaginationState, page_count};
use crate::render::{Footer, TableView};
use crate::sort::SortState;
use crate::traits::{PagedTable, TableId};

/// Called with the requested pagination.
pub type PaginateCallback = Arc<dyn Fn(PaginationState) + Send + Sync>;

/// Called with the requested sort state.
pub type SortCallback = Arc<dyn Fn(SortState) + Send + Sync>;

struct ServerInner<T> {
    columns: Vec<Column<T>>,
    /// Exactly one page, already in server order.
    rows: Vec<T>,
    /// Server-reported total across all pages.
    row_count: usize,
    pagination: PaginationState,
    sorting: SortState,
    navigator: PageNavigator,
    search_input: String,
    on_paginate: Option<PaginateCallback>,
    on_sort: Option<SortCallback>,
}

impl<T> ServerInner<T> {
    fn page_count(&self) -> usize {
        page_count(self.row_count, self.pagination.page_size)
    }

    fn footer(&self) -> Footer {
        let page_count = self.page_count();
        Footer {
            page_input: self.navigator.input().to_string(),
            page_count,
            row_count: self.row_count,
            can_previous: self.pagination.can_previous(),
            can_next: self.pagination.can_next(page_count),
        }
    }
}

/// A table whose rows, total, sort order and filter all live upstream.
///
/// The table never sorts or slices rows. User interactions are turned into
/// requests ([`on_paginate`](Self::on_paginate), [`on_sort`](Self::on_sort),
/// [`on_search`](Self::on_search)); the owner applies them, fetches, and
/// pushes the results back with [`set_pagination`](Self::set_pagination),
/// [`set_sorting`](Self::set_sorting) and [`set_page`](Self::set_page).
///
/// Search input is debounced by [`SEARCH_DEBOUNCE`]; the debouncer needs a
/// tokio runtime. Dropping the last handle cancels a pending search.
pub struct ServerPagedTable<T> {
    id: TableId,
    inner: Arc<RwLock<ServerInner<T>>>,
    search: Arc<SearchDebouncer>,
    dirty: Arc<AtomicBool>,
}

impl<T: Clone + 'static> ServerPagedTable<T> {
    pub fn new(columns: Vec<Column<T>>, pagination: PaginationState) -> Self {
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(ServerInner {
                columns,
                rows: Vec::new(),
                row_count: 0,
                pagination,
                sorting: SortState::none(),
                navigator: PageNavigator::new(pagination.page_index),
                search_input: String::new(),
                on_paginate: None,
                on_sort: None,
            })),
            search: Arc::new(SearchDebouncer::new(SEARCH_DEBOUNCE)),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    // -------------------------------------------------------------------------
    // Callbacks
    // -------------------------------------------------------------------------

    pub fn on_paginate<F>(&self, callback: F)
    where
        F: Fn(PaginationState) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_paginate = Some(Arc::new(callback));
        }
    }

    pub fn on_sort<F>(&self, callback: F)
    where
        F: Fn(SortState) + Send + Sync + 'static,
    {
        if let Ok(mut guard) = self.inner.write() {
            guard.on_sort = Some(Arc::new(callback));
        }
    }

    /// Install the search callback.
    ///
    /// May be replaced at any time; a pending search uses whichever
    /// callback is installed when it fires.
    pub fn on_search<F>(&self, callback: F)
    where
        F: Fn(Option<String>) + Send + Sync + 'static,
    {
        self.search.set_callback(callback);
    }

    fn request_pagination(&self, pagination: PaginationState) {
        let callback = self
            .inner
            .read()
            .ok()
            .and_then(|g| g.on_paginate.clone());
        debug!("{}: paginate {:?}", self.id, pagination);
        if let Some(callback) = callback {
            callback(pagination);
        }
    }

    // -------------------------------------------------------------------------
    // Upstream state
    // -------------------------------------------------------------------------

    /// Show a fetched page.
    pub fn set_page(&self, rows: Vec<T>, row_count: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
            guard.row_count = row_count;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Push the owner's pagination state. The page box follows it.
    pub fn set_pagination(&self, pagination: PaginationState) {
        if let Ok(mut guard) = self.inner.write() {
            guard.pagination = pagination;
            guard.navigator.sync(pagination.page_index);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Push the owner's sort state.
    pub fn set_sorting(&self, sorting: SortState) {
        if let Ok(mut guard) = self.inner.write() {
            guard.sorting = sorting;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    pub fn row_count(&self) -> usize {
        self.inner.read().map(|g| g.row_count).unwrap_or(0)
    }

    pub fn pagination(&self) -> PaginationState {
        self.inner
            .read()
            .map(|g| g.pagination)
            .unwrap_or_default()
    }

    pub fn sorting(&self) -> SortState {
        self.inner
            .read()
            .map(|g| g.sorting.clone())
            .unwrap_or_default()
    }

    pub fn page_count(&self) -> usize {
        self.inner.read().map(|g| g.page_count()).unwrap_or(1)
    }

    // -------------------------------------------------------------------------
    // Search
    // -------------------------------------------------------------------------

    pub fn search_input(&self) -> String {
        self.inner
            .read()
            .map(|g| g.search_input.clone())
            .unwrap_or_default()
    }

    /// Update the search box text and restart the debounce timer.
    pub fn set_search_input(&self, text: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.search_input = text.to_string();
            self.dirty.store(true, Ordering::SeqCst);
        }
        self.search.input(text);
    }

    /// Whether a debounced search is waiting to fire.
    pub fn search_pending(&self) -> bool {
        self.search.is_pending()
    }

    /// Drop any pending search without firing it.
    pub fn cancel_search(&self) {
        self.search.cancel();
    }
}

impl<T: Clone + 'static> PagedTable for ServerPagedTable<T> {
    fn id(&self) -> TableId {
        self.id
    }

    fn column_ids(&self) -> Vec<String> {
        self.inner
            .read()
            .map(|g| g.columns.iter().map(|c| c.id.clone()).collect())
            .unwrap_or_default()
    }

    fn toggle_sort(&self, column_id: &str) -> Option<SortState> {
        let (sorting, callback) = {
            let guard = self.inner.read().ok()?;
            if !guard
                .columns
                .iter()
                .any(|c| c.id == column_id && c.is_sortable())
            {
                return None;
            }
            (guard.sorting.toggled(column_id), guard.on_sort.clone())
        };
        debug!("{}: sort {:?}", self.id, sorting);
        if let Some(callback) = callback {
            callback(sorting.clone());
        }
        Some(sorting)
    }

    fn next_page(&self) -> bool {
        let next = self
            .inner
            .read()
            .ok()
            .and_then(|g| g.pagination.next(g.page_count()));
        match next {
            Some(next) => {
                self.request_pagination(next);
                true
            }
            None => false,
        }
    }

    fn previous_page(&self) -> bool {
        let previous = self
            .inner
            .read()
            .ok()
            .and_then(|g| g.pagination.previous());
        match previous {
            Some(previous) => {
                self.request_pagination(previous);
                true
            }
            None => false,
        }
    }

    fn page_input(&self) -> String {
        self.inner
            .read()
            .map(|g| g.navigator.input().to_string())
            .unwrap_or_default()
    }

    fn set_page_input(&self, text: &str) {
        if let Ok(mut guard) = self.inner.write() {
            guard.navigator.set_input(text);
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    fn commit_page_input(&self) -> Option<usize> {
        let (committed, pagination) = {
            let mut guard = self.inner.write().ok()?;
            let pagination = guard.pagination;
            let page_count = guard.page_count();
            let committed = guard.navigator.commit(pagination.page_index, page_count);
            self.dirty.store(true, Ordering::SeqCst);
            (committed, pagination)
        };
        if let Some(index) = committed {
            self.request_pagination(pagination.with_page_index(index));
        }
        committed
    }

    fn search(&self, text: &str) -> bool {
        self.set_search_input(text);
        true
    }

    fn view(&self) -> TableView {
        let Ok(guard) = self.inner.read() else {
            let no_rows: [&T; 0] = [];
            return TableView::build(&[], &SortState::none(), no_rows, Footer::default());
        };
        TableView::build(&guard.columns, &guard.sorting, &guard.rows, guard.footer())
    }

    fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for ServerPagedTable<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            search: Arc::clone(&self.search),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<T> std::fmt::Debug for ServerPagedTable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerPagedTable")
            .field("id", &self.id)
            .field("search", &self.search)
            .finish()
    }
}
