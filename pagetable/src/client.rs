//! Fully client-side paged table.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::debug;

use crate::column::Column;
use crate::navigator::PageNavigator;
use crate::pagination::{DEFAULT_PAGE_SIZE, PaginationState, page_count};
use crate::render::{Footer, TableView};
use crate::sort::{SortState, sort_indices};
use crate::traits::{PagedTable, TableId};

/// Internal state for [`ClientPagedTable`].
#[derive(Debug)]
struct ClientInner<T> {
    columns: Vec<Column<T>>,
    /// The full row set in source order.
    rows: Vec<T>,
    /// Row indices in display order (after sorting).
    order: Vec<usize>,
    sort: SortState,
    pagination: PaginationState,
    navigator: PageNavigator,
}

impl<T: 'static> ClientInner<T> {
    fn page_count(&self) -> usize {
        page_count(self.rows.len(), self.pagination.page_size)
    }

    fn reorder(&mut self) {
        let column = self
            .sort
            .column_id()
            .and_then(|id| self.columns.iter().find(|c| c.id == id));
        self.order = match (column, self.sort.entry()) {
            (Some(column), Some(entry)) if column.is_sortable() => {
                sort_indices(&self.rows, column, entry.direction)
            }
            _ => (0..self.rows.len()).collect(),
        };
    }

    /// Keep `page_index` in range and the page box in step with it.
    fn settle(&mut self) {
        self.pagination = self.pagination.clamped(self.page_count());
        self.navigator.sync(self.pagination.page_index);
    }

    fn footer(&self) -> Footer {
        let page_count = self.page_count();
        Footer {
            page_input: self.navigator.input().to_string(),
            page_count,
            row_count: self.rows.len(),
            can_previous: self.pagination.can_previous(),
            can_next: self.pagination.can_next(page_count),
        }
    }
}

/// A sortable, paginated view over an in-memory row set.
///
/// Sorting and pagination are computed locally; nothing leaves the table.
/// Changing the sort jumps back to the first page. Replacing the rows keeps
/// the current page when it still exists.
///
/// The table is a cheap handle: clones share the same state.
///
/// # Example
///
/// ```
/// use pagetable::{CellValue, ClientPagedTable, Column, PagedTable};
///
/// let columns = vec![Column::new("n", "N", 6, |n: &i64| CellValue::Integer(*n))];
/// let table = ClientPagedTable::new(columns, (1..=25).collect());
/// assert_eq!(table.page_count(), 3);
///
/// table.toggle_sort("n");
/// table.set_page_input("4");
/// assert_eq!(table.commit_page_input(), Some(2));
/// assert_eq!(table.visible_rows(), vec![21, 22, 23, 24, 25]);
/// ```
#[derive(Debug)]
pub struct ClientPagedTable<T> {
    id: TableId,
    inner: Arc<RwLock<ClientInner<T>>>,
    dirty: Arc<AtomicBool>,
}

impl<T: Clone + 'static> ClientPagedTable<T> {
    /// Create a table with the default page size.
    pub fn new(columns: Vec<Column<T>>, rows: Vec<T>) -> Self {
        let order = (0..rows.len()).collect();
        Self {
            id: TableId::new(),
            inner: Arc::new(RwLock::new(ClientInner {
                columns,
                rows,
                order,
                sort: SortState::none(),
                pagination: PaginationState::new(DEFAULT_PAGE_SIZE),
                navigator: PageNavigator::new(0),
            })),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Set the page size at construction.
    pub fn with_page_size(self, page_size: usize) -> Self {
        self.set_page_size(page_size);
        self.clear_dirty();
        self
    }

    pub fn columns(&self) -> Vec<Column<T>> {
        self.inner
            .read()
            .map(|g| g.columns.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Rows
    // -------------------------------------------------------------------------

    /// Total number of rows (all pages).
    pub fn row_count(&self) -> usize {
        self.inner.read().map(|g| g.rows.len()).unwrap_or(0)
    }

    /// All rows in source order.
    pub fn rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| g.rows.clone())
            .unwrap_or_default()
    }

    /// Replace the row set. The sort is reapplied and the page re-clamped.
    pub fn set_rows(&self, rows: Vec<T>) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows = rows;
            guard.reorder();
            guard.settle();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Keep only rows matching `keep`.
    pub fn retain(&self, keep: impl Fn(&T) -> bool) {
        if let Ok(mut guard) = self.inner.write() {
            guard.rows.retain(|row| keep(row));
            guard.reorder();
            guard.settle();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Swap the first row matching `matches` for `row`, keeping the sort.
    /// Returns false when no row matched.
    pub fn replace_where(&self, matches: impl Fn(&T) -> bool, row: T) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let Some(slot) = guard.rows.iter_mut().find(|r| matches(r)) else {
            return false;
        };
        *slot = row;
        guard.reorder();
        guard.settle();
        self.dirty.store(true, Ordering::SeqCst);
        true
    }

    /// Rows on the current page, in display order.
    pub fn visible_rows(&self) -> Vec<T> {
        self.inner
            .read()
            .map(|g| {
                let range = g.pagination.row_range(g.order.len());
                g.order[range].iter().map(|&i| g.rows[i].clone()).collect()
            })
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Pagination
    // -------------------------------------------------------------------------

    pub fn pagination(&self) -> PaginationState {
        self.inner
            .read()
            .map(|g| g.pagination)
            .unwrap_or_default()
    }

    pub fn page_count(&self) -> usize {
        self.inner.read().map(|g| g.page_count()).unwrap_or(1)
    }

    pub fn set_page_size(&self, page_size: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.pagination.page_size = page_size.max(1);
            guard.settle();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    /// Go to a page, clamped into range.
    pub fn set_page_index(&self, page_index: usize) {
        if let Ok(mut guard) = self.inner.write() {
            guard.pagination.page_index = page_index;
            guard.settle();
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn can_previous(&self) -> bool {
        self.pagination().can_previous()
    }

    pub fn can_next(&self) -> bool {
        self.inner
            .read()
            .map(|g| g.pagination.can_next(g.page_count()))
            .unwrap_or(false)
    }

    // -------------------------------------------------------------------------
    // Sorting
    // -------------------------------------------------------------------------

    pub fn sort(&self) -> SortState {
        self.inner
            .read()
            .map(|g| g.sort.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Dirty tracking
    // -------------------------------------------------------------------------

    fn mark_dirty(&self) {
        self.dirty.store(true, Ordering::SeqCst);
    }
}

impl<T: Clone + 'static> PagedTable for ClientPagedTable<T> {
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
        let mut guard = self.inner.write().ok()?;
        if !guard
            .columns
            .iter()
            .any(|c| c.id == column_id && c.is_sortable())
        {
            return None;
        }
        let sort = guard.sort.toggled(column_id);
        debug!("{}: sort {:?}", self.id, sort);
        guard.sort = sort.clone();
        guard.reorder();
        guard.pagination.page_index = 0;
        guard.settle();
        self.mark_dirty();
        Some(sort)
    }

    fn next_page(&self) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let Some(next) = guard.pagination.next(guard.page_count()) else {
            return false;
        };
        guard.pagination = next;
        guard.settle();
        self.mark_dirty();
        true
    }

    fn previous_page(&self) -> bool {
        let Ok(mut guard) = self.inner.write() else {
            return false;
        };
        let Some(previous) = guard.pagination.previous() else {
            return false;
        };
        guard.pagination = previous;
        guard.settle();
        self.mark_dirty();
        true
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
            self.mark_dirty();
        }
    }

    fn commit_page_input(&self) -> Option<usize> {
        let mut guard = self.inner.write().ok()?;
        let page_index = guard.pagination.page_index;
        let page_count = guard.page_count();
        let committed = guard.navigator.commit(page_index, page_count);
        if let Some(index) = committed {
            guard.pagination.page_index = index;
            guard.settle();
        }
        self.mark_dirty();
        committed
    }

    fn view(&self) -> TableView {
        let Ok(guard) = self.inner.read() else {
            let no_rows: [&T; 0] = [];
            return TableView::build(&[], &SortState::none(), no_rows, Footer::default());
        };
        let range = guard.pagination.row_range(guard.order.len());
        let rows = guard.order[range].iter().map(|&i| &guard.rows[i]);
        TableView::build(&guard.columns, &guard.sort, rows, guard.footer())
    }

    fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<T> Clone for ClientPagedTable<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}
