//! Behaviour shared by client and server tables.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::render::TableView;
use crate::sort::SortState;

/// Unique identifier for a table instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TableId(usize);

impl TableId {
    pub(crate) fn new() -> Self {
        static COUNTER: AtomicUsize = AtomicUsize::new(0);
        Self(COUNTER.fetch_add(1, Ordering::SeqCst))
    }
}

impl std::fmt::Display for TableId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "__table_{}", self.0)
    }
}

/// A discrete user interaction with a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableAction {
    /// Header activation on a column.
    ToggleSort(String),
    NextPage,
    PreviousPage,
    /// Page box edit (not yet applied).
    EditPageInput(String),
    /// Page box blur or confirm key.
    CommitPageInput,
    /// Search box edit.
    Search(String),
}

/// Common surface of [`ClientPagedTable`](crate::ClientPagedTable) and
/// [`ServerPagedTable`](crate::ServerPagedTable).
pub trait PagedTable {
    fn id(&self) -> TableId;

    /// Ids of all columns, in display order.
    fn column_ids(&self) -> Vec<String>;

    /// Activate a column header. Returns the resulting sort state, or
    /// `None` when the column is unknown or not sortable.
    fn toggle_sort(&self, column_id: &str) -> Option<SortState>;

    /// Returns `true` if a page change happened (or was requested).
    fn next_page(&self) -> bool;

    fn previous_page(&self) -> bool;

    fn page_input(&self) -> String;

    fn set_page_input(&self, text: &str);

    /// Apply the page box. Returns the new page index when the text was valid.
    fn commit_page_input(&self) -> Option<usize>;

    /// Feed the search box. Tables without search ignore it.
    fn search(&self, _text: &str) -> bool {
        false
    }

    fn view(&self) -> TableView;

    fn is_dirty(&self) -> bool;

    fn clear_dirty(&self);

    /// Route an action to the matching operation.
    ///
    /// Returns `true` if the action changed (or requested a change of)
    /// table state.
    fn dispatch(&self, action: TableAction) -> bool {
        match action {
            TableAction::ToggleSort(column_id) => self.toggle_sort(&column_id).is_some(),
            TableAction::NextPage => self.next_page(),
            TableAction::PreviousPage => self.previous_page(),
            TableAction::EditPageInput(text) => {
                self.set_page_input(&text);
                true
            }
            TableAction::CommitPageInput => self.commit_page_input().is_some(),
            TableAction::Search(text) => self.search(&text),
        }
    }
}
