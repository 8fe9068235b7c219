//! Headless paged table engine.
//!
//! Two table flavours share one set of building blocks:
//!
//! - [`ClientPagedTable`] owns the full row set and computes sorting and
//!   pagination itself.
//! - [`ServerPagedTable`] only displays the current page. Sort, page and
//!   search changes are reported upward through callbacks and the caller
//!   pushes the next page back in.
//!
//! Both expose a [`PageNavigator`] jump box and render into a
//! [`TableView`] that front ends can draw however they like.

pub mod client;
pub mod column;
pub mod debounce;
pub mod navigator;
pub mod pagination;
pub mod render;
pub mod selection;
pub mod server;
pub mod sort;
pub mod source;
pub mod traits;
pub mod value;

pub use client::ClientPagedTable;
pub use column::{Alignment, Column, ColumnKind};
pub use debounce::{DebounceMachine, SEARCH_DEBOUNCE, SearchDebouncer, normalize_query};
pub use navigator::PageNavigator;
pub use pagination::{DEFAULT_PAGE_SIZE, PaginationState, page_count};
pub use render::{EMPTY_TEXT, Footer, HeaderCell, SortIndicator, TableBody, TableView};
pub use selection::{MutationMode, RowActions, SelectionSnapshot, SelectionStore};
pub use server::ServerPagedTable;
pub use sort::{SortDirection, SortEntry, SortState};
pub use source::{PageData, PageRequest, PageSource};
pub use traits::{PagedTable, TableAction, TableId};
pub use value::CellValue;
