//! Row selection shared between a table's action cells and its consumers.
//!
//! The actions column writes; dialogs and pages read. Keeping the two sides
//! on one small store replaces ad hoc global state.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::column::Column;

/// What the selected row was picked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MutationMode {
    Update,
    Delete,
}

/// Point-in-time copy of a [`SelectionStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionSnapshot<Id> {
    pub selected_id: Option<Id>,
    pub mutation_mode: Option<MutationMode>,
}

impl<Id> Default for SelectionSnapshot<Id> {
    fn default() -> Self {
        Self {
            selected_id: None,
            mutation_mode: None,
        }
    }
}

impl<Id> SelectionSnapshot<Id> {
    pub fn is_empty(&self) -> bool {
        self.selected_id.is_none()
    }
}

/// Single-writer selection cell with any number of readers.
///
/// Clones share state.
pub struct SelectionStore<Id> {
    inner: Arc<RwLock<SelectionSnapshot<Id>>>,
    dirty: Arc<AtomicBool>,
}

impl<Id: Clone + std::fmt::Debug> SelectionStore<Id> {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(SelectionSnapshot::default())),
            dirty: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn snapshot(&self) -> SelectionSnapshot<Id> {
        self.inner.read().map(|g| g.clone()).unwrap_or_default()
    }

    pub fn selected_id(&self) -> Option<Id> {
        self.inner.read().ok().and_then(|g| g.selected_id.clone())
    }

    pub fn mutation_mode(&self) -> Option<MutationMode> {
        self.inner.read().ok().and_then(|g| g.mutation_mode)
    }

    pub fn select_for_update(&self, id: Id) {
        self.set(Some(id), Some(MutationMode::Update));
    }

    pub fn select_for_delete(&self, id: Id) {
        self.set(Some(id), Some(MutationMode::Delete));
    }

    pub fn clear(&self) {
        self.set(None, None);
    }

    fn set(&self, selected_id: Option<Id>, mutation_mode: Option<MutationMode>) {
        if let Ok(mut guard) = self.inner.write() {
            debug!("selection: {:?} {:?}", selected_id, mutation_mode);
            guard.selected_id = selected_id;
            guard.mutation_mode = mutation_mode;
            self.dirty.store(true, Ordering::SeqCst);
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty.load(Ordering::SeqCst)
    }

    pub fn clear_dirty(&self) {
        self.dirty.store(false, Ordering::SeqCst);
    }
}

impl<Id: Clone + std::fmt::Debug> Default for SelectionStore<Id> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id> Clone for SelectionStore<Id> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            dirty: Arc::clone(&self.dirty),
        }
    }
}

impl<Id: std::fmt::Debug> std::fmt::Debug for SelectionStore<Id> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.inner.read() {
            Ok(guard) => f.debug_tuple("SelectionStore").field(&*guard).finish(),
            Err(_) => f.write_str("SelectionStore(<poisoned>)"),
        }
    }
}

/// Label shown in an actions cell.
pub const ACTIONS_TEXT: &str = "[Düzenle] [Sil]";

/// Edit/delete actions for one row type.
pub struct RowActions<T, Id> {
    store: SelectionStore<Id>,
    id_of: Arc<dyn Fn(&T) -> Id + Send + Sync>,
}

impl<T: 'static, Id: Clone + std::fmt::Debug + 'static> RowActions<T, Id> {
    pub fn new<F>(store: SelectionStore<Id>, id_of: F) -> Self
    where
        F: Fn(&T) -> Id + Send + Sync + 'static,
    {
        Self {
            store,
            id_of: Arc::new(id_of),
        }
    }

    pub fn store(&self) -> &SelectionStore<Id> {
        &self.store
    }

    /// Select `row` for editing.
    pub fn edit(&self, row: &T) {
        self.store.select_for_update((self.id_of)(row));
    }

    /// Select `row` for deletion.
    pub fn delete(&self, row: &T) {
        self.store.select_for_delete((self.id_of)(row));
    }

    /// A static actions column.
    pub fn column(&self, header: impl Into<String>) -> Column<T> {
        Column::display("actions", header, 16, |_: &T| ACTIONS_TEXT.to_string())
    }
}

impl<T, Id> Clone for RowActions<T, Id> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            id_of: Arc::clone(&self.id_of),
        }
    }
}
