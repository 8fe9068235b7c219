//! Column definitions for paged tables.

use std::fmt;
use std::sync::Arc;

use serde::Serialize;

use crate::value::CellValue;

/// Pure row → value accessor used for display and sorting.
pub type Accessor<T> = Arc<dyn Fn(&T) -> CellValue + Send + Sync>;

/// Custom cell renderer.
pub type Renderer<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// Horizontal alignment for column content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// How a column produces its cell and whether it can be sorted.
pub enum ColumnKind<T> {
    /// Sortable; the accessor value is displayed as-is.
    Plain(Accessor<T>),
    /// Sortable by `value`, displayed through `render`.
    Custom {
        value: Accessor<T>,
        render: Renderer<T>,
    },
    /// Display only. The header has no sort toggle.
    Unsorted(Renderer<T>),
}

impl<T> Clone for ColumnKind<T> {
    fn clone(&self) -> Self {
        match self {
            Self::Plain(value) => Self::Plain(Arc::clone(value)),
            Self::Custom { value, render } => Self::Custom {
                value: Arc::clone(value),
                render: Arc::clone(render),
            },
            Self::Unsorted(render) => Self::Unsorted(Arc::clone(render)),
        }
    }
}

/// Column configuration.
///
/// Columns are built once per table and never change afterwards.
///
/// # Examples
///
/// ```
/// use pagetable::{CellValue, Column};
///
/// struct Firm {
///     id: i64,
///     name: String,
/// }
///
/// let columns: Vec<Column<Firm>> = vec![
///     Column::new("id", "#", 6, |f: &Firm| CellValue::Integer(f.id)),
///     Column::new("name", "Firma Adı", 30, |f: &Firm| f.name.as_str().into()),
///     Column::display("actions", "", 16, |_: &Firm| "[Sil]".to_string()),
/// ];
/// assert!(columns[1].is_sortable());
/// assert!(!columns[2].is_sortable());
/// ```
pub struct Column<T> {
    /// Stable identifier, reported in sort state.
    pub id: String,
    /// Header label.
    pub header: String,
    /// Width in terminal columns.
    pub width: u16,
    /// Horizontal alignment
    pub align: Alignment,
    kind: ColumnKind<T>,
}

impl<T: 'static> Column<T> {
    /// Create a sortable column from an accessor.
    pub fn new<F>(id: impl Into<String>, header: impl Into<String>, width: u16, accessor: F) -> Self
    where
        F: Fn(&T) -> CellValue + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: header.into(),
            width,
            align: Alignment::Left,
            kind: ColumnKind::Plain(Arc::new(accessor)),
        }
    }

    /// Create a display-only column with a custom renderer.
    pub fn display<F>(
        id: impl Into<String>,
        header: impl Into<String>,
        width: u16,
        render: F,
    ) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        Self {
            id: id.into(),
            header: header.into(),
            width,
            align: Alignment::Left,
            kind: ColumnKind::Unsorted(Arc::new(render)),
        }
    }

    /// Replace how cells are displayed. Sorting still uses the accessor.
    pub fn render<F>(mut self, render: F) -> Self
    where
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        let render: Renderer<T> = Arc::new(render);
        self.kind = match self.kind {
            ColumnKind::Plain(value) | ColumnKind::Custom { value, .. } => {
                ColumnKind::Custom { value, render }
            }
            ColumnKind::Unsorted(_) => ColumnKind::Unsorted(render),
        };
        self
    }

    /// Disable sorting for this column.
    pub fn unsortable(mut self) -> Self {
        self.kind = match self.kind {
            ColumnKind::Plain(value) => {
                ColumnKind::Unsorted(Arc::new(move |row: &T| value(row).to_string()))
            }
            ColumnKind::Custom { render, .. } => ColumnKind::Unsorted(render),
            unsorted @ ColumnKind::Unsorted(_) => unsorted,
        };
        self
    }

    /// Set the column alignment.
    pub fn align(mut self, align: Alignment) -> Self {
        self.align = align;
        self
    }

    pub fn kind(&self) -> &ColumnKind<T> {
        &self.kind
    }

    /// Whether clicking the header toggles sorting.
    pub fn is_sortable(&self) -> bool {
        !matches!(self.kind, ColumnKind::Unsorted(_))
    }

    /// Value used by the comparator, `None` for display-only columns.
    pub fn sort_value(&self, row: &T) -> Option<CellValue> {
        match &self.kind {
            ColumnKind::Plain(value) | ColumnKind::Custom { value, .. } => Some(value(row)),
            ColumnKind::Unsorted(_) => None,
        }
    }

    /// Display text for a cell.
    pub fn render_cell(&self, row: &T) -> String {
        match &self.kind {
            ColumnKind::Plain(value) => value(row).to_string(),
            ColumnKind::Custom { render, .. } | ColumnKind::Unsorted(render) => render(row),
        }
    }
}

impl<T: Serialize + 'static> Column<T> {
    /// Create a sortable column that reads a field of the serialized row.
    ///
    /// The id doubles as a dot-separated path into the serialized form,
    /// e.g. `"diaServerCode"` or `"owner.name"`. Missing fields read as
    /// [`CellValue::Empty`].
    pub fn field(id: impl Into<String>, header: impl Into<String>, width: u16) -> Self {
        let id = id.into();
        let path: Vec<String> = id.split('.').map(str::to_string).collect();
        Self::new(id, header, width, move |row: &T| field_value(row, &path))
    }
}

fn field_value<T: Serialize>(row: &T, path: &[String]) -> CellValue {
    use serde_json::Value;

    let Ok(mut value) = serde_json::to_value(row) else {
        return CellValue::Empty;
    };
    for key in path {
        value = match value {
            Value::Object(mut map) => map.remove(key).unwrap_or(Value::Null),
            Value::Array(mut items) => match key.parse::<usize>() {
                Ok(index) if index < items.len() => items.swap_remove(index),
                _ => Value::Null,
            },
            _ => Value::Null,
        };
    }
    CellValue::from_json(&value)
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            width: self.width,
            align: self.align,
            kind: self.kind.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ColumnKind::Plain(_) => "plain",
            ColumnKind::Custom { .. } => "custom",
            ColumnKind::Unsorted(_) => "unsorted",
        };
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("width", &self.width)
            .field("align", &self.align)
            .field("kind", &kind)
            .finish()
    }
}
