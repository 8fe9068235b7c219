//! Single-column sort state.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::column::Column;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    /// Wire name (`asc` / `desc`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

/// The one active sort entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SortEntry {
    pub column_id: String,
    pub direction: SortDirection,
}

/// Sort state holding at most one active column.
///
/// An empty state means the source's default order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct SortState {
    entry: Option<SortEntry>,
}

impl SortState {
    /// No sort applied.
    pub fn none() -> Self {
        Self::default()
    }

    /// Sort ascending by a column.
    pub fn ascending(column_id: impl Into<String>) -> Self {
        Self::with(column_id, SortDirection::Ascending)
    }

    /// Sort descending by a column.
    pub fn descending(column_id: impl Into<String>) -> Self {
        Self::with(column_id, SortDirection::Descending)
    }

    fn with(column_id: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            entry: Some(SortEntry {
                column_id: column_id.into(),
                direction,
            }),
        }
    }

    pub fn entry(&self) -> Option<&SortEntry> {
        self.entry.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.entry.is_none()
    }

    /// Id of the sorted column, if any.
    pub fn column_id(&self) -> Option<&str> {
        self.entry.as_ref().map(|e| e.column_id.as_str())
    }

    /// Direction applied to `column_id`, `None` when that column is not sorted.
    pub fn direction_of(&self, column_id: &str) -> Option<SortDirection> {
        self.entry
            .as_ref()
            .filter(|e| e.column_id == column_id)
            .map(|e| e.direction)
    }

    /// State after activating the header of `column_id`.
    ///
    /// Cycles none → ascending → descending → none for that column. Any
    /// other column's sort is dropped.
    pub fn toggled(&self, column_id: &str) -> Self {
        match self.direction_of(column_id) {
            None => Self::ascending(column_id),
            Some(SortDirection::Ascending) => Self::descending(column_id),
            Some(SortDirection::Descending) => Self::none(),
        }
    }

    /// Sorted column id, or `default` when nothing is sorted.
    pub fn sort_by_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.column_id().unwrap_or(default)
    }

    /// Active direction, ascending when nothing is sorted.
    pub fn sort_order(&self) -> SortDirection {
        self.entry
            .as_ref()
            .map(|e| e.direction)
            .unwrap_or(SortDirection::Ascending)
    }
}

/// Stable sort of row indices by a column.
///
/// Equal keys keep their source order in both directions.
pub fn sort_indices<T: 'static>(
    rows: &[T],
    column: &Column<T>,
    direction: SortDirection,
) -> Vec<usize> {
    let keys: Vec<_> = rows.iter().map(|row| column.sort_value(row)).collect();
    let mut order: Vec<usize> = (0..rows.len()).collect();
    order.sort_by(|&a, &b| {
        let ordering = match (&keys[a], &keys[b]) {
            (Some(x), Some(y)) => x.compare(y),
            _ => Ordering::Equal,
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
    order
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::CellValue;

    #[test]
    fn test_cycle() {
        let s0 = SortState::none();
        let s1 = s0.toggled("price");
        let s2 = s1.toggled("price");
        let s3 = s2.toggled("price");
        assert_eq!(s1, SortState::ascending("price"));
        assert_eq!(s2, SortState::descending("price"));
        assert_eq!(s3, SortState::none());
    }

    #[test]
    fn test_other_column_replaces() {
        let s = SortState::descending("price").toggled("name");
        assert_eq!(s, SortState::ascending("name"));
        assert_eq!(s.direction_of("price"), None);
    }

    #[test]
    fn test_defaults() {
        let s = SortState::none();
        assert_eq!(s.sort_by_or("name"), "name");
        assert_eq!(s.sort_order(), SortDirection::Ascending);
        let s = SortState::descending("price");
        assert_eq!(s.sort_by_or("name"), "price");
        assert_eq!(s.sort_order().as_str(), "desc");
    }

    #[test]
    fn test_stable_in_both_directions() {
        let rows = vec![(1, 'a'), (0, 'b'), (1, 'c'), (0, 'd')];
        let col = Column::new("k", "K", 4, |r: &(i64, char)| CellValue::Integer(r.0));
        assert_eq!(sort_indices(&rows, &col, SortDirection::Ascending), vec![1, 3, 0, 2]);
        assert_eq!(sort_indices(&rows, &col, SortDirection::Descending), vec![0, 2, 1, 3]);
    }
}
