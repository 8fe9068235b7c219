//! Front-end neutral table view.
//!
//! Tables produce a [`TableView`] snapshot; front ends draw it. The
//! [`TableView::lines`] helper lays it out as fixed-width text.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::column::{Alignment, Column};
use crate::sort::{SortDirection, SortState};

/// Placeholder shown when the current page has no rows.
pub const EMPTY_TEXT: &str = "bulunamadı.";

/// Label of the previous-page button.
pub const PREVIOUS_LABEL: &str = "← Önceki";

/// Label of the next-page button.
pub const NEXT_LABEL: &str = "Sonraki →";

/// Sort affordance shown next to a header label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortIndicator {
    /// Static header, no toggle.
    Unsortable,
    /// Sortable, currently not sorted.
    Unsorted,
    Ascending,
    Descending,
}

impl SortIndicator {
    fn for_column<T: 'static>(column: &Column<T>, sort: &SortState) -> Self {
        if !column.is_sortable() {
            return Self::Unsortable;
        }
        match sort.direction_of(&column.id) {
            None => Self::Unsorted,
            Some(SortDirection::Ascending) => Self::Ascending,
            Some(SortDirection::Descending) => Self::Descending,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Unsortable => "",
            Self::Unsorted => "↕",
            Self::Ascending => "↑",
            Self::Descending => "↓",
        }
    }
}

/// One header cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderCell {
    pub id: String,
    pub label: String,
    pub width: u16,
    pub align: Alignment,
    pub indicator: SortIndicator,
}

impl HeaderCell {
    /// Label with its sort indicator.
    pub fn text(&self) -> String {
        match self.indicator {
            SortIndicator::Unsortable => self.label.clone(),
            indicator => format!("{} {}", self.label, indicator.symbol()),
        }
    }
}

/// Table body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableBody {
    /// Rendered cells, one inner vec per row.
    Rows(Vec<Vec<String>>),
    /// Single placeholder row spanning `colspan` columns.
    Empty { text: &'static str, colspan: usize },
}

/// Pagination bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Footer {
    /// Page jump box text.
    pub page_input: String,
    pub page_count: usize,
    /// Total rows across all pages.
    pub row_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
}

impl Default for Footer {
    fn default() -> Self {
        Self {
            page_input: "1".to_string(),
            page_count: 1,
            row_count: 0,
            can_previous: false,
            can_next: false,
        }
    }
}

impl Footer {
    pub fn summary(&self) -> String {
        format!(
            "Sayfa: {} / {} · Toplam: {}",
            self.page_input, self.page_count, self.row_count
        )
    }
}

/// Snapshot of everything a table shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: Vec<HeaderCell>,
    pub body: TableBody,
    pub footer: Footer,
}

impl TableView {
    pub(crate) fn build<'a, T: 'static>(
        columns: &[Column<T>],
        sort: &SortState,
        rows: impl IntoIterator<Item = &'a T>,
        footer: Footer,
    ) -> Self {
        let header = columns
            .iter()
            .map(|column| HeaderCell {
                id: column.id.clone(),
                label: column.header.clone(),
                width: column.width,
                align: column.align,
                indicator: SortIndicator::for_column(column, sort),
            })
            .collect();

        let cells: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| columns.iter().map(|c| c.render_cell(row)).collect())
            .collect();

        let body = if cells.is_empty() {
            TableBody::Empty {
                text: EMPTY_TEXT,
                colspan: columns.len(),
            }
        } else {
            TableBody::Rows(cells)
        };

        Self {
            header,
            body,
            footer,
        }
    }

    /// Whether the placeholder row is shown.
    pub fn is_empty(&self) -> bool {
        matches!(self.body, TableBody::Empty { .. })
    }

    /// Number of data rows.
    pub fn row_len(&self) -> usize {
        match &self.body {
            TableBody::Rows(rows) => rows.len(),
            TableBody::Empty { .. } => 0,
        }
    }

    /// Total width of all columns plus separators.
    pub fn width(&self) -> usize {
        let columns: usize = self.header.iter().map(|h| h.width as usize).sum();
        columns + self.header.len().saturating_sub(1)
    }

    /// Lay the view out as text.
    ///
    /// Line 0 is the header, line 1 a rule, then one line per data row (or
    /// the placeholder), another rule and the pagination bar.
    pub fn lines(&self) -> Vec<String> {
        let width = self.width();
        let rule = "─".repeat(width);
        let mut lines = Vec::new();

        let header: Vec<String> = self
            .header
            .iter()
            .map(|h| fit(&h.text(), h.width as usize, h.align))
            .collect();
        lines.push(header.join(" "));
        lines.push(rule.clone());

        match &self.body {
            TableBody::Rows(rows) => {
                for row in rows {
                    let cells: Vec<String> = row
                        .iter()
                        .zip(&self.header)
                        .map(|(cell, h)| fit(cell, h.width as usize, h.align))
                        .collect();
                    lines.push(cells.join(" "));
                }
            }
            TableBody::Empty { text, .. } => {
                lines.push(fit(text, width, Alignment::Center));
            }
        }

        lines.push(rule);
        lines.push(format!(
            "{}   {}   {}",
            self.footer.summary(),
            PREVIOUS_LABEL,
            NEXT_LABEL
        ));
        lines
    }
}

/// Pad or truncate `text` to exactly `width` display columns.
pub fn fit(text: &str, width: usize, align: Alignment) -> String {
    let text = truncate(text, width);
    let pad = width.saturating_sub(text.width());
    match align {
        Alignment::Left => format!("{}{}", text, " ".repeat(pad)),
        Alignment::Right => format!("{}{}", " ".repeat(pad), text),
        Alignment::Center => {
            let left = pad / 2;
            format!("{}{}{}", " ".repeat(left), text, " ".repeat(pad - left))
        }
    }
}

fn truncate(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
