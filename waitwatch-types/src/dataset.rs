//! Dataset - every row collected during a run.

use crate::{Row, HEADERS};

/// Insertion-ordered collection of rows.
///
/// Rows from each new snapshot go after everything already collected.
/// Nothing is deduplicated or merged across snapshots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    rows: Vec<Row>,
}

impl Dataset {
    /// Create an empty dataset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows after all existing rows. Returns how many were added.
    pub fn append(&mut self, rows: impl IntoIterator<Item = Row>) -> usize {
        let before = self.rows.len();
        self.rows.extend(rows);
        self.rows.len() - before
    }

    /// Number of rows collected.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Check if no rows have been collected.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// All rows in collection order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// The first `n` rows (or all of them if there are fewer).
    pub fn head(&self, n: usize) -> &[Row] {
        &self.rows[..n.min(self.rows.len())]
    }

    /// Iterate over rows in collection order.
    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    /// Character width of the longest value in each column, header included.
    pub fn column_widths(&self) -> [usize; 3] {
        widths(HEADERS, self.rows.iter())
    }
}

/// Column widths over an arbitrary slice of rows, header included.
pub fn widths<'a>(headers: [&str; 3], rows: impl Iterator<Item = &'a Row>) -> [usize; 3] {
    let mut widths = headers.map(|h| h.chars().count());
    for row in rows {
        for (width, field) in widths.iter_mut().zip(row.fields()) {
            *width = (*width).max(field.chars().count());
        }
    }
    widths
}

impl<'a> IntoIterator for &'a Dataset {
    type Item = &'a Row;
    type IntoIter = std::slice::Iter<'a, Row>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
