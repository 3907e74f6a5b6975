// ============================================================
// TABLE
// ============================================================
// Rectangular in-memory view of a sheet: header row + data rows

use super::error::{AppError, Result};

/// A loaded sheet. Every data row has exactly `header.len()` cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Build a table from a raw value grid whose first row is the header.
    ///
    /// Returns `None` for an empty grid so the caller decides what "no data" means.
    pub fn from_values(mut values: Vec<Vec<String>>) -> Option<Result<Self>> {
        if values.is_empty() {
            return None;
        }
        let header = values.remove(0);
        Some(Self::new(header, values))
    }

    /// Build a table, right-padding short rows with empty cells.
    ///
    /// The store omits trailing empty cells, so short rows are expected. Rows
    /// wider than the header are rejected: their extra cells have no column
    /// and would be lost on write-back.
    pub fn new(header: Vec<String>, rows: Vec<Vec<String>>) -> Result<Self> {
        let width = header.len();
        let mut normalized = Vec::with_capacity(rows.len());

        for (idx, mut row) in rows.into_iter().enumerate() {
            if row.len() > width {
                return Err(AppError::ParseError(format!(
                    "Row {} has {} cells but the header has {} columns",
                    idx + 1,
                    row.len(),
                    width
                )));
            }
            row.resize(width, String::new());
            normalized.push(row);
        }

        Ok(Self {
            header,
            rows: normalized,
        })
    }

    /// Same header, different rows. Rows must already be normalized.
    pub(crate) fn with_rows(&self, rows: Vec<Vec<String>>) -> Self {
        debug_assert!(rows.iter().all(|row| row.len() == self.header.len()));
        Self {
            header: self.header.clone(),
            rows,
        }
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of data rows (header excluded).
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.header.iter().position(|column| column == name)
    }

    /// Remove a column by name. Returns false when the column is absent.
    pub fn drop_column(&mut self, name: &str) -> bool {
        let Some(idx) = self.column_index(name) else {
            return false;
        };
        self.header.remove(idx);
        for row in &mut self.rows {
            row.remove(idx);
        }
        true
    }

    pub fn push_row(&mut self, row: Vec<String>) -> Result<()> {
        if row.len() != self.header.len() {
            return Err(AppError::Internal(format!(
                "Row has {} cells but the header has {} columns",
                row.len(),
                self.header.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    /// Header followed by every data row, as written back to the store.
    pub fn to_values(&self) -> Vec<Vec<String>> {
        let mut values = Vec::with_capacity(self.rows.len() + 1);
        values.push(self.header.clone());
        values.extend(self.rows.iter().cloned());
        values
    }
}
