// ============================================================
// CSV WRITER
// ============================================================
// Serialize a Table to delimited text: header first, one row per line

use csv::{QuoteStyle, Terminator, WriterBuilder};
use crate::domain::error::{AppError, Result};
use crate::domain::table::Table;

/// CSV writer with minimal quoting (only fields that need it)
pub struct CsvWriter {
    /// Delimiter character (default: comma)
    delimiter: u8,
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self { delimiter: b',' }
    }
}

impl CsvWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn write_table(&self, table: &Table) -> Result<Vec<u8>> {
        let mut writer = WriterBuilder::new()
            .delimiter(self.delimiter)
            .quote_style(QuoteStyle::Necessary)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer
            .write_record(table.header())
            .map_err(|e| AppError::Internal(format!("Failed to write CSV header: {}", e)))?;

        for (index, row) in table.rows().iter().enumerate() {
            writer.write_record(row).map_err(|e| {
                AppError::Internal(format!("Failed to write CSV row {}: {}", index + 1, e))
            })?;
        }

        writer
            .into_inner()
            .map_err(|e| AppError::Internal(format!("Failed to flush CSV output: {}", e)))
    }
}
