pub mod google_sheets;
#[cfg(test)]
pub mod memory;

use crate::domain::error::Result;
use crate::domain::sheet_range::SheetRange;
use async_trait::async_trait;

pub use google_sheets::GoogleSheetsStore;

/// Remote spreadsheet store addressed by spreadsheet id and A1 range.
#[async_trait]
pub trait TableStore {
    /// Raw value grid for `range`; an empty grid when the range holds no data.
    async fn get_values(&self, spreadsheet_id: &str, range: &SheetRange) -> Result<Vec<Vec<String>>>;
    async fn clear_range(&self, spreadsheet_id: &str, range: &SheetRange) -> Result<()>;
    /// Write `values` starting at the top-left cell of `range`, uninterpreted.
    async fn put_values(
        &self,
        spreadsheet_id: &str,
        range: &SheetRange,
        values: Vec<Vec<String>>,
    ) -> Result<()>;
}
