// ============================================================
// TABLE LOADER / WRITER
// ============================================================
// Whole-sheet reads and clear-then-put overwrites

use tracing::{info, warn};

use crate::domain::error::{AppError, Result};
use crate::domain::sheet_range::SheetRange;
use crate::domain::table::Table;
use crate::infrastructure::table_store::TableStore;

pub const NO_DATA_MESSAGE: &str = "No data found.";

/// Load the full table at `range`. An empty range is `NotFound`.
pub async fn load_table(
    store: &(dyn TableStore + Send + Sync),
    spreadsheet_id: &str,
    range: &SheetRange,
) -> Result<Table> {
    let values = store.get_values(spreadsheet_id, range).await?;

    match Table::from_values(values) {
        Some(table) => table,
        None => {
            warn!(range = %range, "No data found in the spreadsheet");
            Err(AppError::NotFound(NO_DATA_MESSAGE.to_string()))
        }
    }
}

/// Overwrite `sheet` with `table`: clear the full-width range, then write
/// header and rows from the top-left cell. A failed put after a successful
/// clear leaves the sheet empty.
pub async fn write_table(
    store: &(dyn TableStore + Send + Sync),
    spreadsheet_id: &str,
    sheet: &str,
    table: &Table,
) -> Result<()> {
    let full_range = SheetRange::full_width(sheet)?;
    let anchor = SheetRange::anchor(sheet)?;

    store.clear_range(spreadsheet_id, &full_range).await?;
    store
        .put_values(spreadsheet_id, &anchor, table.to_values())
        .await?;

    info!(sheet = %sheet, rows = table.len(), "Sheet overwritten");
    Ok(())
}
