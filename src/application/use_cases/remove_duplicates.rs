use std::sync::Arc;

use tracing::{info, Instrument};
use uuid::Uuid;

use crate::application::use_cases::deduplicate::deduplicate;
use crate::application::use_cases::table_io::{load_table, write_table};
use crate::domain::cleanup::CleanupReport;
use crate::domain::error::Result;
use crate::domain::sheet_range::{SheetLayout, SheetRange};
use crate::infrastructure::table_store::TableStore;

/// Cleanup operation: load the data sheet, deduplicate it, write the kept
/// rows back and the removed rows to the log sheet.
pub struct RemoveDuplicatesUseCase {
    store: Arc<dyn TableStore + Send + Sync>,
    layout: SheetLayout,
}

impl RemoveDuplicatesUseCase {
    pub fn new(store: Arc<dyn TableStore + Send + Sync>, layout: SheetLayout) -> Self {
        Self { store, layout }
    }

    pub async fn execute(&self, spreadsheet_id: &str) -> Result<CleanupReport> {
        let span = tracing::info_span!(
            "remove_duplicates",
            operation_id = %Uuid::new_v4(),
            spreadsheet_id = %spreadsheet_id
        );
        self.run(spreadsheet_id).instrument(span).await
    }

    async fn run(&self, spreadsheet_id: &str) -> Result<CleanupReport> {
        let store = self.store.as_ref();
        let data_range = SheetRange::full_width(&self.layout.data_sheet)?;

        let table = load_table(store, spreadsheet_id, &data_range).await?;
        info!(initial_row_count = table.len(), "Loaded data sheet");

        let outcome = deduplicate(&table, &self.layout.group_column)?;
        info!(final_row_count = outcome.final_count, "Rows after removing duplicates");

        write_table(store, spreadsheet_id, &self.layout.data_sheet, &outcome.kept).await?;

        if !outcome.deleted.is_empty() {
            write_table(store, spreadsheet_id, &self.layout.log_sheet, &outcome.deleted).await?;
            info!(deleted = outcome.deleted.len(), "Updated duplicate log");
        }

        Ok(CleanupReport::from(&outcome))
    }
}
