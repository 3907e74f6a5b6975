use std::sync::Arc;

use tracing::{info, Instrument};
use uuid::Uuid;

use crate::application::use_cases::export::build_export;
use crate::application::use_cases::table_io::load_table;
use crate::domain::cleanup::ExportMetadata;
use crate::domain::error::Result;
use crate::domain::sheet_range::{SheetLayout, SheetRange};
use crate::infrastructure::table_store::TableStore;

/// Export operation: load the data sheet and render it as CSV with the
/// metadata trailer row.
pub struct DownloadCsvUseCase {
    store: Arc<dyn TableStore + Send + Sync>,
    layout: SheetLayout,
}

impl DownloadCsvUseCase {
    pub fn new(store: Arc<dyn TableStore + Send + Sync>, layout: SheetLayout) -> Self {
        Self { store, layout }
    }

    pub fn file_name(&self) -> &str {
        &self.layout.export_file_name
    }

    pub async fn execute(&self, spreadsheet_id: &str, metadata: &ExportMetadata) -> Result<Vec<u8>> {
        let span = tracing::info_span!(
            "download_csv",
            operation_id = %Uuid::new_v4(),
            spreadsheet_id = %spreadsheet_id
        );

        async {
            let data_range = SheetRange::full_width(&self.layout.data_sheet)?;
            let table = load_table(self.store.as_ref(), spreadsheet_id, &data_range).await?;

            let bytes = build_export(&table, &self.layout, metadata)?;
            info!(bytes = bytes.len(), "CSV file created successfully");
            Ok(bytes)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::error::AppError;
    use crate::infrastructure::table_store::memory::InMemoryTableStore;

    #[tokio::test]
    async fn test_export_reads_data_sheet_only() {
        let store = Arc::new(InMemoryTableStore::new().with_sheet(
            "Sheet1",
            vec![
                vec!["Owner Name", "Territory", "Round Robin Name", "Custom Field", "X"],
                vec!["Ann", "West", "RR", "a", "1"],
            ],
        ));
        let use_case = DownloadCsvUseCase::new(store.clone(), SheetLayout::default());
        let metadata = ExportMetadata {
            territory: "East".to_string(),
            round_robin_name: "Alice".to_string(),
            custom_field: "VIP".to_string(),
        };

        let bytes = use_case.execute("sheet-1", &metadata).await.unwrap();

        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "Territory,Round Robin Name,Custom Field,X\nWest,RR,a,1\nEast,Alice,VIP,\n"
        );
        assert!(!store.has_writes());
        assert_eq!(use_case.file_name(), "cleaned_data.csv");
    }

    #[tokio::test]
    async fn test_export_empty_sheet_is_not_found() {
        let store = Arc::new(InMemoryTableStore::new());
        let use_case = DownloadCsvUseCase::new(store, SheetLayout::default());

        let err = use_case
            .execute("sheet-1", &ExportMetadata::default())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }
}
