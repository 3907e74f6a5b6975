use std::sync::{Arc, Mutex};

use crate::application::{DownloadCsvUseCase, RemoveDuplicatesUseCase};
use crate::domain::sheet_range::SheetLayout;
use crate::infrastructure::table_store::TableStore;
use crate::interfaces::http::{add_log, LogEntry};

pub struct AppState {
    pub remove_duplicates_use_case: RemoveDuplicatesUseCase,
    pub download_csv_use_case: DownloadCsvUseCase,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
    /// Oldest activity-log entries are dropped past this size.
    pub log_capacity: usize,
}

impl AppState {
    pub fn new(
        store: Arc<dyn TableStore + Send + Sync>,
        layout: SheetLayout,
        log_capacity: usize,
    ) -> Self {
        Self {
            remove_duplicates_use_case: RemoveDuplicatesUseCase::new(store.clone(), layout.clone()),
            download_csv_use_case: DownloadCsvUseCase::new(store, layout),
            logs: Arc::new(Mutex::new(Vec::new())),
            log_capacity,
        }
    }
}

impl AppState {
    /// Append to the operator activity log.
    pub fn log(&self, level: &str, source: &str, message: &str) {
        add_log(&self.logs, self.log_capacity, level, source, message);
    }
}
