use super::TableStore;
use crate::domain::error::{AppError, Result};
use crate::domain::sheet_range::SheetRange;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// One call made against the store, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Get(String),
    Clear(String),
    Put(String, Vec<Vec<String>>),
}

/// Sheet-level in-memory store that records every call.
///
/// Sheets are whole value grids keyed by sheet name; ranges only select the
/// sheet. Failures can be injected per operation kind.
#[derive(Default)]
pub struct InMemoryTableStore {
    sheets: Mutex<HashMap<String, Vec<Vec<String>>>>,
    calls: Mutex<Vec<StoreCall>>,
    fail_get: Option<u16>,
    fail_clear: Option<u16>,
    fail_put: Option<u16>,
}

impl InMemoryTableStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sheet(self, sheet: &str, values: Vec<Vec<&str>>) -> Self {
        let values = values
            .into_iter()
            .map(|row| row.into_iter().map(str::to_string).collect())
            .collect();
        self.sheets.lock().unwrap().insert(sheet.to_string(), values);
        self
    }

    pub fn failing_get(mut self, status: u16) -> Self {
        self.fail_get = Some(status);
        self
    }

    pub fn failing_clear(mut self, status: u16) -> Self {
        self.fail_clear = Some(status);
        self
    }

    pub fn failing_put(mut self, status: u16) -> Self {
        self.fail_put = Some(status);
        self
    }

    pub fn sheet(&self, sheet: &str) -> Option<Vec<Vec<String>>> {
        self.sheets.lock().unwrap().get(sheet).cloned()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn has_writes(&self) -> bool {
        self.calls()
            .iter()
            .any(|call| matches!(call, StoreCall::Clear(_) | StoreCall::Put(_, _)))
    }

    fn failure(status: Option<u16>) -> Result<()> {
        match status {
            Some(status) => Err(AppError::HttpStatus {
                status,
                reason: "Injected".to_string(),
            }),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl TableStore for InMemoryTableStore {
    async fn get_values(&self, _spreadsheet_id: &str, range: &SheetRange) -> Result<Vec<Vec<String>>> {
        self.calls.lock().unwrap().push(StoreCall::Get(range.a1()));
        Self::failure(self.fail_get)?;
        Ok(self.sheet(range.sheet()).unwrap_or_default())
    }

    async fn clear_range(&self, _spreadsheet_id: &str, range: &SheetRange) -> Result<()> {
        self.calls.lock().unwrap().push(StoreCall::Clear(range.a1()));
        Self::failure(self.fail_clear)?;
        self.sheets.lock().unwrap().remove(range.sheet());
        Ok(())
    }

    async fn put_values(
        &self,
        _spreadsheet_id: &str,
        range: &SheetRange,
        values: Vec<Vec<String>>,
    ) -> Result<()> {
        self.calls
            .lock()
            .unwrap()
            .push(StoreCall::Put(range.a1(), values.clone()));
        Self::failure(self.fail_put)?;
        self.sheets
            .lock()
            .unwrap()
            .insert(range.sheet().to_string(), values);
        Ok(())
    }
}
