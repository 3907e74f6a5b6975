use super::TableStore;
use crate::domain::error::{AppError, Result};
use crate::domain::sheet_range::SheetRange;
use crate::infrastructure::credentials::TokenProvider;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

#[derive(Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Serialize)]
struct ValueRangeBody {
    range: String,
    #[serde(rename = "majorDimension")]
    major_dimension: &'static str,
    values: Vec<Vec<String>>,
}

/// Sheets v4 `values` API client.
pub struct GoogleSheetsStore {
    client: reqwest::Client,
    base_url: String,
    tokens: Arc<dyn TokenProvider + Send + Sync>,
}

impl GoogleSheetsStore {
    pub fn new(
        base_url: &str,
        timeout: Option<Duration>,
        tokens: Arc<dyn TokenProvider + Send + Sync>,
    ) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            tokens,
        })
    }

    /// `{base}/spreadsheets/{id}/values/{range}{suffix}` with each segment encoded.
    fn values_url(&self, spreadsheet_id: &str, range: &SheetRange, suffix: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| AppError::Internal(format!("Invalid Sheets API base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| AppError::Internal("Sheets API base URL cannot be a base".to_string()))?
            .pop_if_empty()
            .push("spreadsheets")
            .push(spreadsheet_id)
            .push("values")
            .push(&format!("{}{}", range.a1(), suffix));
        Ok(url)
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), body = %text, "Sheets API returned an error");
        Err(AppError::HttpStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or("").to_string(),
        })
    }
}

fn cell_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(text) => text,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[async_trait]
impl TableStore for GoogleSheetsStore {
    async fn get_values(&self, spreadsheet_id: &str, range: &SheetRange) -> Result<Vec<Vec<String>>> {
        let token = self.tokens.access_token().await?;
        let url = self.values_url(spreadsheet_id, range, "")?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Request failed: {}", e)))?;
        let response = Self::check_status(response).await?;

        let body: ValueRange = response
            .json()
            .await
            .map_err(|e| AppError::ParseError(format!("Failed to parse values response: {}", e)))?;

        info!(range = %range, rows = body.values.len(), "Retrieved spreadsheet data");

        Ok(body
            .values
            .into_iter()
            .map(|row| row.into_iter().map(cell_to_string).collect())
            .collect())
    }

    async fn clear_range(&self, spreadsheet_id: &str, range: &SheetRange) -> Result<()> {
        let token = self.tokens.access_token().await?;
        let url = self.values_url(spreadsheet_id, range, ":clear")?;

        let response = self
            .client
            .post(url)
            .bearer_auth(token)
            .json(&serde_json::json!({}))
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Request failed: {}", e)))?;
        Self::check_status(response).await?;

        info!(range = %range, "Cleared range");
        Ok(())
    }

    async fn put_values(
        &self,
        spreadsheet_id: &str,
        range: &SheetRange,
        values: Vec<Vec<String>>,
    ) -> Result<()> {
        let token = self.tokens.access_token().await?;
        let mut url = self.values_url(spreadsheet_id, range, "")?;
        url.query_pairs_mut().append_pair("valueInputOption", "RAW");

        let row_count = values.len();
        let body = ValueRangeBody {
            range: range.a1(),
            major_dimension: "ROWS",
            values,
        };

        let response = self
            .client
            .put(url)
            .bearer_auth(token)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::TransportError(format!("Request failed: {}", e)))?;
        Self::check_status(response).await?;

        info!(range = %range, rows = row_count, "Wrote values");
        Ok(())
    }
}
