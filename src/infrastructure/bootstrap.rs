use std::sync::Arc;
use std::time::Duration;

use tracing::info;

use crate::domain::app_config::AppConfig;
use crate::domain::error::{AppError, Result};
use crate::infrastructure::credentials::{
    ServiceAccountTokenProvider, StaticTokenProvider, TokenProvider,
};
use crate::infrastructure::table_store::{GoogleSheetsStore, TableStore};
use crate::interfaces::state::AppState;

/// Wire the credential provider, the Sheets store and the use cases from
/// configuration.
pub fn build_state(config: &AppConfig) -> Result<Arc<AppState>> {
    let timeout = config.sheets.request_timeout_secs.map(Duration::from_secs);

    let tokens: Arc<dyn TokenProvider + Send + Sync> = match &config.sheets.access_token {
        Some(token) => {
            info!("Using configured access token");
            Arc::new(StaticTokenProvider::new(token))
        }
        None => {
            let mut builder = reqwest::Client::builder();
            if let Some(timeout) = timeout {
                builder = builder.timeout(timeout);
            }
            let client = builder
                .build()
                .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;
            info!(
                credentials_file = %config.sheets.credentials_file.display(),
                "Using service-account credentials"
            );
            Arc::new(ServiceAccountTokenProvider::new(
                &config.sheets.credentials_file,
                config.sheets.scopes.clone(),
                client,
            ))
        }
    };

    let store: Arc<dyn TableStore + Send + Sync> = Arc::new(GoogleSheetsStore::new(
        &config.sheets.api_base_url,
        timeout,
        tokens,
    )?);

    Ok(Arc::new(AppState::new(
        store,
        config.layout.clone(),
        config.server.log_buffer_size,
    )))
}
