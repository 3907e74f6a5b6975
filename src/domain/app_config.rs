use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

use super::sheet_range::SheetLayout;

pub const SPREADSHEETS_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets";

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(default)]
pub struct AppConfig {
    #[validate(nested)]
    pub server: ServerConfig,
    #[validate(nested)]
    pub sheets: SheetsConfig,
    pub layout: SheetLayout,
    #[validate(length(min = 1, message = "log_filter must not be empty"))]
    pub log_filter: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            sheets: SheetsConfig::default(),
            layout: SheetLayout::default(),
            log_filter: "info".to_string(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(default)]
pub struct ServerConfig {
    #[validate(length(min = 1, message = "server.host must not be empty"))]
    pub host: String,
    pub port: u16,
    /// Entries kept in the operator activity log.
    #[validate(range(min = 1, message = "server.log_buffer_size must be at least 1"))]
    pub log_buffer_size: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_buffer_size: 100,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Validate)]
#[serde(default)]
pub struct SheetsConfig {
    #[validate(url(message = "sheets.api_base_url must be a valid URL"))]
    pub api_base_url: String,
    /// Service-account key file (JSON) used to mint access tokens.
    pub credentials_file: PathBuf,
    #[validate(length(min = 1, message = "sheets.scopes must not be empty"))]
    pub scopes: Vec<String>,
    /// Unset means the HTTP client's own default.
    pub request_timeout_secs: Option<u64>,
    /// Fixed bearer token; when set the credentials file is not read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://sheets.googleapis.com/v4".to_string(),
            credentials_file: PathBuf::from("service-account.json"),
            scopes: vec![SPREADSHEETS_SCOPE.to_string()],
            request_timeout_secs: None,
            access_token: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.sheets.scopes, vec![SPREADSHEETS_SCOPE.to_string()]);
        assert!(config.sheets.request_timeout_secs.is_none());
    }

    #[test]
    fn test_invalid_base_url_rejected() {
        let mut config = AppConfig::default();
        config.sheets.api_base_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_log_buffer_rejected() {
        let mut config = AppConfig::default();
        config.server.log_buffer_size = 0;
        assert!(config.validate().is_err());
    }
}
