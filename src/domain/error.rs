use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Internal(String),
    NotFound(String),
    ValidationError(String),
    ParseError(String),
    /// Detail is kept for logs only; `Display` never shows it.
    CredentialError(String),
    MissingColumn(String),
    TransportError(String),
    HttpStatus { status: u16, reason: String },
    ConfigError(String),
    IoError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Internal(msg) => write!(f, "Internal error: {}", msg),
            AppError::NotFound(msg) => write!(f, "{}", msg),
            AppError::ValidationError(msg) => write!(f, "{}", msg),
            AppError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            AppError::CredentialError(_) => write!(f, "Failed to obtain credentials"),
            AppError::MissingColumn(column) => write!(f, "{} column not found", column),
            AppError::TransportError(msg) => write!(f, "Transport error: {}", msg),
            AppError::HttpStatus { status, reason } => {
                write!(f, "HTTP error occurred: {} {}", status, reason)
            }
            AppError::ConfigError(msg) => write!(f, "Configuration error: {}", msg),
            AppError::IoError(msg) => write!(f, "IO error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::IoError(err.to_string())
    }
}

impl AppError {
    /// Full message including detail that `Display` hides from callers.
    pub fn log_detail(&self) -> String {
        match self {
            AppError::CredentialError(detail) => format!("Error getting credentials: {}", detail),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
