pub mod service_account;

use crate::domain::error::Result;
use async_trait::async_trait;

pub use service_account::ServiceAccountTokenProvider;

/// Source of bearer tokens for the table store.
#[async_trait]
pub trait TokenProvider {
    async fn access_token(&self) -> Result<String>;
}

/// Fixed token, for stores that do not need OAuth (tests, local emulators).
pub struct StaticTokenProvider {
    token: String,
}

impl StaticTokenProvider {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
        }
    }
}

#[async_trait]
impl TokenProvider for StaticTokenProvider {
    async fn access_token(&self) -> Result<String> {
        Ok(self.token.clone())
    }
}
