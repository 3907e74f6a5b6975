use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info};

use super::TokenProvider;
use crate::domain::error::{AppError, Result};

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// A token this close to expiry is treated as already expired.
const EXPIRY_SKEW_SECS: i64 = 60;

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

#[derive(Debug, Deserialize)]
struct ServiceAccountKey {
    client_email: String,
    private_key: String,
    #[serde(default)]
    private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    token_uri: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct AssertionClaims {
    pub iss: String,
    pub scope: String,
    pub aud: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct AccessToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl AccessToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        self.expires_at - Duration::seconds(EXPIRY_SKEW_SECS) > now
    }
}

/// Mints access tokens from a service-account key file via the OAuth
/// JWT-bearer grant, caching the current token until it nears expiry.
pub struct ServiceAccountTokenProvider {
    key_path: PathBuf,
    scopes: Vec<String>,
    client: reqwest::Client,
    cached: Mutex<Option<AccessToken>>,
}

impl ServiceAccountTokenProvider {
    pub fn new(key_path: &Path, scopes: Vec<String>, client: reqwest::Client) -> Self {
        Self {
            key_path: key_path.to_path_buf(),
            scopes,
            client,
            cached: Mutex::new(None),
        }
    }

    fn read_key(&self) -> Result<ServiceAccountKey> {
        let content = std::fs::read_to_string(&self.key_path).map_err(|e| {
            AppError::CredentialError(format!(
                "Failed to read service account file {}: {}",
                self.key_path.display(),
                e
            ))
        })?;
        serde_json::from_str(&content).map_err(|e| {
            AppError::CredentialError(format!("Failed to parse service account file: {}", e))
        })
    }

    fn build_assertion(&self, key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: key.client_email.clone(),
            scope: self.scopes.join(" "),
            aud: key.token_uri.clone(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = key.private_key_id.clone();

        let signing_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(|e| AppError::CredentialError(format!("Invalid private key: {}", e)))?;

        encode(&header, &claims, &signing_key)
            .map_err(|e| AppError::CredentialError(format!("Failed to sign assertion: {}", e)))
    }

    async fn fetch_token(&self) -> Result<AccessToken> {
        let key = self.read_key()?;
        let now = Utc::now();
        let assertion = self.build_assertion(&key, now)?;

        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await
            .map_err(|e| AppError::CredentialError(format!("Token request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::CredentialError(format!(
                "Token endpoint error ({}): {}",
                status, text
            )));
        }

        let token: TokenResponse = response.json().await.map_err(|e| {
            AppError::CredentialError(format!("Failed to parse token response: {}", e))
        })?;

        Ok(AccessToken {
            value: token.access_token,
            expires_at: now + Duration::seconds(token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS)),
        })
    }
}

#[async_trait]
impl TokenProvider for ServiceAccountTokenProvider {
    async fn access_token(&self) -> Result<String> {
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
            debug!("Access token expired, refreshing");
        }

        let token = self.fetch_token().await.map_err(|err| {
            error!(error = %err.log_detail(), "Failed to obtain access token");
            err
        })?;
        info!("Credentials obtained successfully");

        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }
}
