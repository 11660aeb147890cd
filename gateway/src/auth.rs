//! OAuth2 client-credentials authentication with token caching.
//!
//! The bank hands out short-lived bearer tokens. We cache the current one
//! and renew 60 seconds before its stated expiry so a token never dies
//! mid-request. Concurrent refreshes may race; both fetch a valid token and
//! the last writer wins, which is harmless.

use chrono::{DateTime, Duration, Utc};
use parking_lot::Mutex;
use serde::Deserialize;

use tucano_core::store::GatewayError;

use crate::config::GatewayConfig;

/// Renew this long before the bank says the token expires.
const RENEWAL_MARGIN_SECS: i64 = 60;

/// The bank's token endpoint response.
#[derive(Debug, Deserialize)]
struct AccessToken {
    access_token: String,
    #[allow(dead_code)]
    token_type: String,
    expires_in: i64,
    #[serde(default)]
    #[allow(dead_code)]
    scope: Option<String>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    bearer: String,
    expires_at: DateTime<Utc>,
}

/// Caches the current bearer token and refreshes it on demand.
pub struct TokenCache {
    current: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    /// Creates an empty cache; the first [`bearer`](Self::bearer) call
    /// authenticates.
    pub fn new() -> Self {
        Self {
            current: Mutex::new(None),
        }
    }

    /// Returns a valid bearer token, authenticating if the cached one is
    /// absent or inside the renewal margin.
    pub async fn bearer(
        &self,
        http: &reqwest::Client,
        config: &GatewayConfig,
    ) -> Result<String, GatewayError> {
        if let Some(token) = self.cached() {
            return Ok(token);
        }

        let fresh = authenticate(http, config).await?;
        let bearer = fresh.bearer.clone();
        *self.current.lock() = Some(fresh);
        Ok(bearer)
    }

    /// The cached token, if it is still comfortably valid.
    fn cached(&self) -> Option<String> {
        let guard = self.current.lock();
        guard
            .as_ref()
            .filter(|token| token.expires_at > Utc::now())
            .map(|token| token.bearer.clone())
    }
}

impl Default for TokenCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Performs the client-credentials grant against the bank's token endpoint.
async fn authenticate(
    http: &reqwest::Client,
    config: &GatewayConfig,
) -> Result<CachedToken, GatewayError> {
    let url = format!("{}/oauth/token", config.base_url.trim_end_matches('/'));

    let response = http
        .post(&url)
        .form(&[
            ("grant_type", "client_credentials"),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
        ])
        .send()
        .await
        .map_err(|e| GatewayError::Auth(e.to_string()))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), "authentication rejected");
        return Err(GatewayError::Auth(format!(
            "token endpoint returned status {status}: {body}"
        )));
    }

    let token: AccessToken = response
        .json()
        .await
        .map_err(|e| GatewayError::Auth(format!("token response could not be decoded: {e}")))?;

    tracing::info!("authenticated with the bank");
    Ok(CachedToken {
        bearer: token.access_token,
        expires_at: Utc::now() + Duration::seconds(token.expires_in - RENEWAL_MARGIN_SECS),
    })
}
