//! Environment-driven gateway configuration.
//!
//! Credentials come from the environment, never from files in the repo.
//! Startup validates that every required variable is present and non-empty
//! and fails with the full list of what is missing — one round of fixing,
//! not five.

use thiserror::Error;

/// Default API base. Overridden via `BB_API_BASE_URL` for sandbox use.
const DEFAULT_BASE_URL: &str = "https://api.bb.com.br/pix/v1";

/// Required environment variables, checked as a group.
const REQUIRED_VARS: [&str; 4] = [
    "BB_CLIENT_ID",
    "BB_CLIENT_SECRET",
    "BB_DEVELOPER_APPLICATION_KEY",
    "BB_PIX_KEY",
];

/// Configuration failures at startup.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// One or more required variables are unset or empty.
    #[error("missing required environment variables: {0}")]
    MissingVars(String),
}

/// Everything the client needs to talk to the bank.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// API base URL, without a trailing slash requirement.
    pub base_url: String,
    /// OAuth2 client id.
    pub client_id: String,
    /// OAuth2 client secret.
    pub client_secret: String,
    /// The bank's per-application key, sent on every request.
    pub developer_application_key: String,
    /// The PIX key charges are received on (our side of the money).
    pub receiver_key: String,
}

impl GatewayConfig {
    /// Reads the configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads the configuration through an arbitrary lookup. Empty values
    /// count as missing, same as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());

        let missing: Vec<&str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|name| get(name).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing.join(", ")));
        }

        Ok(Self {
            base_url: get("BB_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            client_id: get("BB_CLIENT_ID").unwrap_or_default(),
            client_secret: get("BB_CLIENT_SECRET").unwrap_or_default(),
            developer_application_key: get("BB_DEVELOPER_APPLICATION_KEY").unwrap_or_default(),
            receiver_key: get("BB_PIX_KEY").unwrap_or_default(),
        })
    }
}
