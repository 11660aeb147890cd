//! The Banco do Brasil charge client.
//!
//! Implements [`ChargeGateway`] over HTTPS: bearer token from the cache,
//! the bank's per-application header on every call, and domain mapping at
//! the response boundary. No retries here — a failed call is the caller's
//! news, not ours to massage.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use tucano_core::charge::{Charge, ChargeRequest, ChargeStatus};
use tucano_core::store::{ChargeGateway, GatewayError};

use crate::auth::TokenCache;
use crate::config::GatewayConfig;
use crate::wire::{ChargeResponse, CreateChargePayload};

/// Per-request timeout. The bank is slow on bad days; 30 seconds matches
/// its own documented ceiling.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// The bank's mandatory application header.
const APP_KEY_HEADER: &str = "developer-application-key";

/// Charge client against the Banco do Brasil PIX API.
pub struct BancoDoBrasilGateway {
    http: reqwest::Client,
    config: GatewayConfig,
    token: TokenCache,
}

impl BancoDoBrasilGateway {
    /// Creates a client from validated configuration. No network traffic
    /// happens until the first call.
    pub fn new(config: GatewayConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();

        Self {
            http,
            config,
            token: TokenCache::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    /// Sends a request with auth and the application header attached, and
    /// screens the response status.
    async fn send(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GatewayError> {
        let bearer = self.token.bearer(&self.http, &self.config).await?;

        let response = request
            .bearer_auth(bearer)
            .header(APP_KEY_HEADER, &self.config.developer_application_key)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() || status == StatusCode::NOT_FOUND {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::error!(status = status.as_u16(), %body, "bank request failed");
        Err(GatewayError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl ChargeGateway for BancoDoBrasilGateway {
    async fn create_charge(&self, request: &ChargeRequest) -> Result<Charge, GatewayError> {
        let payload = CreateChargePayload::from_request(request, &self.config.receiver_key);

        let response = self
            .send(self.http.post(self.url("/v2/cob")).json(&payload))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            // Creation has no 404 semantics; treat it as any other failure.
            return Err(GatewayError::Status {
                status: 404,
                body: response.text().await.unwrap_or_default(),
            });
        }

        let body: ChargeResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        let charge = body.into_charge(&request.payer_email)?;
        tracing::info!(txid = %charge.txid, "charge created at the bank");
        Ok(charge)
    }

    async fn charge_by_txid(&self, txid: &str) -> Result<Option<Charge>, GatewayError> {
        let response = self
            .send(self.http.get(self.url(&format!("/v2/cob/{txid}"))))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body: ChargeResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(e.to_string()))?;

        // Lookups do not carry the payer's email; see the Charge field docs.
        Ok(Some(body.into_charge("")?))
    }

    async fn charges_by_status(&self, status: ChargeStatus) -> Result<Vec<Charge>, GatewayError> {
        // The bank exposes no listing by status. Say so instead of lying
        // with an empty list.
        tracing::warn!(%status, "charge listing by status requested; the bank has no such endpoint");
        Err(GatewayError::Unsupported(
            "listing charges by status".to_string(),
        ))
    }

    async fn cancel_charge(&self, txid: &str) -> Result<(), GatewayError> {
        let response = self
            .send(self.http.delete(self.url(&format!("/v2/cob/{txid}"))))
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(GatewayError::Status {
                status: 404,
                body: response.text().await.unwrap_or_default(),
            });
        }

        tracing::info!(txid, "charge cancelled at the bank");
        Ok(())
    }
}
