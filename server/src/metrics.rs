//! # Prometheus Metrics
//!
//! Operational metrics for `tucanod`, scraped at the `/metrics` endpoint on
//! the configured metrics port.
//!
//! All metrics are registered in a dedicated [`prometheus::Registry`] so
//! they do not collide with any default global registry consumers.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use prometheus::{Encoder, IntCounter, Registry, TextEncoder};
use std::sync::Arc;

/// Holds all Prometheus metric handles for the server.
///
/// Clone-friendly (prometheus handles wrap `Arc` internally) so it can be
/// shared across request handlers and the sweeper.
#[derive(Clone)]
pub struct ServerMetrics {
    /// Prometheus registry that owns all metrics below.
    registry: Registry,
    /// Total transfers created through the API.
    pub transfers_created_total: IntCounter,
    /// Total transfers executed (API or sweeper).
    pub transfers_executed_total: IntCounter,
    /// Total transfers cancelled through the API.
    pub transfers_cancelled_total: IntCounter,
    /// Total charges created at the bank.
    pub charges_created_total: IntCounter,
    /// Total execution sweeps completed.
    pub sweep_runs_total: IntCounter,
}

impl ServerMetrics {
    /// Creates and registers all metrics. Call once at startup.
    pub fn new() -> Self {
        let registry = Registry::new_custom(Some("tucano".into()), None)
            .expect("failed to create prometheus registry");

        let register_counter = |name: &str, help: &str| {
            let counter = IntCounter::new(name, help).expect("metric creation");
            registry
                .register(Box::new(counter.clone()))
                .expect("metric registration");
            counter
        };

        Self {
            transfers_created_total: register_counter(
                "transfers_created_total",
                "Total transfers created through the API",
            ),
            transfers_executed_total: register_counter(
                "transfers_executed_total",
                "Total transfers executed, by the API or the sweeper",
            ),
            transfers_cancelled_total: register_counter(
                "transfers_cancelled_total",
                "Total transfers cancelled through the API",
            ),
            charges_created_total: register_counter(
                "charges_created_total",
                "Total charges created at the bank",
            ),
            sweep_runs_total: register_counter(
                "sweep_runs_total",
                "Total execution sweeps completed",
            ),
            registry,
        }
    }

    /// Encodes all registered metrics into the Prometheus text exposition
    /// format.
    pub fn encode(&self) -> Result<String, prometheus::Error> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer).unwrap_or_default())
    }
}

impl Default for ServerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Shared metrics state passed to axum handlers.
pub type SharedMetrics = Arc<ServerMetrics>;

/// Axum handler that renders `/metrics` in Prometheus text format.
///
/// Returns HTTP 500 if encoding fails (should never happen in practice).
pub async fn metrics_handler(
    axum::extract::State(metrics): axum::extract::State<SharedMetrics>,
) -> impl IntoResponse {
    match metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("failed to encode metrics: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "metrics encoding failed").into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_the_exposition() {
        let metrics = ServerMetrics::new();
        metrics.transfers_created_total.inc();
        metrics.sweep_runs_total.inc();

        let body = metrics.encode().unwrap();
        assert!(body.contains("tucano_transfers_created_total 1"));
        assert!(body.contains("tucano_sweep_runs_total 1"));
        assert!(body.contains("tucano_charges_created_total 0"));
    }
}
