// Copyright (c) 2026 Tucano Maintainers. MIT License.
// See LICENSE for details.

//! # Tucano Server
//!
//! Entry point for the `tucanod` binary. Parses CLI arguments, initializes
//! logging and metrics, wires the services over the in-memory stores and
//! the Banco do Brasil gateway, starts the execution sweeper, and serves
//! the HTTP API.
//!
//! The binary supports two subcommands:
//!
//! - `run`     — start the server
//! - `version` — print build version information

mod api;
mod cli;
mod logging;
mod metrics;
mod sweeper;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;

use tucano_core::service::{ChargeService, ContactService, OwnerService, TransferService};
use tucano_core::store::memory::{
    MemoryContactStore, MemoryOwnerDirectory, MemoryTransactionStore,
};
use tucano_gateway::{BancoDoBrasilGateway, GatewayConfig};

use cli::{Commands, TucanodCli};
use metrics::ServerMetrics;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = TucanodCli::parse();

    match cli.command {
        Commands::Run(args) => run_server(args).await,
        Commands::Version => {
            print_version();
            Ok(())
        }
    }
}

/// Starts the full server: HTTP API, metrics endpoint, and the execution
/// sweeper.
async fn run_server(args: cli::RunArgs) -> Result<()> {
    logging::init(
        "tucanod=info,tucano_core=info,tucano_gateway=info,tower_http=debug",
        args.log_format,
    );

    tracing::info!(
        api_port = args.api_port,
        metrics_port = args.metrics_port,
        sweep_interval_secs = args.sweep_interval_secs,
        "starting tucanod"
    );

    // --- Bank gateway ---
    // Fails fast when credentials are absent; a payment initiator without a
    // bank is not a server worth starting.
    let gateway_config =
        GatewayConfig::from_env().context("gateway configuration (BB_* environment variables)")?;
    let gateway = Arc::new(BancoDoBrasilGateway::new(gateway_config));

    // --- Stores ---
    let owners = Arc::new(MemoryOwnerDirectory::new());
    let contacts = Arc::new(MemoryContactStore::new());
    let transactions = Arc::new(MemoryTransactionStore::new());

    // --- Services ---
    let owner_service = OwnerService::new(owners.clone());
    let contact_service = ContactService::new(contacts, owners.clone());
    let transfer_service = TransferService::new(transactions, owners);
    let charge_service = ChargeService::new(gateway);

    // --- Metrics ---
    let server_metrics = Arc::new(ServerMetrics::new());

    // --- Application state ---
    let app_state = api::AppState {
        version: env!("CARGO_PKG_VERSION").to_string(),
        owners: owner_service,
        contacts: contact_service,
        transfers: transfer_service.clone(),
        charges: charge_service,
        metrics: Arc::clone(&server_metrics),
    };

    // --- Listeners ---
    // The API and the metrics endpoint live on separate ports so the
    // scraper never competes with payment traffic.
    let api_router = api::create_router(app_state);
    let api_listener = bind(args.api_port, "API").await?;

    let metrics_router = axum::Router::new()
        .route("/metrics", axum::routing::get(metrics::metrics_handler))
        .with_state(Arc::clone(&server_metrics));
    let metrics_listener = bind(args.metrics_port, "metrics").await?;

    // --- Execution sweeper ---
    let sweeper_handle = sweeper::spawn(
        transfer_service,
        Arc::clone(&server_metrics),
        Duration::from_secs(args.sweep_interval_secs),
    );

    // --- Serve ---
    tokio::select! {
        res = axum::serve(api_listener, api_router) => {
            if let Err(e) = res {
                tracing::error!("API server error: {}", e);
            }
        }
        res = axum::serve(metrics_listener, metrics_router) => {
            if let Err(e) = res {
                tracing::error!("Metrics server error: {}", e);
            }
        }
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining connections");
        }
    }

    sweeper_handle.abort();
    tracing::info!("tucanod stopped");
    Ok(())
}

/// Binds a listener on all interfaces and logs where it landed.
async fn bind(port: u16, name: &str) -> Result<tokio::net::TcpListener> {
    let addr = format!("0.0.0.0:{port}");
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {name} listener on {addr}"))?;
    tracing::info!(%addr, "{name} server listening");
    Ok(listener)
}

/// Prints version information to stdout.
fn print_version() {
    println!("tucanod {}", env!("CARGO_PKG_VERSION"));
}

/// Waits for SIGINT (Ctrl+C) or SIGTERM, whichever comes first.
///
/// On non-Unix platforms, only Ctrl+C is supported.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {}
        _ = terminate => {}
    }
}
