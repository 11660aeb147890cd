//! # CLI Interface
//!
//! Defines the command-line argument structure for `tucanod` using `clap`
//! derive. Two subcommands: `run` and `version`.

use clap::{Parser, Subcommand};

use tucano_core::config::{DEFAULT_API_PORT, DEFAULT_METRICS_PORT, SWEEP_INTERVAL};

use crate::logging::LogFormat;

/// Tucano payment-initiation server.
///
/// Serves the owner/contact/transfer/charge HTTP API, sweeps due scheduled
/// and automatic transfers, and exposes Prometheus metrics. Bank
/// credentials are read from `BB_*` environment variables at startup.
#[derive(Parser, Debug)]
#[command(
    name = "tucanod",
    about = "Tucano payment-initiation server",
    version,
    propagate_version = true
)]
pub struct TucanodCli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the `tucanod` binary.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the server.
    Run(RunArgs),
    /// Print version information and exit.
    Version,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Port for the HTTP API.
    #[arg(long, env = "TUCANO_API_PORT", default_value_t = DEFAULT_API_PORT)]
    pub api_port: u16,

    /// Port for the Prometheus metrics endpoint.
    #[arg(long, env = "TUCANO_METRICS_PORT", default_value_t = DEFAULT_METRICS_PORT)]
    pub metrics_port: u16,

    /// Seconds between execution sweeps for due scheduled/automatic
    /// transfers.
    #[arg(long, env = "TUCANO_SWEEP_INTERVAL_SECS", default_value_t = SWEEP_INTERVAL.as_secs())]
    pub sweep_interval_secs: u64,

    /// Log output format.
    #[arg(long, env = "TUCANO_LOG_FORMAT", value_enum, default_value = "pretty")]
    pub log_format: LogFormat,
}
