//! Logging setup for `tucanod`.
//!
//! One call to [`init`] installs the global `tracing` subscriber: an
//! `EnvFilter` seeded from the server's defaults (overridable through
//! `RUST_LOG`) feeding either a human-readable or a JSON formatter, both
//! writing to stderr.

use clap::ValueEnum;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter, Layer};

/// Log output format, selectable with `--log-format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines for terminals.
    Pretty,
    /// One JSON object per line, for log aggregation.
    Json,
}

/// Installs the global subscriber. Call once, early in `main`; a second
/// call panics.
///
/// `default_directives` is the filter used when `RUST_LOG` is unset, e.g.
/// `"tucanod=info,tucano_core=info"`.
pub fn init(default_directives: &str, format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives));

    // Stderr, so stdout stays clean for command output.
    let sink = match format {
        LogFormat::Pretty => fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .boxed(),
        LogFormat::Json => fmt::layer()
            .with_writer(std::io::stderr)
            .json()
            .flatten_event(true)
            .boxed(),
    };

    tracing_subscriber::registry().with(filter).with(sink).init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_parse_from_cli_values() {
        assert_eq!(
            LogFormat::from_str("json", true).unwrap(),
            LogFormat::Json
        );
        assert_eq!(
            LogFormat::from_str("PRETTY", true).unwrap(),
            LogFormat::Pretty
        );
        assert!(LogFormat::from_str("yaml", true).is_err());
    }
}
