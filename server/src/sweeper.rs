//! # Execution Sweeper
//!
//! Background task that periodically picks up due scheduled and automatic
//! transfers and executes them, oldest schedule first. The pickup queries
//! and the execution guard both live in the core; this loop only provides
//! the heartbeat.

use std::time::Duration;

use chrono::Utc;
use tokio::task::JoinHandle;

use tucano_core::service::TransferService;

use crate::metrics::SharedMetrics;

/// Spawns the sweeper loop. Abort the returned handle on shutdown.
pub fn spawn(
    transfers: TransferService,
    metrics: SharedMetrics,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            sweep(&transfers, &metrics).await;
        }
    })
}

/// One sweep: collect due transfers of both kinds and execute each.
///
/// Execution errors are logged and skipped, not retried — a transfer that
/// lost a race to another executor is already in good hands, and a store
/// failure will be seen again next tick.
async fn sweep(transfers: &TransferService, metrics: &SharedMetrics) {
    let now = Utc::now();

    let scheduled = match transfers.due_scheduled(now).await {
        Ok(due) => due,
        Err(e) => {
            tracing::error!(error = %e, "scheduled pickup query failed");
            return;
        }
    };
    let automatic = match transfers.due_automatic(now).await {
        Ok(due) => due,
        Err(e) => {
            tracing::error!(error = %e, "automatic pickup query failed");
            return;
        }
    };

    let due_count = scheduled.len() + automatic.len();
    if due_count > 0 {
        tracing::info!(due = due_count, "executing due transfers");
    }

    for tx in scheduled.into_iter().chain(automatic) {
        match transfers.execute(&tx.id).await {
            Ok(done) => {
                metrics.transfers_executed_total.inc();
                tracing::info!(transaction_id = %done.id, kind = %done.kind, "due transfer executed");
            }
            Err(e) => {
                tracing::warn!(transaction_id = %tx.id, error = %e, "due transfer skipped");
            }
        }
    }

    metrics.sweep_runs_total.inc();
}
