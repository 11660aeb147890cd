//! The immutable transfer record and its lifecycle transitions.
//!
//! A [`Transaction`] is never mutated in place: each transition consumes the
//! record and returns a fresh value with the status flipped and `updated_at`
//! bumped. Whoever holds the old value holds history, not state — the store
//! decides which version wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::types::{Amount, TransactionKind, TransactionStatus};
use super::validation::NewTransaction;
use crate::keys::PixKeyType;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A lifecycle transition attempted from a state that forbids it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// Execution requires `Pending` status and a schedule that is absent or
    /// already due.
    #[error("transaction cannot be executed: status {status}, scheduled at {scheduled_at:?}")]
    NotExecutable {
        /// Status at the time of the attempt.
        status: TransactionStatus,
        /// Schedule at the time of the attempt.
        scheduled_at: Option<DateTime<Utc>>,
    },

    /// Cancellation requires `Pending` or `Scheduled` status.
    #[error("transaction cannot be cancelled from status {status}")]
    NotCancellable {
        /// Status at the time of the attempt.
        status: TransactionStatus,
    },
}

// ---------------------------------------------------------------------------
// Transaction
// ---------------------------------------------------------------------------

/// A PIX transfer owned by an account holder.
///
/// Created through [`Transaction::create`] from an already-validated
/// [`NewTransaction`]; thereafter only the three `mark_*` transitions
/// produce new versions. `Executed`, `Failed`, and `Cancelled` are terminal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier.
    pub id: String,
    /// The account holder who initiated the transfer.
    pub owner_id: String,
    /// Amount in centavos.
    pub amount: Amount,
    /// Statement description.
    pub description: String,
    /// Destination PIX key.
    pub target_key: String,
    /// Validation rule for the destination key.
    pub target_key_type: PixKeyType,
    /// Where the transfer currently is in its life.
    pub status: TransactionStatus,
    /// How the transfer is meant to run.
    pub kind: TransactionKind,
    /// Execution instant for scheduled/automatic kinds.
    pub scheduled_at: Option<DateTime<Utc>>,
    /// When the money actually moved, if it has.
    pub executed_at: Option<DateTime<Utc>>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Instant of the most recent transition.
    pub updated_at: DateTime<Utc>,
}

impl Transaction {
    /// Materializes a validated request into a `Pending` record with a fresh
    /// id and timestamps.
    ///
    /// Callers are expected to have run [`NewTransaction::validate`] first;
    /// this constructor stamps, it does not judge.
    pub fn create(request: NewTransaction) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: request.owner_id,
            amount: request.amount,
            description: request.description,
            target_key: request.target_key,
            target_key_type: request.target_key_type,
            status: TransactionStatus::Pending,
            kind: request.kind,
            scheduled_at: request.scheduled_at,
            executed_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    // -- predicates ---------------------------------------------------------

    /// Returns `true` if the transfer may be executed right now: status is
    /// `Pending` and the schedule, if any, is already due.
    pub fn can_be_executed(&self) -> bool {
        self.status == TransactionStatus::Pending
            && self.scheduled_at.map_or(true, |at| at <= Utc::now())
    }

    /// Returns `true` if the transfer may still be withdrawn: status is
    /// `Pending` or `Scheduled`.
    pub fn can_be_cancelled(&self) -> bool {
        matches!(
            self.status,
            TransactionStatus::Pending | TransactionStatus::Scheduled
        )
    }

    /// Returns `true` if this is a scheduled-kind transfer.
    pub fn is_scheduled(&self) -> bool {
        self.kind == TransactionKind::Scheduled
    }

    /// Returns `true` if this is an automatic-kind transfer.
    pub fn is_automatic(&self) -> bool {
        self.kind == TransactionKind::Automatic
    }

    /// Scheduled-execution pickup: scheduled kind, still `Pending`, and due
    /// at `now`.
    pub fn is_due_scheduled(&self, now: DateTime<Utc>) -> bool {
        self.is_scheduled()
            && self.status == TransactionStatus::Pending
            && self.scheduled_at.map_or(false, |at| at <= now)
    }

    /// Automatic-execution pickup: automatic kind, still `Pending`, and due
    /// at `now`.
    pub fn is_due_automatic(&self, now: DateTime<Utc>) -> bool {
        self.is_automatic()
            && self.status == TransactionStatus::Pending
            && self.scheduled_at.map_or(false, |at| at <= now)
    }

    // -- transitions --------------------------------------------------------

    /// Marks the transfer executed, stamping `executed_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotExecutable`] unless
    /// [`can_be_executed`](Self::can_be_executed) holds.
    pub fn mark_executed(self) -> Result<Self, TransitionError> {
        if !self.can_be_executed() {
            return Err(TransitionError::NotExecutable {
                status: self.status,
                scheduled_at: self.scheduled_at,
            });
        }
        let now = Utc::now();
        Ok(Self {
            status: TransactionStatus::Executed,
            executed_at: Some(now),
            updated_at: now,
            ..self
        })
    }

    /// Marks the transfer failed. `executed_at` is left as-is.
    ///
    /// Unconditional: there is no status guard, so failing an
    /// already-terminal record silently overwrites its status. Callers are
    /// expected to invoke this only on execution candidates.
    pub fn mark_failed(self) -> Self {
        Self {
            status: TransactionStatus::Failed,
            updated_at: Utc::now(),
            ..self
        }
    }

    /// Marks the transfer cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`TransitionError::NotCancellable`] unless
    /// [`can_be_cancelled`](Self::can_be_cancelled) holds.
    pub fn mark_cancelled(self) -> Result<Self, TransitionError> {
        if !self.can_be_cancelled() {
            return Err(TransitionError::NotCancellable {
                status: self.status,
            });
        }
        Ok(Self {
            status: TransactionStatus::Cancelled,
            updated_at: Utc::now(),
            ..self
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
