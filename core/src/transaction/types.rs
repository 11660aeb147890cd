//! Core enums and the monetary amount type for transfers.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// TransactionStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a transfer.
///
/// `Pending` is where every transfer starts. `Executed`, `Failed`, and
/// `Cancelled` are terminal. `Scheduled` exists for stores that prefer to
/// surface queued transfers distinctly; the creation path never sets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionStatus {
    /// Created and awaiting execution.
    Pending,
    /// Queued for a future execution window.
    Scheduled,
    /// Money moved; `executed_at` is stamped.
    Executed,
    /// Execution was attempted and did not complete.
    Failed,
    /// Withdrawn before execution.
    Cancelled,
}

impl TransactionStatus {
    /// Returns `true` for states no transition leaves.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Executed | Self::Failed | Self::Cancelled)
    }
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::Executed => write!(f, "EXECUTED"),
            Self::Failed => write!(f, "FAILED"),
            Self::Cancelled => write!(f, "CANCELLED"),
        }
    }
}

// ---------------------------------------------------------------------------
// TransactionKind
// ---------------------------------------------------------------------------

/// How a transfer is meant to run.
///
/// Deliberately a separate enum from [`TransactionStatus`]: "this transfer
/// is of the scheduled kind" and "this transfer is currently queued" are
/// different statements, and conflating them is how bugs are born.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionKind {
    /// Execute as soon as possible; carries no schedule.
    Immediate,
    /// Execute once at a future instant.
    Scheduled,
    /// Recurring trigger; the schedule marks the next firing and may lie in
    /// the past while catching up.
    Automatic,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Immediate => write!(f, "IMMEDIATE"),
            Self::Scheduled => write!(f, "SCHEDULED"),
            Self::Automatic => write!(f, "AUTOMATIC"),
        }
    }
}

// ---------------------------------------------------------------------------
// Amount
// ---------------------------------------------------------------------------

/// A monetary amount in integer centavos (BRL smallest unit).
///
/// `Amount::from_centavos(1050)` is R$ 10,50. The value is always an
/// integer — no floating point anywhere near money.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(transparent)]
pub struct Amount(u64);

impl Amount {
    /// Creates an amount from centavos.
    pub const fn from_centavos(centavos: u64) -> Self {
        Self(centavos)
    }

    /// Creates an amount from whole reais.
    pub const fn from_reais(reais: u64) -> Self {
        Self(reais * 100)
    }

    /// Returns the value in centavos.
    pub const fn centavos(&self) -> u64 {
        self.0
    }

    /// Returns `true` if the amount is zero.
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }
}

impl fmt::Display for Amount {
    /// Decimal form with two fraction digits, e.g. `10.50`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
