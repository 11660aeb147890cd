//! Charge records and status mapping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::transaction::Amount;

// ---------------------------------------------------------------------------
// ChargeStatus
// ---------------------------------------------------------------------------

/// Lifecycle state of a charge, as reported by the bank.
///
/// Status is mutated exclusively upstream; we only map their strings onto
/// the enum. The wire literals are the bank's Portuguese terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChargeStatus {
    /// Open and payable.
    Active,
    /// Paid.
    Completed,
    /// Withdrawn by the receiving user.
    RemovedByPayee,
    /// Withdrawn by the payment service provider.
    RemovedByPsp,
    /// Expired unpaid.
    Expired,
}

impl ChargeStatus {
    /// Maps a bank status string onto the enum.
    ///
    /// Unrecognized strings map to `Active` — the safest reading of an
    /// unknown state for an open payment request. The call site logs the
    /// raw string so drift is visible.
    pub fn from_wire(raw: &str) -> Self {
        match raw {
            "ATIVA" => Self::Active,
            "CONCLUIDA" => Self::Completed,
            "REMOVIDA_PELO_USUARIO_RECEBEDOR" => Self::RemovedByPayee,
            "REMOVIDA_PELO_PSP" => Self::RemovedByPsp,
            "EXPIRADA" => Self::Expired,
            _ => Self::Active,
        }
    }

    /// The bank's wire literal for this status.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Active => "ATIVA",
            Self::Completed => "CONCLUIDA",
            Self::RemovedByPayee => "REMOVIDA_PELO_USUARIO_RECEBEDOR",
            Self::RemovedByPsp => "REMOVIDA_PELO_PSP",
            Self::Expired => "EXPIRADA",
        }
    }
}

impl fmt::Display for ChargeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

// ---------------------------------------------------------------------------
// Charge
// ---------------------------------------------------------------------------

/// A charge as known to the bank.
///
/// Created and status-mutated upstream; the gateway maps responses into this
/// record. The bank's creation/expiry timestamps are authoritative over
/// anything computed locally before the call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Charge {
    /// Our identifier for the charge (the bank's txid doubles as it).
    pub id: String,
    /// The bank-assigned transaction identifier.
    pub txid: String,
    /// Payment location URL the payer is pointed at.
    pub location_url: String,
    /// Current lifecycle state.
    pub status: ChargeStatus,
    /// Charged amount in centavos.
    pub amount: Amount,
    /// Payer's display name.
    pub payer_name: String,
    /// Payer's CPF.
    pub payer_tax_id: String,
    /// Payer's email. The bank does not echo this back; it is carried from
    /// the request and empty on bare lookups.
    pub payer_email: String,
    /// Free-text request shown to the payer.
    pub description: String,
    /// When the charge stops being payable.
    pub expires_at: DateTime<Utc>,
    /// Bank-side creation instant.
    pub created_at: DateTime<Utc>,
    /// Instant of the most recent local refresh.
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_statuses_roundtrip() {
        for status in [
            ChargeStatus::Active,
            ChargeStatus::Completed,
            ChargeStatus::RemovedByPayee,
            ChargeStatus::RemovedByPsp,
            ChargeStatus::Expired,
        ] {
            assert_eq!(ChargeStatus::from_wire(status.as_wire()), status);
        }
    }

    #[test]
    fn unknown_wire_status_defaults_to_active() {
        assert_eq!(ChargeStatus::from_wire("EM_PROCESSAMENTO"), ChargeStatus::Active);
        assert_eq!(ChargeStatus::from_wire(""), ChargeStatus::Active);
    }

    #[test]
    fn display_uses_wire_form() {
        assert_eq!(ChargeStatus::RemovedByPsp.to_string(), "REMOVIDA_PELO_PSP");
    }
}
