//! Charge request building and validation.
//!
//! [`ChargeRequest::build`] is the only way to obtain a request, so anything
//! the gateway receives has already passed the bounds. The locally computed
//! `expires_at` is provisional — once the bank answers, its calendar wins.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{
    DEFAULT_CHARGE_EXPIRATION_MINUTES, MAX_CHARGE_AMOUNT_CENTAVOS, MAX_CHARGE_DESCRIPTION_LEN,
    MAX_CHARGE_EXPIRATION_MINUTES, MAX_PAYER_NAME_LEN, MIN_CHARGE_EXPIRATION_MINUTES,
    MIN_PAYER_NAME_LEN,
};
use crate::keys::validation::{is_valid_cpf, is_valid_email};
use crate::transaction::Amount;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A charge creation request that violates one of the bounds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChargeError {
    /// The amount was zero.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    /// The amount exceeded the per-charge ceiling.
    #[error("amount exceeds the maximum of {max} centavos")]
    AmountTooLarge {
        /// The ceiling in centavos.
        max: u64,
    },

    /// The trimmed payer name was outside its bounds.
    #[error("payer name must have between {min} and {max} characters")]
    PayerNameOutOfBounds {
        /// Minimum trimmed length.
        min: usize,
        /// Maximum trimmed length.
        max: usize,
    },

    /// The payer tax id failed the CPF check digits.
    #[error("invalid payer CPF")]
    InvalidPayerTaxId,

    /// The payer email did not look like an email.
    #[error("invalid payer email")]
    InvalidPayerEmail,

    /// The trimmed description was empty.
    #[error("description is required")]
    DescriptionRequired,

    /// The description exceeded its maximum length.
    #[error("description must have at most {max} characters")]
    DescriptionTooLong {
        /// Maximum length.
        max: usize,
    },

    /// The expiry was outside the 1-minute-to-30-days window.
    #[error("expiration must be between {min} and {max} minutes")]
    ExpirationOutOfRange {
        /// Minimum minutes.
        min: i64,
        /// Maximum minutes.
        max: i64,
    },
}

// ---------------------------------------------------------------------------
// ChargeRequest
// ---------------------------------------------------------------------------

/// A validated, normalized charge creation request, ready for the gateway.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChargeRequest {
    /// Amount in centavos, within `(0, MAX_CHARGE_AMOUNT_CENTAVOS]`.
    pub amount: Amount,
    /// Payer display name, trimmed.
    pub payer_name: String,
    /// Payer CPF, as entered.
    pub payer_tax_id: String,
    /// Payer email.
    pub payer_email: String,
    /// Free-text request shown to the payer.
    pub description: String,
    /// Expiry window in minutes (defaulted when the caller omits it).
    pub expiration_minutes: i64,
    /// Provisional expiry instant, `now + expiration_minutes` at build time.
    /// The bank's confirmed calendar supersedes this once the charge exists.
    pub expires_at: DateTime<Utc>,
}

impl ChargeRequest {
    /// Validates the inputs and builds a request.
    ///
    /// Rules, in order: amount positive, amount under the ceiling, payer
    /// name within bounds, payer CPF valid, payer email valid, description
    /// non-empty and bounded, expiry (when given) within
    /// `[1, 43200]` minutes. An omitted expiry defaults to 60 minutes.
    pub fn build(
        amount: Amount,
        payer_name: &str,
        payer_tax_id: &str,
        payer_email: &str,
        description: &str,
        expiration_minutes: Option<i64>,
    ) -> Result<Self, ChargeError> {
        if amount.is_zero() {
            return Err(ChargeError::NonPositiveAmount);
        }
        if amount.centavos() > MAX_CHARGE_AMOUNT_CENTAVOS {
            return Err(ChargeError::AmountTooLarge {
                max: MAX_CHARGE_AMOUNT_CENTAVOS,
            });
        }

        let trimmed_name = payer_name.trim();
        let name_len = trimmed_name.chars().count();
        if name_len < MIN_PAYER_NAME_LEN || name_len > MAX_PAYER_NAME_LEN {
            return Err(ChargeError::PayerNameOutOfBounds {
                min: MIN_PAYER_NAME_LEN,
                max: MAX_PAYER_NAME_LEN,
            });
        }

        if !is_valid_cpf(payer_tax_id) {
            return Err(ChargeError::InvalidPayerTaxId);
        }
        if !is_valid_email(payer_email) {
            return Err(ChargeError::InvalidPayerEmail);
        }

        if description.trim().is_empty() {
            return Err(ChargeError::DescriptionRequired);
        }
        if description.chars().count() > MAX_CHARGE_DESCRIPTION_LEN {
            return Err(ChargeError::DescriptionTooLong {
                max: MAX_CHARGE_DESCRIPTION_LEN,
            });
        }

        if let Some(minutes) = expiration_minutes {
            if !(MIN_CHARGE_EXPIRATION_MINUTES..=MAX_CHARGE_EXPIRATION_MINUTES).contains(&minutes) {
                return Err(ChargeError::ExpirationOutOfRange {
                    min: MIN_CHARGE_EXPIRATION_MINUTES,
                    max: MAX_CHARGE_EXPIRATION_MINUTES,
                });
            }
        }
        let expiration_minutes = expiration_minutes.unwrap_or(DEFAULT_CHARGE_EXPIRATION_MINUTES);

        Ok(Self {
            amount,
            payer_name: trimmed_name.to_string(),
            payer_tax_id: payer_tax_id.to_string(),
            payer_email: payer_email.to_string(),
            description: description.to_string(),
            expiration_minutes,
            expires_at: Utc::now() + Duration::minutes(expiration_minutes),
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
