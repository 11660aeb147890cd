//! Creation-time validation for transfers.
//!
//! A [`NewTransaction`] is the caller's request before any identifier or
//! timestamp exists. [`NewTransaction::validate`] runs the rules in a fixed
//! order, cheapest first, and returns the first violation — nothing is
//! aggregated and nothing is corrected on the caller's behalf.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::types::{Amount, TransactionKind};
use crate::config::MIN_TRANSFER_DESCRIPTION_LEN;
use crate::keys::{check_key, KeyError, PixKeyType};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A transfer creation request that violates one of the rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransactionError {
    /// The owner identifier was empty.
    #[error("owner id is required")]
    OwnerRequired,

    /// The amount was zero.
    #[error("amount must be greater than zero")]
    NonPositiveAmount,

    /// The trimmed description was shorter than the minimum.
    #[error("description must have at least {min} characters")]
    DescriptionTooShort {
        /// Minimum trimmed length.
        min: usize,
    },

    /// The target key was empty.
    #[error("target key is required")]
    KeyRequired,

    /// The target key failed the rule for its declared type.
    #[error(transparent)]
    InvalidKey(#[from] KeyError),

    /// An immediate transfer carried a schedule.
    #[error("immediate transfers cannot carry a schedule")]
    ImmediateWithSchedule,

    /// A scheduled or automatic transfer carried no schedule.
    #[error("{kind} transfers require a schedule")]
    MissingSchedule {
        /// The kind that demanded a schedule.
        kind: TransactionKind,
    },

    /// A scheduled transfer's schedule was not strictly in the future.
    #[error("schedule must be in the future, got {scheduled_at}")]
    ScheduleNotInFuture {
        /// The offending schedule.
        scheduled_at: DateTime<Utc>,
    },
}

// ---------------------------------------------------------------------------
// NewTransaction
// ---------------------------------------------------------------------------

/// A transfer as requested by a caller, before creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    /// The account holder initiating the transfer.
    pub owner_id: String,
    /// Amount to move, in centavos.
    pub amount: Amount,
    /// Free-text description shown on statements.
    pub description: String,
    /// The PIX key the money goes to.
    pub target_key: String,
    /// Which validation rule applies to `target_key`.
    pub target_key_type: PixKeyType,
    /// How the transfer is meant to run.
    pub kind: TransactionKind,
    /// Execution instant for scheduled/automatic kinds.
    #[serde(default)]
    pub scheduled_at: Option<DateTime<Utc>>,
}

impl NewTransaction {
    /// Runs the creation rules in order and returns the first violation.
    ///
    /// Rules, in order:
    ///
    /// 1. Owner id non-empty.
    /// 2. Amount greater than zero.
    /// 3. Trimmed description at least 3 characters.
    /// 4. Target key non-empty.
    /// 5. Target key valid for its declared type.
    /// 6. Kind-specific schedule invariant:
    ///    - `Immediate` must not carry `scheduled_at`;
    ///    - `Scheduled` must carry one, strictly in the future;
    ///    - `Automatic` must carry one, past allowed (recurring triggers
    ///      catch up).
    ///
    /// Owner *existence* is a directory lookup and belongs to the service
    /// layer; this check is pure.
    pub fn validate(&self) -> Result<(), TransactionError> {
        if self.owner_id.is_empty() {
            return Err(TransactionError::OwnerRequired);
        }

        if self.amount.is_zero() {
            return Err(TransactionError::NonPositiveAmount);
        }

        if self.description.trim().chars().count() < MIN_TRANSFER_DESCRIPTION_LEN {
            return Err(TransactionError::DescriptionTooShort {
                min: MIN_TRANSFER_DESCRIPTION_LEN,
            });
        }

        if self.target_key.is_empty() {
            return Err(TransactionError::KeyRequired);
        }

        check_key(&self.target_key, self.target_key_type)?;

        match self.kind {
            TransactionKind::Immediate => {
                if self.scheduled_at.is_some() {
                    return Err(TransactionError::ImmediateWithSchedule);
                }
            }
            TransactionKind::Scheduled => {
                let scheduled_at = self.scheduled_at.ok_or(TransactionError::MissingSchedule {
                    kind: self.kind,
                })?;
                if scheduled_at <= Utc::now() {
                    return Err(TransactionError::ScheduleNotInFuture { scheduled_at });
                }
            }
            TransactionKind::Automatic => {
                if self.scheduled_at.is_none() {
                    return Err(TransactionError::MissingSchedule { kind: self.kind });
                }
            }
        }

        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn base_request() -> NewTransaction {
        NewTransaction {
            owner_id: "owner-1".into(),
            amount: Amount::from_centavos(1_000),
            description: "rent".into(),
            target_key: "a@b.co".into(),
            target_key_type: PixKeyType::Email,
            kind: TransactionKind::Immediate,
            scheduled_at: None,
        }
    }

    #[test]
    fn valid_immediate_request_passes() {
        assert_eq!(base_request().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_owner() {
        let req = NewTransaction {
            owner_id: String::new(),
            ..base_request()
        };
        assert_eq!(req.validate(), Err(TransactionError::OwnerRequired));
    }

    #[test]
    fn rejects_zero_amount() {
        let req = NewTransaction {
            amount: Amount::from_centavos(0),
            ..base_request()
        };
        assert_eq!(req.validate(), Err(TransactionError::NonPositiveAmount));
    }

    #[test]
    fn rejects_short_description() {
        let req = NewTransaction {
            description: "  ab  ".into(),
            ..base_request()
        };
        assert_eq!(
            req.validate(),
            Err(TransactionError::DescriptionTooShort { min: 3 })
        );
    }

    #[test]
    fn rejects_empty_key_before_format_check() {
        let req = NewTransaction {
            target_key: String::new(),
            ..base_request()
        };
        assert_eq!(req.validate(), Err(TransactionError::KeyRequired));
    }

    #[test]
    fn rejects_invalid_key_with_type_specific_error() {
        let req = NewTransaction {
            target_key: "not-a-cpf".into(),
            target_key_type: PixKeyType::Cpf,
            ..base_request()
        };
        assert_eq!(
            req.validate(),
            Err(TransactionError::InvalidKey(KeyError::InvalidCpf))
        );
    }

    #[test]
    fn immediate_with_schedule_is_rejected() {
        let req = NewTransaction {
            scheduled_at: Some(Utc::now() + Duration::hours(1)),
            ..base_request()
        };
        assert_eq!(req.validate(), Err(TransactionError::ImmediateWithSchedule));
    }

    #[test]
    fn scheduled_requires_a_schedule() {
        let req = NewTransaction {
            kind: TransactionKind::Scheduled,
            scheduled_at: None,
            ..base_request()
        };
        assert_eq!(
            req.validate(),
            Err(TransactionError::MissingSchedule {
                kind: TransactionKind::Scheduled
            })
        );
    }

    #[test]
    fn scheduled_in_the_past_is_rejected() {
        let past = Utc::now() - Duration::minutes(5);
        let req = NewTransaction {
            kind: TransactionKind::Scheduled,
            scheduled_at: Some(past),
            ..base_request()
        };
        assert_eq!(
            req.validate(),
            Err(TransactionError::ScheduleNotInFuture { scheduled_at: past })
        );
    }

    #[test]
    fn scheduled_one_second_ahead_is_accepted() {
        let req = NewTransaction {
            kind: TransactionKind::Scheduled,
            scheduled_at: Some(Utc::now() + Duration::seconds(1)),
            ..base_request()
        };
        assert_eq!(req.validate(), Ok(()));
    }

    #[test]
    fn automatic_requires_a_schedule_but_allows_the_past() {
        let missing = NewTransaction {
            kind: TransactionKind::Automatic,
            scheduled_at: None,
            ..base_request()
        };
        assert_eq!(
            missing.validate(),
            Err(TransactionError::MissingSchedule {
                kind: TransactionKind::Automatic
            })
        );

        let past = NewTransaction {
            kind: TransactionKind::Automatic,
            scheduled_at: Some(Utc::now() - Duration::days(1)),
            ..base_request()
        };
        assert_eq!(past.validate(), Ok(()));
    }
}
