//! Account holders.
//!
//! An [`Owner`] is the person on whose behalf contacts, transfers, and
//! charges exist. Field validation lives here; email/tax-id *uniqueness* is
//! a directory concern and is enforced by the owner service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config::MIN_NAME_LEN;
use crate::keys::validation::{is_valid_cpf, is_valid_email};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// An owner registration that violates one of the field rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OwnerError {
    /// The trimmed name was shorter than the minimum.
    #[error("name must have at least {min} characters")]
    NameTooShort {
        /// Minimum trimmed length.
        min: usize,
    },

    /// The email did not look like `local@domain.tld`.
    #[error("invalid email address")]
    InvalidEmail,

    /// The tax id failed the CPF check digits.
    #[error("invalid CPF")]
    InvalidTaxId,
}

// ---------------------------------------------------------------------------
// Owner
// ---------------------------------------------------------------------------

/// An account holder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Owner {
    /// Unique identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Contact email, unique across owners.
    pub email: String,
    /// CPF, unique across owners. Stored as entered; comparisons are on the
    /// raw string.
    pub tax_id: String,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Instant of the most recent update.
    pub updated_at: DateTime<Utc>,
}

impl Owner {
    /// Validates the fields and creates an owner with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns the first violated rule: name length, then email format,
    /// then CPF check digits.
    pub fn create(
        name: impl Into<String>,
        email: impl Into<String>,
        tax_id: impl Into<String>,
    ) -> Result<Self, OwnerError> {
        let name = name.into();
        let email = email.into();
        let tax_id = tax_id.into();

        if name.trim().chars().count() < MIN_NAME_LEN {
            return Err(OwnerError::NameTooShort { min: MIN_NAME_LEN });
        }
        if !is_valid_email(&email) {
            return Err(OwnerError::InvalidEmail);
        }
        if !is_valid_cpf(&tax_id) {
            return Err(OwnerError::InvalidTaxId);
        }

        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4().to_string(),
            name,
            email,
            tax_id,
            created_at: now,
            updated_at: now,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_a_valid_owner() {
        let owner = Owner::create("Ana", "ana@mail.co", "11144477735").unwrap();
        assert!(!owner.id.is_empty());
        assert_eq!(owner.created_at, owner.updated_at);
    }

    #[test]
    fn rejects_short_name_first() {
        // Name is checked before the (also bad) email.
        assert_eq!(
            Owner::create(" A ", "bad", "123"),
            Err(OwnerError::NameTooShort { min: 2 })
        );
    }

    #[test]
    fn rejects_bad_email() {
        assert_eq!(
            Owner::create("Ana", "not-an-email", "11144477735"),
            Err(OwnerError::InvalidEmail)
        );
    }

    #[test]
    fn rejects_bad_tax_id() {
        assert_eq!(
            Owner::create("Ana", "ana@mail.co", "11144477734"),
            Err(OwnerError::InvalidTaxId)
        );
    }

    #[test]
    fn accepts_formatted_tax_id() {
        assert!(Owner::create("Ana", "ana@mail.co", "111.444.777-35").is_ok());
    }
}
