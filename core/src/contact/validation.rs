//! Contact creation and key-bundle rules.
//!
//! The bundle walk keeps two accumulating sets — seen values and seen
//! types — and rejects at the first offending key, in array order. No error
//! aggregation: the caller fixes one thing at a time, the way the rules
//! report one thing at a time.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{MAX_CONTACT_KEYS, MIN_NAME_LEN};
use crate::keys::{check_key, KeyError, PixKey, PixKeyType};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A contact creation or key-bundle request that violates one of the rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ContactError {
    /// The owner identifier was empty.
    #[error("owner id is required")]
    OwnerRequired,

    /// The trimmed display name was shorter than the minimum.
    #[error("name must have at least {min} characters")]
    NameTooShort {
        /// Minimum trimmed length.
        min: usize,
    },

    /// The key bundle was empty.
    #[error("at least one key is required")]
    EmptyBundle,

    /// The key bundle exceeded the per-contact limit.
    #[error("at most {max} keys per contact, got {count}")]
    TooManyKeys {
        /// Offending bundle size.
        count: usize,
        /// The limit.
        max: usize,
    },

    /// Two keys in the bundle share the same raw value.
    #[error("keys must be unique: {value} appears more than once")]
    DuplicateKeyValue {
        /// The repeated value.
        value: String,
    },

    /// Two keys in the bundle share the same type.
    #[error("key types must be unique: {key_type} appears more than once")]
    DuplicateKeyType {
        /// The repeated type.
        key_type: PixKeyType,
    },

    /// A key failed the rule for its declared type.
    #[error(transparent)]
    InvalidKey(#[from] KeyError),
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// A key as requested by a caller, before an id exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewContactKey {
    /// The raw key value.
    pub value: String,
    /// Which validation rule applies.
    pub key_type: PixKeyType,
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Validates a full contact creation request: owner, name, and bundle.
pub fn validate_new_contact(
    owner_id: &str,
    name: &str,
    keys: &[NewContactKey],
) -> Result<(), ContactError> {
    if owner_id.is_empty() {
        return Err(ContactError::OwnerRequired);
    }

    if name.trim().chars().count() < MIN_NAME_LEN {
        return Err(ContactError::NameTooShort { min: MIN_NAME_LEN });
    }

    check_bundle(keys.iter().map(|k| (k.value.as_str(), k.key_type)))
}

/// Validates an existing bundle, e.g. after an add/remove produced a new
/// contact version.
pub fn validate_key_bundle(keys: &[PixKey]) -> Result<(), ContactError> {
    check_bundle(keys.iter().map(|k| (k.value.as_str(), k.key_type)))
}

/// The shared bundle walk: size bounds, then per-key uniqueness (value, then
/// type), then the key's own format rule. First failure wins; iteration is
/// bundle order.
fn check_bundle<'a, I>(keys: I) -> Result<(), ContactError>
where
    I: ExactSizeIterator<Item = (&'a str, PixKeyType)>,
{
    let count = keys.len();
    if count == 0 {
        return Err(ContactError::EmptyBundle);
    }
    if count > MAX_CONTACT_KEYS {
        return Err(ContactError::TooManyKeys {
            count,
            max: MAX_CONTACT_KEYS,
        });
    }

    let mut seen_values: HashSet<&str> = HashSet::new();
    let mut seen_types: HashSet<PixKeyType> = HashSet::new();

    for (value, key_type) in keys {
        if !seen_values.insert(value) {
            return Err(ContactError::DuplicateKeyValue {
                value: value.to_string(),
            });
        }
        if !seen_types.insert(key_type) {
            return Err(ContactError::DuplicateKeyType { key_type });
        }
        check_key(value, key_type)?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn key(value: &str, key_type: PixKeyType) -> NewContactKey {
        NewContactKey {
            value: value.into(),
            key_type,
        }
    }

    #[test]
    fn accepts_a_full_distinct_bundle() {
        let keys = vec![
            key("11144477735", PixKeyType::Cpf),
            key("a@b.co", PixKeyType::Email),
            key("11999998888", PixKeyType::Phone),
            key(&"r".repeat(36), PixKeyType::Random),
        ];
        assert_eq!(validate_new_contact("owner-1", "Maria", &keys), Ok(()));
    }

    #[test]
    fn rejects_empty_owner_and_short_name() {
        let keys = vec![key("a@b.co", PixKeyType::Email)];
        assert_eq!(
            validate_new_contact("", "Maria", &keys),
            Err(ContactError::OwnerRequired)
        );
        assert_eq!(
            validate_new_contact("owner-1", " M ", &keys),
            Err(ContactError::NameTooShort { min: 2 })
        );
    }

    #[test]
    fn rejects_empty_bundle() {
        assert_eq!(
            validate_new_contact("owner-1", "Maria", &[]),
            Err(ContactError::EmptyBundle)
        );
    }

    #[test]
    fn rejects_oversized_bundle() {
        // Six syntactically plausible keys; the size check fires first.
        let keys: Vec<_> = (0..6)
            .map(|i| key(&format!("user{i}@mail.co"), PixKeyType::Email))
            .collect();
        assert_eq!(
            validate_new_contact("owner-1", "Maria", &keys),
            Err(ContactError::TooManyKeys { count: 6, max: 5 })
        );
    }

    #[test]
    fn rejects_duplicate_values_before_types() {
        // Same value under two different types: the value check fires first.
        let keys = vec![
            key("11999998888", PixKeyType::Phone),
            key("11999998888", PixKeyType::Random),
        ];
        assert_eq!(
            validate_new_contact("owner-1", "Maria", &keys),
            Err(ContactError::DuplicateKeyValue {
                value: "11999998888".into()
            })
        );
    }

    #[test]
    fn rejects_duplicate_types_whatever_the_values() {
        let keys = vec![
            key("a@b.co", PixKeyType::Email),
            key("c@d.co", PixKeyType::Email),
        ];
        assert_eq!(
            validate_new_contact("owner-1", "Maria", &keys),
            Err(ContactError::DuplicateKeyType {
                key_type: PixKeyType::Email
            })
        );
    }

    #[test]
    fn first_invalid_key_wins() {
        let keys = vec![
            key("a@b.co", PixKeyType::Email),
            key("not-a-cpf", PixKeyType::Cpf),
            key("also-bad", PixKeyType::Phone),
        ];
        assert_eq!(
            validate_new_contact("owner-1", "Maria", &keys),
            Err(ContactError::InvalidKey(KeyError::InvalidCpf))
        );
    }

    #[test]
    fn existing_bundle_validation_matches() {
        let bundle = vec![
            PixKey::new("a@b.co", PixKeyType::Email),
            PixKey::new("a@b.co", PixKeyType::Phone),
        ];
        assert_eq!(
            validate_key_bundle(&bundle),
            Err(ContactError::DuplicateKeyValue {
                value: "a@b.co".into()
            })
        );
    }
}
