//! Core type definitions for PIX keys.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::validation::validate_key;

// ---------------------------------------------------------------------------
// PixKeyType
// ---------------------------------------------------------------------------

/// Discriminant for the kind of alias a PIX key is.
///
/// The type determines which validation rule applies. The central bank
/// directory also recognizes CNPJ keys; Tucano does not issue or accept
/// those, so the enum stays closed over the four personal kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PixKeyType {
    /// Brazilian individual taxpayer registry number (11 digits + check digits).
    Cpf,
    /// Email address.
    Email,
    /// Phone number, 10 or 11 digits.
    Phone,
    /// Opaque random key (EVP) issued by the directory.
    Random,
}

impl fmt::Display for PixKeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cpf => write!(f, "CPF"),
            Self::Email => write!(f, "EMAIL"),
            Self::Phone => write!(f, "PHONE"),
            Self::Random => write!(f, "RANDOM"),
        }
    }
}

// ---------------------------------------------------------------------------
// PixKey
// ---------------------------------------------------------------------------

/// A PIX key attached to a contact.
///
/// Value object: two keys with the same `value`, `key_type`, and `active`
/// flag validate identically regardless of `id`. Deactivated keys are never
/// valid, whatever their format — deactivation is how a key is retired
/// without rewriting history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixKey {
    /// Unique identifier for this key entry.
    pub id: String,
    /// The raw key value as entered (formatting preserved).
    pub value: String,
    /// Which validation rule applies.
    pub key_type: PixKeyType,
    /// Whether the key is currently usable.
    pub active: bool,
}

impl PixKey {
    /// Creates a new active key with a fresh identifier.
    pub fn new(value: impl Into<String>, key_type: PixKeyType) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            value: value.into(),
            key_type,
            active: true,
        }
    }

    /// Returns `true` if the key is active and its value satisfies the
    /// format rule for its type.
    ///
    /// Pure over `value`, `key_type`, and `active` — no directory lookup.
    pub fn is_valid(&self) -> bool {
        self.active && validate_key(&self.value, self.key_type)
    }

    /// Returns a deactivated copy of this key.
    pub fn deactivated(self) -> Self {
        Self {
            active: false,
            ..self
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_type_display() {
        assert_eq!(PixKeyType::Cpf.to_string(), "CPF");
        assert_eq!(PixKeyType::Random.to_string(), "RANDOM");
    }

    #[test]
    fn new_key_is_active_with_fresh_id() {
        let key = PixKey::new("a@b.co", PixKeyType::Email);
        assert!(key.active);
        assert!(!key.id.is_empty());
    }

    #[test]
    fn inactive_key_is_never_valid() {
        let key = PixKey::new("a@b.co", PixKeyType::Email).deactivated();
        assert!(!key.is_valid());
    }

    #[test]
    fn active_key_validates_by_type() {
        assert!(PixKey::new("a@b.co", PixKeyType::Email).is_valid());
        assert!(!PixKey::new("not-an-email", PixKeyType::Email).is_valid());
    }

    #[test]
    fn key_type_serde_uses_screaming_snake_case() {
        let json = serde_json::to_string(&PixKeyType::Cpf).unwrap();
        assert_eq!(json, "\"CPF\"");
        let back: PixKeyType = serde_json::from_str("\"RANDOM\"").unwrap();
        assert_eq!(back, PixKeyType::Random);
    }
}
