//! The immutable contact record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::keys::PixKey;

/// A saved payee belonging to one account holder.
///
/// The key bundle is immutable: adding or removing a key yields a new
/// version of the contact with `updated_at` refreshed, never an in-place
/// edit. Bundle *rules* (size, uniqueness, key validity) are enforced by
/// [`super::validation`] before a version is persisted; the record itself
/// only does the bookkeeping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    /// Unique identifier.
    pub id: String,
    /// The account holder this contact belongs to.
    pub owner_id: String,
    /// Display name, unique per owner.
    pub name: String,
    /// The PIX keys attached to this payee, in insertion order.
    pub keys: Vec<PixKey>,
    /// Creation instant.
    pub created_at: DateTime<Utc>,
    /// Instant of the most recent version.
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    /// Creates a contact with a fresh id and the given key bundle.
    pub fn create(owner_id: impl Into<String>, name: impl Into<String>, keys: Vec<PixKey>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            owner_id: owner_id.into(),
            name: name.into(),
            keys,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns a new version with `key` appended.
    pub fn add_key(self, key: PixKey) -> Self {
        let mut keys = self.keys;
        keys.push(key);
        Self {
            keys,
            updated_at: Utc::now(),
            ..self
        }
    }

    /// Returns a new version with the key identified by `key_id` removed.
    /// Unknown ids leave the bundle unchanged (the version still bumps).
    pub fn remove_key(self, key_id: &str) -> Self {
        let keys = self.keys.into_iter().filter(|k| k.id != key_id).collect();
        Self {
            keys,
            updated_at: Utc::now(),
            ..self
        }
    }

    /// Returns `true` if the bundle is non-empty and every key validates.
    pub fn has_valid_keys(&self) -> bool {
        !self.keys.is_empty() && self.keys.iter().all(PixKey::is_valid)
    }
}
