//! # Contact Module
//!
//! Saved payees. A contact is a display name plus a small bundle of PIX
//! keys (one to five, at most one per key type, no duplicate values).
//!
//! ```text
//! types.rs      — The immutable Contact record and its key-bundle versions
//! validation.rs — Bundle rules, first failure wins
//! ```

pub mod types;
pub mod validation;

pub use types::Contact;
pub use validation::{validate_key_bundle, validate_new_contact, ContactError, NewContactKey};
