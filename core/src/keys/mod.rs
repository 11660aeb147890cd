//! # PIX Key Module
//!
//! Types and validation for PIX keys — the aliases (CPF, email, phone,
//! random token) that resolve to a bank account on the instant-payment rail.
//!
//! ```text
//! types.rs      — PixKeyType enum and the PixKey value object
//! validation.rs — Pure per-type validators, including CPF check digits
//! ```
//!
//! Validation never performs I/O and never panics: a malformed key is a
//! `false`/`Err`, not an exception. Every operation elsewhere in the crate
//! that touches a key funnels through [`check_key`].

pub mod types;
pub mod validation;

pub use types::{PixKey, PixKeyType};
pub use validation::{check_key, validate_key, KeyError};
