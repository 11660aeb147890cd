//! Pure validation rules for each PIX key type.
//!
//! The checks are ordered from cheapest to most expensive inside each
//! validator and none of them allocate beyond the digit scratch buffer for
//! CPF. Callers that want a yes/no answer use [`validate_key`]; callers that
//! report errors upstream use [`check_key`] and get a type-specific
//! [`KeyError`].

use thiserror::Error;

use super::types::PixKeyType;
use crate::config::{
    CPF_DIGITS, PHONE_MAX_DIGITS, PHONE_MIN_DIGITS, RANDOM_KEY_MAX_LEN, RANDOM_KEY_MIN_LEN,
};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A key value that failed the format rule for its declared type.
///
/// One variant per key type so the message names what was wrong without the
/// caller inspecting the key again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum KeyError {
    /// Wrong digit count, repeated digits, or failed check digits.
    #[error("invalid CPF")]
    InvalidCpf,

    /// Does not look like `local@domain.tld`.
    #[error("invalid email address")]
    InvalidEmail,

    /// Digit count outside the 10–11 range.
    #[error("invalid phone number")]
    InvalidPhone,

    /// Length outside the 32–77 range for a directory-issued random key.
    #[error("invalid random key")]
    InvalidRandom,
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validates `value` against the rule for `key_type`. Never panics.
pub fn validate_key(value: &str, key_type: PixKeyType) -> bool {
    check_key(value, key_type).is_ok()
}

/// Like [`validate_key`] but reports which rule failed.
pub fn check_key(value: &str, key_type: PixKeyType) -> Result<(), KeyError> {
    match key_type {
        PixKeyType::Cpf if is_valid_cpf(value) => Ok(()),
        PixKeyType::Cpf => Err(KeyError::InvalidCpf),
        PixKeyType::Email if is_valid_email(value) => Ok(()),
        PixKeyType::Email => Err(KeyError::InvalidEmail),
        PixKeyType::Phone if is_valid_phone(value) => Ok(()),
        PixKeyType::Phone => Err(KeyError::InvalidPhone),
        PixKeyType::Random if is_valid_random_key(value) => Ok(()),
        PixKeyType::Random => Err(KeyError::InvalidRandom),
    }
}

// ---------------------------------------------------------------------------
// CPF
// ---------------------------------------------------------------------------

/// Validates a CPF: 11 digits after stripping formatting, not all identical,
/// and both check digits correct.
///
/// The check digits are the standard two-pass weighted-sum-mod-11: the first
/// pass weighs the first 9 digits with 10..2, the second weighs the first 10
/// (including the first check digit) with 11..2. In each pass the digit is 0
/// when `sum % 11 < 2`, otherwise `11 - sum % 11`.
pub fn is_valid_cpf(raw: &str) -> bool {
    let digits: Vec<u32> = raw.chars().filter_map(|c| c.to_digit(10)).collect();
    if digits.len() != CPF_DIGITS {
        return false;
    }

    // A repeated digit always satisfies the checksum; reject explicitly.
    if digits.iter().all(|&d| d == digits[0]) {
        return false;
    }

    digits[9] == cpf_check_digit(&digits[..9]) && digits[10] == cpf_check_digit(&digits[..10])
}

/// Computes one CPF check digit over a 9- or 10-digit prefix.
///
/// The weight for the first digit is `len + 1` and decreases to 2, which
/// yields 10..2 for the first pass and 11..2 for the second.
fn cpf_check_digit(prefix: &[u32]) -> u32 {
    let first_weight = prefix.len() as u32 + 1;
    let sum: u32 = prefix
        .iter()
        .enumerate()
        .map(|(i, &d)| d * (first_weight - i as u32))
        .sum();
    let remainder = sum % 11;
    if remainder < 2 {
        0
    } else {
        11 - remainder
    }
}

// ---------------------------------------------------------------------------
// Email
// ---------------------------------------------------------------------------

/// Validates an email address loosely: `local@domain`, no whitespace,
/// exactly one `@`, and a dot somewhere strictly inside the domain.
///
/// Deliberately not RFC 5322 — the directory itself only needs this much,
/// and over-strict validation rejects real addresses.
pub fn is_valid_email(raw: &str) -> bool {
    if raw.chars().any(char::is_whitespace) {
        return false;
    }

    let Some((local, domain)) = raw.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return false;
    }

    // The dot must have at least one character on each side.
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

// ---------------------------------------------------------------------------
// Phone
// ---------------------------------------------------------------------------

/// Validates a phone number: 10 or 11 digits once formatting is stripped.
pub fn is_valid_phone(raw: &str) -> bool {
    let digits = raw.chars().filter(char::is_ascii_digit).count();
    (PHONE_MIN_DIGITS..=PHONE_MAX_DIGITS).contains(&digits)
}

// ---------------------------------------------------------------------------
// Random (EVP)
// ---------------------------------------------------------------------------

/// Validates a random key purely by length: the directory issues opaque
/// tokens between 32 and 77 characters and we do not second-guess their
/// contents.
pub fn is_valid_random_key(raw: &str) -> bool {
    let len = raw.chars().count();
    (RANDOM_KEY_MIN_LEN..=RANDOM_KEY_MAX_LEN).contains(&len)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
