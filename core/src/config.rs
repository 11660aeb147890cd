//! # Domain Constants
//!
//! Every limit the domain enforces lives here. If you are hardcoding a bound
//! somewhere else, you are doing it wrong and you owe the team coffee.
//!
//! Amounts are integer centavos throughout — R$ 1,00 is `100`.

use std::time::Duration;

// ---------------------------------------------------------------------------
// Amounts
// ---------------------------------------------------------------------------

/// Ceiling for a single charge, in centavos. R$ 1.000.000,00 — above this
/// the bank rejects the cobrança anyway, so we fail fast locally.
pub const MAX_CHARGE_AMOUNT_CENTAVOS: u64 = 100_000_000;

// ---------------------------------------------------------------------------
// PIX Keys
// ---------------------------------------------------------------------------

/// A CPF is always exactly 11 digits once formatting is stripped.
pub const CPF_DIGITS: usize = 11;

/// Brazilian phone numbers: 10 digits (landline with area code) or
/// 11 digits (mobile with the leading 9).
pub const PHONE_MIN_DIGITS: usize = 10;
pub const PHONE_MAX_DIGITS: usize = 11;

/// Random (EVP) keys as issued by the central bank directory. The canonical
/// form is a 36-char UUID, but the directory accepts longer opaque tokens.
pub const RANDOM_KEY_MIN_LEN: usize = 32;
pub const RANDOM_KEY_MAX_LEN: usize = 77;

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

/// Maximum PIX keys a single contact may carry. One per key type.
pub const MAX_CONTACT_KEYS: usize = 5;

/// Minimum trimmed length for a contact or owner display name.
pub const MIN_NAME_LEN: usize = 2;

// ---------------------------------------------------------------------------
// Transfers
// ---------------------------------------------------------------------------

/// Minimum trimmed length for a transfer description.
pub const MIN_TRANSFER_DESCRIPTION_LEN: usize = 3;

// ---------------------------------------------------------------------------
// Charges
// ---------------------------------------------------------------------------

/// Payer name bounds for a charge (trimmed).
pub const MIN_PAYER_NAME_LEN: usize = 2;
pub const MAX_PAYER_NAME_LEN: usize = 100;

/// Maximum length for a charge description.
pub const MAX_CHARGE_DESCRIPTION_LEN: usize = 200;

/// Charge expiry window in minutes: at least 1 minute, at most 30 days.
pub const MIN_CHARGE_EXPIRATION_MINUTES: i64 = 1;
pub const MAX_CHARGE_EXPIRATION_MINUTES: i64 = 43_200;

/// Expiry applied when the caller does not pick one.
pub const DEFAULT_CHARGE_EXPIRATION_MINUTES: i64 = 60;

// ---------------------------------------------------------------------------
// Server Defaults
// ---------------------------------------------------------------------------

/// Default HTTP API port for `tucanod`.
pub const DEFAULT_API_PORT: u16 = 8420;

/// Default Prometheus metrics port.
pub const DEFAULT_METRICS_PORT: u16 = 8421;

/// How often the execution sweeper looks for due scheduled/automatic
/// transfers. 30 seconds keeps worst-case execution lag well under a minute
/// without hammering the store.
pub const SWEEP_INTERVAL: Duration = Duration::from_secs(30);
