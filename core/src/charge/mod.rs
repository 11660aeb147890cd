//! # Charge Module
//!
//! Outbound charges (cobranças): payment requests we issue so that someone
//! pays *us*. The bank creates and owns the charge; this module validates
//! the request before handoff and models what comes back.
//!
//! ```text
//! types.rs   — Charge record and status mapping from the bank's strings
//! request.rs — ChargeRequest::build with the amount/payer/expiry bounds
//! ```

pub mod request;
pub mod types;

pub use request::{ChargeError, ChargeRequest};
pub use types::{Charge, ChargeStatus};
