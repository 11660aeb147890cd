//! # Transfer Module
//!
//! Creation validation and lifecycle management for PIX transfers. Every
//! payment a user initiates — immediate, scheduled, or automatic — is
//! represented as a [`Transaction`].
//!
//! ## Architecture
//!
//! ```text
//! types.rs      — Status/kind enums and the centavo Amount type
//! validation.rs — NewTransaction and the ordered creation checks
//! record.rs     — The immutable Transaction record and its transitions
//! ```
//!
//! ## Lifecycle
//!
//! 1. **Validate** — [`NewTransaction::validate`] runs the field, key, and
//!    scheduling rules, cheapest first, first failure wins.
//! 2. **Create** — [`Transaction::create`] stamps id and timestamps; every
//!    transfer starts `Pending` regardless of kind.
//! 3. **Transition** — `mark_executed` / `mark_failed` / `mark_cancelled`
//!    each return a *new* record. `Executed`, `Failed`, and `Cancelled` are
//!    terminal; nothing transitions out of them.
//! 4. **Pickup** — the sweeper selects due scheduled/automatic transfers via
//!    [`Transaction::is_due_scheduled`] / [`Transaction::is_due_automatic`],
//!    oldest schedule first.
//!
//! ## Design Decisions
//!
//! - `TransactionKind` and `TransactionStatus` are separate enums even
//!   though both have a "scheduled" notion: one says how the transfer is
//!   meant to run, the other where it currently is in its life.
//! - Amounts are integer centavos. No floating point anywhere near money.
//! - Transitions consume `self` and return a fresh value; shared-state
//!   coordination is the store's problem, not the record's.

pub mod record;
pub mod types;
pub mod validation;

pub use record::{Transaction, TransitionError};
pub use types::{Amount, TransactionKind, TransactionStatus};
pub use validation::{NewTransaction, TransactionError};
