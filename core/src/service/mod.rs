//! # Application Services
//!
//! One service per operation family, each tying validation, records, and
//! collaborators together: owners, contacts, transfers, charges. Services
//! are cheap to clone (collaborators behind `Arc`) and hold no state of
//! their own.
//!
//! All failures funnel into [`ServiceError`], the taxonomy callers branch
//! on: invalid input, missing referent, forbidden transition, duplicate
//! constraint, backend or gateway trouble. Fail fast, first violation wins,
//! nothing is retried here.

pub mod charges;
pub mod contacts;
pub mod owners;
pub mod transfers;

pub use charges::{ChargeService, NewCharge};
pub use contacts::ContactService;
pub use owners::OwnerService;
pub use transfers::TransferService;

use thiserror::Error;

use crate::charge::ChargeError;
use crate::contact::ContactError;
use crate::owner::OwnerError;
use crate::store::{GatewayError, StoreError};
use crate::transaction::{TransactionError, TransitionError};

/// Everything a service call can fail with.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// An owner registration violated a field rule.
    #[error(transparent)]
    InvalidOwner(#[from] OwnerError),

    /// A contact request violated a field or bundle rule.
    #[error(transparent)]
    InvalidContact(#[from] ContactError),

    /// A transfer creation request violated a rule.
    #[error(transparent)]
    InvalidTransaction(#[from] TransactionError),

    /// A charge request violated a bound.
    #[error(transparent)]
    InvalidCharge(#[from] ChargeError),

    /// A lifecycle transition was attempted from a forbidding state.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// A referenced record does not exist.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// What kind of record was looked up.
        entity: &'static str,
        /// The identifier that missed.
        id: String,
    },

    /// A uniqueness constraint would be violated.
    #[error("{0}")]
    Conflict(String),

    /// The storage backend failed.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// The payment gateway failed.
    #[error(transparent)]
    Gateway(#[from] GatewayError),
}

impl ServiceError {
    /// Shorthand for a [`ServiceError::NotFound`].
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}
