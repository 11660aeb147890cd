//! # Collaborator Contracts
//!
//! The traits the domain depends on and nothing more: directories and
//! stores for owners, contacts, and transfers, plus the payment gateway
//! that owns charges. Real deployments implement these against a database
//! and the bank's API; tests and single-node setups use the in-memory
//! implementations in [`memory`].

pub mod memory;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::charge::{Charge, ChargeRequest, ChargeStatus};
use crate::contact::Contact;
use crate::owner::Owner;
use crate::transaction::{Transaction, TransactionStatus};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A storage backend failure. The in-memory stores never produce one; a
/// database-backed implementation maps its driver errors here.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend rejected or lost the operation.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A payment gateway failure, surfaced to the caller without retries.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Could not obtain or refresh an access token.
    #[error("gateway authentication failed: {0}")]
    Auth(String),

    /// The request never produced a usable HTTP response.
    #[error("gateway transport error: {0}")]
    Transport(String),

    /// The gateway answered with an unexpected HTTP status.
    #[error("gateway returned status {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, for the logs.
        body: String,
    },

    /// The response could not be decoded into the expected shape.
    #[error("gateway response could not be decoded: {0}")]
    Decode(String),

    /// The upstream API has no endpoint for this operation.
    #[error("operation not supported by the gateway: {0}")]
    Unsupported(String),
}

// ---------------------------------------------------------------------------
// OwnerDirectory
// ---------------------------------------------------------------------------

/// Lookup and registration of account holders.
#[async_trait]
pub trait OwnerDirectory: Send + Sync {
    /// Persists a new owner.
    async fn insert(&self, owner: Owner) -> Result<Owner, StoreError>;

    /// Looks an owner up by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Owner>, StoreError>;

    /// Looks an owner up by email (uniqueness checks).
    async fn find_by_email(&self, email: &str) -> Result<Option<Owner>, StoreError>;

    /// Looks an owner up by tax id (uniqueness checks).
    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Owner>, StoreError>;
}

// ---------------------------------------------------------------------------
// ContactStore
// ---------------------------------------------------------------------------

/// Persistence for saved payees.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// Persists a new contact.
    async fn insert(&self, contact: Contact) -> Result<Contact, StoreError>;

    /// Looks a contact up by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Contact>, StoreError>;

    /// All contacts of one owner.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Contact>, StoreError>;

    /// Name-scoped lookup for the per-owner uniqueness rule.
    async fn find_by_name_and_owner(
        &self,
        name: &str,
        owner_id: &str,
    ) -> Result<Option<Contact>, StoreError>;

    /// Replaces a contact with a newer version. Last write wins; there is
    /// no version check at this layer.
    async fn update(&self, contact: Contact) -> Result<Contact, StoreError>;

    /// Removes a contact.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// TransactionStore
// ---------------------------------------------------------------------------

/// Persistence for transfers.
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Persists a new transfer.
    async fn insert(&self, tx: Transaction) -> Result<Transaction, StoreError>;

    /// Looks a transfer up by id.
    async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>, StoreError>;

    /// All transfers of one owner.
    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Transaction>, StoreError>;

    /// All transfers in a given status.
    async fn find_by_status(
        &self,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Scheduled-kind transfers due at `now`, oldest schedule first.
    async fn find_scheduled_for_execution(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Automatic-kind transfers due at `now`, oldest schedule first.
    async fn find_automatic_for_execution(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError>;

    /// Replaces a transfer with a newer version. Last write wins; adding
    /// optimistic concurrency is a backend concern.
    async fn update(&self, tx: Transaction) -> Result<Transaction, StoreError>;
}

// ---------------------------------------------------------------------------
// ChargeGateway
// ---------------------------------------------------------------------------

/// The bank-side charge API. Authentication, signing, and transport are
/// entirely this collaborator's problem.
#[async_trait]
pub trait ChargeGateway: Send + Sync {
    /// Creates a charge from a validated request. The returned record
    /// carries the bank's identifiers and confirmed calendar.
    async fn create_charge(&self, request: &ChargeRequest) -> Result<Charge, GatewayError>;

    /// Fetches a charge by its bank-assigned txid. Absent charges are
    /// `Ok(None)`, not an error.
    async fn charge_by_txid(&self, txid: &str) -> Result<Option<Charge>, GatewayError>;

    /// Lists charges in a given status, where the upstream supports it.
    async fn charges_by_status(&self, status: ChargeStatus) -> Result<Vec<Charge>, GatewayError>;

    /// Cancels a charge by txid.
    async fn cancel_charge(&self, txid: &str) -> Result<(), GatewayError>;
}
