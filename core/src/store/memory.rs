//! In-memory store implementations.
//!
//! Concurrent maps keyed by id, good enough for tests and single-node
//! deployments. Secondary lookups (email, name-and-owner) scan — the data
//! sets these stores are meant for make an index pointless.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use super::{ContactStore, OwnerDirectory, StoreError, TransactionStore};
use crate::contact::Contact;
use crate::owner::Owner;
use crate::transaction::{Transaction, TransactionStatus};

// ---------------------------------------------------------------------------
// Owners
// ---------------------------------------------------------------------------

/// DashMap-backed [`OwnerDirectory`].
#[derive(Debug, Default)]
pub struct MemoryOwnerDirectory {
    owners: DashMap<String, Owner>,
}

impl MemoryOwnerDirectory {
    /// Creates an empty directory.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl OwnerDirectory for MemoryOwnerDirectory {
    async fn insert(&self, owner: Owner) -> Result<Owner, StoreError> {
        self.owners.insert(owner.id.clone(), owner.clone());
        Ok(owner)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Owner>, StoreError> {
        Ok(self.owners.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Owner>, StoreError> {
        Ok(self
            .owners
            .iter()
            .find(|entry| entry.value().email == email)
            .map(|entry| entry.value().clone()))
    }

    async fn find_by_tax_id(&self, tax_id: &str) -> Result<Option<Owner>, StoreError> {
        Ok(self
            .owners
            .iter()
            .find(|entry| entry.value().tax_id == tax_id)
            .map(|entry| entry.value().clone()))
    }
}

// ---------------------------------------------------------------------------
// Contacts
// ---------------------------------------------------------------------------

/// DashMap-backed [`ContactStore`].
#[derive(Debug, Default)]
pub struct MemoryContactStore {
    contacts: DashMap<String, Contact>,
}

impl MemoryContactStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ContactStore for MemoryContactStore {
    async fn insert(&self, contact: Contact) -> Result<Contact, StoreError> {
        self.contacts.insert(contact.id.clone(), contact.clone());
        Ok(contact)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Contact>, StoreError> {
        Ok(self.contacts.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Contact>, StoreError> {
        Ok(self
            .contacts
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_by_name_and_owner(
        &self,
        name: &str,
        owner_id: &str,
    ) -> Result<Option<Contact>, StoreError> {
        Ok(self
            .contacts
            .iter()
            .find(|entry| entry.value().owner_id == owner_id && entry.value().name == name)
            .map(|entry| entry.value().clone()))
    }

    async fn update(&self, contact: Contact) -> Result<Contact, StoreError> {
        // Last write wins, matching the trait contract.
        self.contacts.insert(contact.id.clone(), contact.clone());
        Ok(contact)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        self.contacts.remove(id);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

/// DashMap-backed [`TransactionStore`].
#[derive(Debug, Default)]
pub struct MemoryTransactionStore {
    transactions: DashMap<String, Transaction>,
}

impl MemoryTransactionStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared scan for the two pickup queries, sorted oldest schedule first.
    fn due(&self, pred: impl Fn(&Transaction) -> bool) -> Vec<Transaction> {
        let mut due: Vec<Transaction> = self
            .transactions
            .iter()
            .filter(|entry| pred(entry.value()))
            .map(|entry| entry.value().clone())
            .collect();
        due.sort_by_key(|tx| tx.scheduled_at);
        due
    }
}

#[async_trait]
impl TransactionStore for MemoryTransactionStore {
    async fn insert(&self, tx: Transaction) -> Result<Transaction, StoreError> {
        self.transactions.insert(tx.id.clone(), tx.clone());
        Ok(tx)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Transaction>, StoreError> {
        Ok(self.transactions.get(id).map(|entry| entry.value().clone()))
    }

    async fn find_by_owner(&self, owner_id: &str) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .transactions
            .iter()
            .filter(|entry| entry.value().owner_id == owner_id)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_by_status(
        &self,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self
            .transactions
            .iter()
            .filter(|entry| entry.value().status == status)
            .map(|entry| entry.value().clone())
            .collect())
    }

    async fn find_scheduled_for_execution(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.due(|tx| tx.is_due_scheduled(now)))
    }

    async fn find_automatic_for_execution(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, StoreError> {
        Ok(self.due(|tx| tx.is_due_automatic(now)))
    }

    async fn update(&self, tx: Transaction) -> Result<Transaction, StoreError> {
        // Last write wins, matching the trait contract.
        self.transactions.insert(tx.id.clone(), tx.clone());
        Ok(tx)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
