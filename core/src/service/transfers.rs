//! Transfer creation, lifecycle transitions, and execution pickup.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::ServiceError;
use crate::store::{OwnerDirectory, TransactionStore};
use crate::transaction::{NewTransaction, Transaction, TransactionStatus};

/// Owns the transfer lifecycle on behalf of callers and the sweeper.
#[derive(Clone)]
pub struct TransferService {
    transactions: Arc<dyn TransactionStore>,
    owners: Arc<dyn OwnerDirectory>,
}

impl TransferService {
    /// Creates a service over the given collaborators.
    pub fn new(transactions: Arc<dyn TransactionStore>, owners: Arc<dyn OwnerDirectory>) -> Self {
        Self {
            transactions,
            owners,
        }
    }

    /// Creates a transfer from a caller request.
    ///
    /// Pure validation first, then the owner-existence lookup, then the
    /// insert. The new record is always `Pending`.
    pub async fn create(&self, request: NewTransaction) -> Result<Transaction, ServiceError> {
        request.validate()?;

        if self.owners.find_by_id(&request.owner_id).await?.is_none() {
            return Err(ServiceError::not_found("owner", request.owner_id));
        }

        let tx = self.transactions.insert(Transaction::create(request)).await?;
        tracing::info!(
            transaction_id = %tx.id,
            owner_id = %tx.owner_id,
            kind = %tx.kind,
            amount = %tx.amount,
            "transfer created"
        );
        Ok(tx)
    }

    /// Executes a transfer: guard, transition, persist.
    pub async fn execute(&self, id: &str) -> Result<Transaction, ServiceError> {
        let tx = self.get(id).await?;
        let executed = tx.mark_executed()?;
        let executed = self.transactions.update(executed).await?;
        tracing::info!(transaction_id = %executed.id, "transfer executed");
        Ok(executed)
    }

    /// Marks a transfer failed. Like the record-level transition, this has
    /// no status guard.
    pub async fn fail(&self, id: &str) -> Result<Transaction, ServiceError> {
        let tx = self.get(id).await?;
        let failed = self.transactions.update(tx.mark_failed()).await?;
        tracing::warn!(transaction_id = %failed.id, "transfer marked failed");
        Ok(failed)
    }

    /// Cancels a transfer: guard, transition, persist.
    pub async fn cancel(&self, id: &str) -> Result<Transaction, ServiceError> {
        let tx = self.get(id).await?;
        let cancelled = self.transactions.update(tx.mark_cancelled()?).await?;
        tracing::info!(transaction_id = %cancelled.id, "transfer cancelled");
        Ok(cancelled)
    }

    /// Fetches a transfer by id.
    pub async fn get(&self, id: &str) -> Result<Transaction, ServiceError> {
        self.transactions
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("transaction", id))
    }

    /// All transfers of one owner.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_by_owner(owner_id).await?)
    }

    /// All transfers in a given status.
    pub async fn list_by_status(
        &self,
        status: TransactionStatus,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_by_status(status).await?)
    }

    /// Scheduled-kind transfers due at `now`, oldest schedule first.
    pub async fn due_scheduled(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_scheduled_for_execution(now).await?)
    }

    /// Automatic-kind transfers due at `now`, oldest schedule first.
    pub async fn due_automatic(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<Transaction>, ServiceError> {
        Ok(self.transactions.find_automatic_for_execution(now).await?)
    }
}
