//! Owner registration and lookup.

use std::sync::Arc;

use super::ServiceError;
use crate::owner::Owner;
use crate::store::OwnerDirectory;

/// Registers account holders and answers lookups.
#[derive(Clone)]
pub struct OwnerService {
    directory: Arc<dyn OwnerDirectory>,
}

impl OwnerService {
    /// Creates a service over the given directory.
    pub fn new(directory: Arc<dyn OwnerDirectory>) -> Self {
        Self { directory }
    }

    /// Registers a new owner.
    ///
    /// Field validation first, then the two uniqueness checks (email, tax
    /// id) against the directory, then the insert.
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        tax_id: &str,
    ) -> Result<Owner, ServiceError> {
        let owner = Owner::create(name, email, tax_id)?;

        if self.directory.find_by_email(email).await?.is_some() {
            return Err(ServiceError::Conflict("email already in use".into()));
        }
        if self.directory.find_by_tax_id(tax_id).await?.is_some() {
            return Err(ServiceError::Conflict("CPF already in use".into()));
        }

        let owner = self.directory.insert(owner).await?;
        tracing::info!(owner_id = %owner.id, "owner registered");
        Ok(owner)
    }

    /// Fetches an owner by id.
    pub async fn get(&self, id: &str) -> Result<Owner, ServiceError> {
        self.directory
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("owner", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owner::OwnerError;
    use crate::store::memory::MemoryOwnerDirectory;

    fn service() -> OwnerService {
        OwnerService::new(Arc::new(MemoryOwnerDirectory::new()))
    }

    #[tokio::test]
    async fn registers_and_fetches() {
        let svc = service();
        let owner = svc.create("Ana", "ana@mail.co", "11144477735").await.unwrap();
        let fetched = svc.get(&owner.id).await.unwrap();
        assert_eq!(fetched, owner);
    }

    #[tokio::test]
    async fn rejects_invalid_fields_before_touching_the_directory() {
        let svc = service();
        match svc.create("Ana", "bad-email", "11144477735").await {
            Err(ServiceError::InvalidOwner(OwnerError::InvalidEmail)) => {}
            other => panic!("expected InvalidEmail, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_email_conflicts() {
        let svc = service();
        svc.create("Ana", "ana@mail.co", "11144477735").await.unwrap();
        match svc.create("Outra Ana", "ana@mail.co", "12345678909").await {
            Err(ServiceError::Conflict(msg)) => assert!(msg.contains("email")),
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_tax_id_conflicts() {
        let svc = service();
        svc.create("Ana", "ana@mail.co", "11144477735").await.unwrap();
        match svc.create("Outra Ana", "outra@mail.co", "11144477735").await {
            Err(ServiceError::Conflict(msg)) => assert!(msg.contains("CPF")),
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_owner_is_not_found() {
        let svc = service();
        match svc.get("nope").await {
            Err(ServiceError::NotFound { entity: "owner", .. }) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
