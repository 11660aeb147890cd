//! Contact management: creation, key-bundle edits, lookups.

use std::sync::Arc;

use super::ServiceError;
use crate::contact::{validate_key_bundle, validate_new_contact, Contact, NewContactKey};
use crate::keys::PixKey;
use crate::store::{ContactStore, OwnerDirectory};

/// Manages saved payees on behalf of owners.
#[derive(Clone)]
pub struct ContactService {
    contacts: Arc<dyn ContactStore>,
    owners: Arc<dyn OwnerDirectory>,
}

impl ContactService {
    /// Creates a service over the given collaborators.
    pub fn new(contacts: Arc<dyn ContactStore>, owners: Arc<dyn OwnerDirectory>) -> Self {
        Self { contacts, owners }
    }

    /// Creates a contact with its initial key bundle.
    ///
    /// Order: field and bundle validation, owner existence, per-owner name
    /// uniqueness, then the insert. Keys are materialized active with fresh
    /// ids only after everything passed.
    pub async fn create(
        &self,
        owner_id: &str,
        name: &str,
        keys: &[NewContactKey],
    ) -> Result<Contact, ServiceError> {
        validate_new_contact(owner_id, name, keys)?;

        if self.owners.find_by_id(owner_id).await?.is_none() {
            return Err(ServiceError::not_found("owner", owner_id));
        }

        if self
            .contacts
            .find_by_name_and_owner(name, owner_id)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(
                "a contact with this name already exists".into(),
            ));
        }

        let bundle = keys
            .iter()
            .map(|k| PixKey::new(k.value.clone(), k.key_type))
            .collect();
        let contact = self
            .contacts
            .insert(Contact::create(owner_id, name, bundle))
            .await?;
        tracing::info!(contact_id = %contact.id, owner_id, "contact created");
        Ok(contact)
    }

    /// Adds a key to a contact, producing and persisting a new version.
    ///
    /// The prospective bundle (existing keys plus the new one) is validated
    /// as a whole, so size and uniqueness rules hold across the edit.
    pub async fn add_key(
        &self,
        contact_id: &str,
        key: NewContactKey,
    ) -> Result<Contact, ServiceError> {
        let contact = self.get(contact_id).await?;

        let candidate = contact.add_key(PixKey::new(key.value, key.key_type));
        validate_key_bundle(&candidate.keys)?;

        Ok(self.contacts.update(candidate).await?)
    }

    /// Removes a key from a contact, producing and persisting a new version.
    ///
    /// Removing the last key is refused — a contact without keys cannot be
    /// paid and has no reason to exist.
    pub async fn remove_key(
        &self,
        contact_id: &str,
        key_id: &str,
    ) -> Result<Contact, ServiceError> {
        let contact = self.get(contact_id).await?;

        if !contact.keys.iter().any(|k| k.id == key_id) {
            return Err(ServiceError::not_found("key", key_id));
        }

        let candidate = contact.remove_key(key_id);
        validate_key_bundle(&candidate.keys)?;

        Ok(self.contacts.update(candidate).await?)
    }

    /// Fetches a contact by id.
    pub async fn get(&self, id: &str) -> Result<Contact, ServiceError> {
        self.contacts
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("contact", id))
    }

    /// All contacts of one owner.
    pub async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<Contact>, ServiceError> {
        Ok(self.contacts.find_by_owner(owner_id).await?)
    }

    /// Deletes a contact.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        // Fetch first so deleting a ghost reports NotFound instead of Ok.
        let contact = self.get(id).await?;
        self.contacts.delete(&contact.id).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::contact::ContactError;
    use crate::keys::PixKeyType;
    use crate::owner::Owner;
    use crate::store::memory::{MemoryContactStore, MemoryOwnerDirectory};

    async fn service_with_owner() -> (ContactService, String) {
        let owners = Arc::new(MemoryOwnerDirectory::new());
        let owner = Owner::create("Ana", "ana@mail.co", "11144477735").unwrap();
        let owner_id = owner.id.clone();
        owners.insert(owner).await.unwrap();
        (
            ContactService::new(Arc::new(MemoryContactStore::new()), owners),
            owner_id,
        )
    }

    fn email_key() -> NewContactKey {
        NewContactKey {
            value: "maria@mail.co".into(),
            key_type: PixKeyType::Email,
        }
    }

    #[tokio::test]
    async fn creates_a_contact_with_active_keys() {
        let (svc, owner_id) = service_with_owner().await;
        let contact = svc.create(&owner_id, "Maria", &[email_key()]).await.unwrap();
        assert_eq!(contact.keys.len(), 1);
        assert!(contact.keys[0].active);
        assert!(contact.has_valid_keys());
    }

    #[tokio::test]
    async fn unknown_owner_is_not_found() {
        let (svc, _) = service_with_owner().await;
        match svc.create("ghost", "Maria", &[email_key()]).await {
            Err(ServiceError::NotFound { entity: "owner", .. }) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn duplicate_name_for_the_same_owner_conflicts() {
        let (svc, owner_id) = service_with_owner().await;
        svc.create(&owner_id, "Maria", &[email_key()]).await.unwrap();
        match svc.create(&owner_id, "Maria", &[email_key()]).await {
            Err(ServiceError::Conflict(_)) => {}
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn add_key_enforces_bundle_rules_across_the_edit() {
        let (svc, owner_id) = service_with_owner().await;
        let contact = svc.create(&owner_id, "Maria", &[email_key()]).await.unwrap();

        // A second email key collides on type.
        let another_email = NewContactKey {
            value: "other@mail.co".into(),
            key_type: PixKeyType::Email,
        };
        match svc.add_key(&contact.id, another_email).await {
            Err(ServiceError::InvalidContact(ContactError::DuplicateKeyType { .. })) => {}
            other => panic!("expected DuplicateKeyType, got {other:?}"),
        }

        // A phone key is fine.
        let phone = NewContactKey {
            value: "11999998888".into(),
            key_type: PixKeyType::Phone,
        };
        let grown = svc.add_key(&contact.id, phone).await.unwrap();
        assert_eq!(grown.keys.len(), 2);

        let stored = svc.get(&contact.id).await.unwrap();
        assert_eq!(stored.keys.len(), 2);
    }

    #[tokio::test]
    async fn remove_key_refuses_to_empty_the_bundle() {
        let (svc, owner_id) = service_with_owner().await;
        let contact = svc.create(&owner_id, "Maria", &[email_key()]).await.unwrap();
        let key_id = contact.keys[0].id.clone();

        match svc.remove_key(&contact.id, &key_id).await {
            Err(ServiceError::InvalidContact(ContactError::EmptyBundle)) => {}
            other => panic!("expected EmptyBundle, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn remove_key_drops_one_of_several() {
        let (svc, owner_id) = service_with_owner().await;
        let contact = svc.create(&owner_id, "Maria", &[email_key()]).await.unwrap();
        let phone = NewContactKey {
            value: "11999998888".into(),
            key_type: PixKeyType::Phone,
        };
        let contact = svc.add_key(&contact.id, phone).await.unwrap();
        let phone_id = contact.keys[1].id.clone();

        let shrunk = svc.remove_key(&contact.id, &phone_id).await.unwrap();
        assert_eq!(shrunk.keys.len(), 1);
        assert_eq!(shrunk.keys[0].key_type, PixKeyType::Email);
    }

    #[tokio::test]
    async fn delete_reports_missing_contacts() {
        let (svc, owner_id) = service_with_owner().await;
        let contact = svc.create(&owner_id, "Maria", &[email_key()]).await.unwrap();

        svc.delete(&contact.id).await.unwrap();
        match svc.delete(&contact.id).await {
            Err(ServiceError::NotFound { .. }) => {}
            other => panic!("expected NotFound, got {other:?}"),
        }
    }
}
