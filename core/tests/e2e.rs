//! End-to-end integration tests for the Tucano core.
//!
//! These tests exercise the full payment-initiation flow: owner
//! registration, contact creation, transfer creation, and lifecycle
//! transitions, all through the application services over the in-memory
//! stores. Each test builds its own world — no shared state, no ordering
//! dependencies.

use std::sync::Arc;

use chrono::{Duration, Utc};

use tucano_core::contact::NewContactKey;
use tucano_core::keys::PixKeyType;
use tucano_core::service::{ContactService, OwnerService, ServiceError, TransferService};
use tucano_core::store::memory::{
    MemoryContactStore, MemoryOwnerDirectory, MemoryTransactionStore,
};
use tucano_core::transaction::{Amount, NewTransaction, TransactionKind, TransactionStatus};

// ---------------------------------------------------------------------------
// Test Helpers
// ---------------------------------------------------------------------------

/// Wires the three services over fresh in-memory stores.
fn setup() -> (OwnerService, ContactService, TransferService) {
    let owners = Arc::new(MemoryOwnerDirectory::new());
    let contacts = Arc::new(MemoryContactStore::new());
    let transactions = Arc::new(MemoryTransactionStore::new());

    (
        OwnerService::new(owners.clone()),
        ContactService::new(contacts, owners.clone()),
        TransferService::new(transactions, owners),
    )
}

fn transfer_to(owner_id: &str, key: &str, key_type: PixKeyType) -> NewTransaction {
    NewTransaction {
        owner_id: owner_id.into(),
        amount: Amount::from_centavos(1_000),
        description: "dinner split".into(),
        target_key: key.into(),
        target_key_type: key_type,
        kind: TransactionKind::Immediate,
        scheduled_at: None,
    }
}

// ---------------------------------------------------------------------------
// Scenarios
// ---------------------------------------------------------------------------

#[tokio::test]
async fn immediate_transfer_full_lifecycle() {
    let (owners, contacts, transfers) = setup();

    // Register the owner.
    let owner = owners.create("A", "a@a.com", "11144477735").await.unwrap();

    // Save a payee with a single email key.
    let contact = contacts
        .create(
            &owner.id,
            "Alice",
            &[NewContactKey {
                value: "a@a.com".into(),
                key_type: PixKeyType::Email,
            }],
        )
        .await
        .unwrap();
    assert!(contact.has_valid_keys());

    // Initiate an immediate transfer of R$ 10,00 against that key.
    let tx = transfers
        .create(NewTransaction {
            amount: Amount::from_centavos(1_000),
            ..transfer_to(&owner.id, &contact.keys[0].value, PixKeyType::Email)
        })
        .await
        .unwrap();
    assert_eq!(tx.status, TransactionStatus::Pending);
    assert!(tx.can_be_executed());

    // Execute right away.
    let executed = transfers.execute(&tx.id).await.unwrap();
    assert_eq!(executed.status, TransactionStatus::Executed);
    assert!(executed.executed_at.is_some());

    // The stored version is the executed one.
    let stored = transfers.get(&tx.id).await.unwrap();
    assert_eq!(stored.status, TransactionStatus::Executed);
}

#[tokio::test]
async fn scheduled_transfer_waits_for_its_window() {
    let (owners, _, transfers) = setup();
    let owner = owners.create("Bia", "bia@mail.co", "12345678909").await.unwrap();

    let tx = transfers
        .create(NewTransaction {
            kind: TransactionKind::Scheduled,
            scheduled_at: Some(Utc::now() + Duration::hours(2)),
            ..transfer_to(&owner.id, "11999998888", PixKeyType::Phone)
        })
        .await
        .unwrap();

    // Not due yet: neither directly executable nor in the pickup set.
    assert!(!tx.can_be_executed());
    assert!(transfers.due_scheduled(Utc::now()).await.unwrap().is_empty());
    match transfers.execute(&tx.id).await {
        Err(ServiceError::Transition(_)) => {}
        other => panic!("expected a transition error, got {other:?}"),
    }

    // Still cancellable while it waits.
    let cancelled = transfers.cancel(&tx.id).await.unwrap();
    assert_eq!(cancelled.status, TransactionStatus::Cancelled);
}

#[tokio::test]
async fn automatic_transfers_surface_in_pickup_order() {
    let (owners, _, transfers) = setup();
    let owner = owners.create("Caio", "caio@mail.co", "11144477735").await.unwrap();
    let now = Utc::now();

    let second = transfers
        .create(NewTransaction {
            kind: TransactionKind::Automatic,
            scheduled_at: Some(now - Duration::hours(1)),
            ..transfer_to(&owner.id, "caio@mail.co", PixKeyType::Email)
        })
        .await
        .unwrap();

    let first = transfers
        .create(NewTransaction {
            kind: TransactionKind::Automatic,
            scheduled_at: Some(now - Duration::hours(5)),
            ..transfer_to(&owner.id, "11999998888", PixKeyType::Phone)
        })
        .await
        .unwrap();

    let due = transfers.due_automatic(now).await.unwrap();
    assert_eq!(
        due.iter().map(|t| t.id.as_str()).collect::<Vec<_>>(),
        vec![first.id.as_str(), second.id.as_str()],
        "pickup must be ordered by ascending schedule"
    );

    // Executing both empties the pickup set.
    for tx in due {
        transfers.execute(&tx.id).await.unwrap();
    }
    assert!(transfers.due_automatic(now).await.unwrap().is_empty());
}

#[tokio::test]
async fn invalid_target_keys_block_creation() {
    let (owners, _, transfers) = setup();
    let owner = owners.create("Davi", "davi@mail.co", "12345678909").await.unwrap();

    match transfers
        .create(transfer_to(&owner.id, "11111111111", PixKeyType::Cpf))
        .await
    {
        Err(ServiceError::InvalidTransaction(_)) => {}
        other => panic!("expected InvalidTransaction, got {other:?}"),
    }
}

#[tokio::test]
async fn owner_listing_sees_all_their_transfers() {
    let (owners, _, transfers) = setup();
    let owner = owners.create("Eva", "eva@mail.co", "11144477735").await.unwrap();

    for _ in 0..3 {
        transfers
            .create(transfer_to(&owner.id, "eva@mail.co", PixKeyType::Email))
            .await
            .unwrap();
    }

    let listed = transfers.list_by_owner(&owner.id).await.unwrap();
    assert_eq!(listed.len(), 3);
    assert!(listed
        .iter()
        .all(|t| t.status == TransactionStatus::Pending));

    let pending = transfers
        .list_by_status(TransactionStatus::Pending)
        .await
        .unwrap();
    assert_eq!(pending.len(), 3);
}
