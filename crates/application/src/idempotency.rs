//! Idempotency store trait and in-memory implementation.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Arc;

use async_trait::async_trait;
use common::{ItemId, StoreName};
use domain::{Quantity, RepositoryError};
use tokio::sync::RwLock;

use crate::dto::OrderConfirmation;

/// Client-chosen key scoped to one store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IdempotencyKey {
    store: StoreName,
    key: String,
}

impl IdempotencyKey {
    pub fn new(store: StoreName, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn store(&self) -> &StoreName {
        &self.store
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

/// The part of a request a repeated key must match to be replayed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RequestFingerprint {
    item_id: ItemId,
    quantity: u32,
}

impl RequestFingerprint {
    pub fn new(item_id: ItemId, quantity: Quantity) -> Self {
        Self {
            item_id,
            quantity: quantity.value(),
        }
    }
}

/// Result of trying to claim a key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reservation {
    /// The key was free and now belongs to the caller until it completes
    /// or releases it.
    Acquired,
    /// The key already completed; replay this confirmation.
    Completed(OrderConfirmation),
    /// Another request holding the key is still being processed.
    InProgress,
    /// The key was used for a request with a different fingerprint.
    Mismatch,
}

/// Remembers the confirmation issued for each idempotency key.
///
/// A key moves from free to pending with [`reserve`](Self::reserve), then
/// either to completed with [`complete`](Self::complete) or back to free
/// with [`release`](Self::release). `reserve` must be atomic: of two
/// concurrent callers with the same key, exactly one gets `Acquired`.
#[async_trait]
pub trait IdempotencyStore: Send + Sync {
    /// Claims `key` for a request with the given fingerprint.
    async fn reserve(
        &self,
        key: &IdempotencyKey,
        fingerprint: &RequestFingerprint,
    ) -> Result<Reservation, RepositoryError>;

    /// Records the confirmation issued for a reserved key.
    async fn complete(
        &self,
        key: IdempotencyKey,
        confirmation: OrderConfirmation,
    ) -> Result<(), RepositoryError>;

    /// Frees a reserved key whose request failed.
    async fn release(&self, key: &IdempotencyKey) -> Result<(), RepositoryError>;
}

#[derive(Debug, Clone)]
enum KeyState {
    Pending(RequestFingerprint),
    Completed {
        fingerprint: RequestFingerprint,
        confirmation: OrderConfirmation,
    },
}

impl KeyState {
    fn fingerprint(&self) -> &RequestFingerprint {
        match self {
            KeyState::Pending(fingerprint) => fingerprint,
            KeyState::Completed { fingerprint, .. } => fingerprint,
        }
    }
}

/// In-memory idempotency store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryIdempotencyStore {
    entries: Arc<RwLock<HashMap<IdempotencyKey, KeyState>>>,
}

impl InMemoryIdempotencyStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of pending and completed keys.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Returns the confirmation recorded under `key`, if it completed.
    pub async fn confirmation(&self, key: &IdempotencyKey) -> Option<OrderConfirmation> {
        match self.entries.read().await.get(key) {
            Some(KeyState::Completed { confirmation, .. }) => Some(confirmation.clone()),
            _ => None,
        }
    }
}

#[async_trait]
impl IdempotencyStore for InMemoryIdempotencyStore {
    async fn reserve(
        &self,
        key: &IdempotencyKey,
        fingerprint: &RequestFingerprint,
    ) -> Result<Reservation, RepositoryError> {
        let mut entries = self.entries.write().await;

        match entries.entry(key.clone()) {
            Entry::Vacant(slot) => {
                slot.insert(KeyState::Pending(fingerprint.clone()));
                Ok(Reservation::Acquired)
            }
            Entry::Occupied(slot) => {
                let state = slot.get();
                if state.fingerprint() != fingerprint {
                    return Ok(Reservation::Mismatch);
                }
                match state {
                    KeyState::Pending(_) => Ok(Reservation::InProgress),
                    KeyState::Completed { confirmation, .. } => {
                        Ok(Reservation::Completed(confirmation.clone()))
                    }
                }
            }
        }
    }

    async fn complete(
        &self,
        key: IdempotencyKey,
        confirmation: OrderConfirmation,
    ) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;

        // A completed key keeps its first confirmation.
        if let Some(KeyState::Pending(fingerprint)) = entries.get(&key) {
            let fingerprint = fingerprint.clone();
            entries.insert(
                key,
                KeyState::Completed {
                    fingerprint,
                    confirmation,
                },
            );
        }
        Ok(())
    }

    async fn release(&self, key: &IdempotencyKey) -> Result<(), RepositoryError> {
        let mut entries = self.entries.write().await;
        if matches!(entries.get(key), Some(KeyState::Pending(_))) {
            entries.remove(key);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use common::OrderId;
    use domain::Availability;

    fn confirmation(total: i64) -> OrderConfirmation {
        OrderConfirmation {
            order_id: OrderId::new(),
            store_name: StoreName::new("Tokyo"),
            item_id: ItemId::new("p-001"),
            item_name: "Ceramic Mug".to_string(),
            quantity: 1,
            unit_price: total,
            total_price: total,
            created_at: Utc::now(),
            remaining_availability: Availability::Limited { remaining: 9 },
        }
    }

    fn key(store: &str, key: &str) -> IdempotencyKey {
        IdempotencyKey::new(StoreName::new(store), key)
    }

    fn fingerprint(item: &str, quantity: i64) -> RequestFingerprint {
        RequestFingerprint::new(ItemId::new(item), Quantity::new(quantity).unwrap())
    }

    #[tokio::test]
    async fn test_reserve_then_complete_replays() {
        let store = InMemoryIdempotencyStore::new();
        let key = key("Tokyo", "req-1");
        let first = confirmation(4000);

        let reservation = store.reserve(&key, &fingerprint("p-001", 1)).await.unwrap();
        assert_eq!(reservation, Reservation::Acquired);

        store.complete(key.clone(), first.clone()).await.unwrap();

        let again = store.reserve(&key, &fingerprint("p-001", 1)).await.unwrap();
        assert_eq!(again, Reservation::Completed(first.clone()));
        assert_eq!(store.confirmation(&key).await, Some(first));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_pending_key_is_in_progress() {
        let store = InMemoryIdempotencyStore::new();
        let key = key("Tokyo", "req-1");

        store.reserve(&key, &fingerprint("p-001", 2)).await.unwrap();
        let second = store.reserve(&key, &fingerprint("p-001", 2)).await.unwrap();

        assert_eq!(second, Reservation::InProgress);
        assert!(store.confirmation(&key).await.is_none());
    }

    #[tokio::test]
    async fn test_different_request_under_same_key_is_a_mismatch() {
        let store = InMemoryIdempotencyStore::new();
        let key = key("Tokyo", "req-1");

        store.reserve(&key, &fingerprint("p-001", 2)).await.unwrap();
        assert_eq!(
            store.reserve(&key, &fingerprint("p-001", 3)).await.unwrap(),
            Reservation::Mismatch
        );

        store.complete(key.clone(), confirmation(8000)).await.unwrap();
        assert_eq!(
            store.reserve(&key, &fingerprint("p-002", 2)).await.unwrap(),
            Reservation::Mismatch
        );
    }

    #[tokio::test]
    async fn test_release_frees_the_key() {
        let store = InMemoryIdempotencyStore::new();
        let key = key("Tokyo", "req-1");

        store.reserve(&key, &fingerprint("p-001", 6)).await.unwrap();
        store.release(&key).await.unwrap();
        assert!(store.is_empty().await);

        let retry = store.reserve(&key, &fingerprint("p-001", 5)).await.unwrap();
        assert_eq!(retry, Reservation::Acquired);
    }

    #[tokio::test]
    async fn test_completed_key_keeps_first_confirmation() {
        let store = InMemoryIdempotencyStore::new();
        let key = key("Tokyo", "req-1");
        let first = confirmation(4000);

        store.reserve(&key, &fingerprint("p-001", 1)).await.unwrap();
        store.complete(key.clone(), first.clone()).await.unwrap();
        store.complete(key.clone(), confirmation(9999)).await.unwrap();
        store.release(&key).await.unwrap();

        assert_eq!(store.confirmation(&key).await, Some(first));
    }

    #[tokio::test]
    async fn test_keys_are_scoped_per_store() {
        let store = InMemoryIdempotencyStore::new();
        store
            .reserve(&key("Tokyo", "req-1"), &fingerprint("p-001", 1))
            .await
            .unwrap();

        let osaka = store
            .reserve(&key("Osaka", "req-1"), &fingerprint("p-001", 1))
            .await
            .unwrap();
        assert_eq!(osaka, Reservation::Acquired);
        assert_eq!(store.len().await, 2);
    }
}
