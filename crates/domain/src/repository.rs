//! Persistence ports for stores and orders.
//!
//! Implementations live in infrastructure crates; the domain and application
//! layers only depend on these traits.

use async_trait::async_trait;
use common::{OrderId, StoreName, Version};
use thiserror::Error;

use crate::order::Order;
use crate::store::Store;

/// Errors that can occur when interacting with a repository.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// The persisted store moved on since it was loaded.
    #[error(
        "Concurrent modification of store '{store}': expected version {expected}, found {actual}"
    )]
    ConcurrencyConflict {
        store: StoreName,
        expected: Version,
        actual: Version,
    },

    /// An order with the same id was already recorded.
    #[error("Order {0} has already been recorded")]
    DuplicateOrder(OrderId),

    /// The storage backend failed.
    #[error("Storage backend error: {0}")]
    Backend(String),
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

/// Loads and saves whole store aggregates.
#[async_trait]
pub trait StoreRepository: Send + Sync {
    /// Loads a store by name.
    ///
    /// The returned store carries the version it was persisted at.
    async fn find_by_name(&self, name: &StoreName) -> Result<Option<Store>>;

    /// Persists the entire store, including its full catalog.
    ///
    /// Fails with `ConcurrencyConflict` if the persisted version is not the
    /// version the store was loaded at (or, for a new store, if a store with
    /// that name already exists). Returns the new version, which the caller
    /// assigns to the aggregate.
    async fn save(&self, store: &Store) -> Result<Version>;

    /// Returns the names of all persisted stores.
    async fn list_names(&self) -> Result<Vec<StoreName>>;
}

/// Append-only record of completed orders.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Records an order for the given store.
    ///
    /// Orders are never updated; recording the same order id twice fails
    /// with `DuplicateOrder`.
    async fn save(&self, order: &Order, store_name: &StoreName) -> Result<()>;

    /// Returns the orders recorded for a store, oldest first.
    async fn find_by_store(&self, store_name: &StoreName) -> Result<Vec<Order>>;

    /// Looks up a single order.
    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>>;
}
