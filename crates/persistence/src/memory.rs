use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::{OrderId, StoreName, Version};
use domain::repository::Result;
use domain::{Aggregate, Order, OrderRepository, RepositoryError, Store, StoreRepository};
use tokio::sync::RwLock;

/// In-memory store repository.
///
/// Stores are kept as deep clones, so a caller mutating a loaded store never
/// affects the persisted copy until it is saved. Saves use optimistic
/// concurrency on the store version.
#[derive(Clone, Default)]
pub struct InMemoryStoreRepository {
    stores: Arc<RwLock<HashMap<StoreName, Store>>>,
}

impl InMemoryStoreRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stores persisted.
    pub async fn store_count(&self) -> usize {
        self.stores.read().await.len()
    }

    /// Returns the persisted version of a store, if it exists.
    pub async fn version_of(&self, name: &StoreName) -> Option<Version> {
        self.stores.read().await.get(name).map(|store| store.version())
    }
}

#[async_trait]
impl StoreRepository for InMemoryStoreRepository {
    async fn find_by_name(&self, name: &StoreName) -> Result<Option<Store>> {
        let stores = self.stores.read().await;
        Ok(stores.get(name).cloned())
    }

    async fn save(&self, store: &Store) -> Result<Version> {
        let mut stores = self.stores.write().await;

        let current_version = stores
            .get(store.id())
            .map(|persisted| persisted.version())
            .unwrap_or(Version::initial());

        if current_version != store.version() {
            metrics::counter!("store_save_conflicts_total").increment(1);
            return Err(RepositoryError::ConcurrencyConflict {
                store: store.id().clone(),
                expected: store.version(),
                actual: current_version,
            });
        }

        let new_version = current_version.next();
        let mut persisted = store.clone();
        persisted.set_version(new_version);
        stores.insert(store.id().clone(), persisted);

        tracing::debug!(store = %store.id(), version = %new_version, "store saved");
        Ok(new_version)
    }

    async fn list_names(&self) -> Result<Vec<StoreName>> {
        let stores = self.stores.read().await;
        let mut names: Vec<_> = stores.keys().cloned().collect();
        names.sort();
        Ok(names)
    }
}

#[derive(Debug, Default)]
struct OrderLog {
    /// Orders in the order they were recorded, with their store.
    entries: Vec<(StoreName, Order)>,
    index: HashMap<OrderId, usize>,
}

/// In-memory, append-only order repository.
#[derive(Clone, Default)]
pub struct InMemoryOrderRepository {
    log: Arc<RwLock<OrderLog>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the total number of orders recorded across all stores.
    pub async fn order_count(&self) -> usize {
        self.log.read().await.entries.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn save(&self, order: &Order, store_name: &StoreName) -> Result<()> {
        let mut log = self.log.write().await;

        if log.index.contains_key(&order.order_id()) {
            return Err(RepositoryError::DuplicateOrder(order.order_id()));
        }

        let position = log.entries.len();
        log.entries.push((store_name.clone(), order.clone()));
        log.index.insert(order.order_id(), position);
        Ok(())
    }

    async fn find_by_store(&self, store_name: &StoreName) -> Result<Vec<Order>> {
        let log = self.log.read().await;
        Ok(log
            .entries
            .iter()
            .filter(|(store, _)| store == store_name)
            .map(|(_, order)| order.clone())
            .collect())
    }

    async fn find_by_id(&self, order_id: OrderId) -> Result<Option<Order>> {
        let log = self.log.read().await;
        Ok(log
            .index
            .get(&order_id)
            .and_then(|position| log.entries.get(*position))
            .map(|(_, order)| order.clone()))
    }
}
