//! Demo catalog loaded on startup.

use domain::{
    DomainError, Money, RepositoryError, StockLevel, StockedItem, Store, StoreRepository,
    UnlimitedItem,
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("invalid demo catalog: {0}")]
    Catalog(#[from] DomainError),

    #[error("failed to save demo store: {0}")]
    Storage(#[from] RepositoryError),
}

/// Builds the "Tokyo" demo store.
pub fn tokyo() -> Result<Store, DomainError> {
    let mut store = Store::new("Tokyo");
    store.add_item(StockedItem::new(
        "p-001",
        "Ceramic Mug",
        Money::new(4000)?,
        StockLevel::new(10),
    ))?;
    store.add_item(StockedItem::new(
        "p-002",
        "Linen Towel",
        Money::new(2500)?,
        StockLevel::new(5),
    ))?;
    store.add_item(UnlimitedItem::new(
        "d-001",
        "Photo Pack",
        Money::new(8000)?,
    ))?;
    Ok(store)
}

/// Builds the "Osaka" demo store, which shares item ids with Tokyo but not stock.
pub fn osaka() -> Result<Store, DomainError> {
    let mut store = Store::new("Osaka");
    store.add_item(StockedItem::new(
        "p-001",
        "Ceramic Mug",
        Money::new(4200)?,
        StockLevel::new(3),
    ))?;
    store.add_item(UnlimitedItem::new(
        "d-001",
        "Photo Pack",
        Money::new(8000)?,
    ))?;
    Ok(store)
}

/// Saves both demo stores.
pub async fn seed_demo_stores<S: StoreRepository>(stores: &S) -> Result<(), SeedError> {
    for store in [tokyo()?, osaka()?] {
        let version = stores.save(&store).await?;
        tracing::info!(
            store = %store.name(),
            items = store.item_count(),
            %version,
            "seeded demo store"
        );
    }
    Ok(())
}
