//! Store aggregate implementation.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use common::{ItemId, StoreName, Version};

use super::SellableItem;
use crate::aggregate::Aggregate;
use crate::error::DomainError;
use crate::order::Order;
use crate::value_objects::{Availability, Quantity};

/// Store aggregate root.
///
/// Owns its catalog of sellable items exclusively: items are moved in through
/// [`add_item`](Self::add_item) and only change through
/// [`process_order`](Self::process_order). Cloning a store deep-clones the
/// catalog.
#[derive(Debug, Clone)]
pub struct Store {
    name: StoreName,

    /// Catalog keyed by item id.
    items: HashMap<ItemId, Box<dyn SellableItem>>,

    /// Version the store was loaded at, for optimistic concurrency.
    version: Version,
}

impl Aggregate for Store {
    type Id = StoreName;

    fn aggregate_type() -> &'static str {
        "Store"
    }

    fn id(&self) -> &StoreName {
        &self.name
    }

    fn version(&self) -> Version {
        self.version
    }

    fn set_version(&mut self, version: Version) {
        self.version = version;
    }
}

// Query methods
impl Store {
    /// Creates a store with an empty catalog.
    pub fn new(name: impl Into<StoreName>) -> Self {
        Self {
            name: name.into(),
            items: HashMap::new(),
            version: Version::initial(),
        }
    }

    pub fn name(&self) -> &StoreName {
        &self.name
    }

    /// Returns an item by id.
    pub fn item(&self, item_id: &ItemId) -> Option<&dyn SellableItem> {
        self.items.get(item_id).map(|item| &**item)
    }

    /// Returns all items in the catalog, in no particular order.
    pub fn items(&self) -> impl Iterator<Item = &dyn SellableItem> {
        self.items.values().map(|item| &**item)
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the current availability of an item.
    pub fn availability_of(&self, item_id: &ItemId) -> Option<Availability> {
        self.items.get(item_id).map(|item| item.availability())
    }
}

// Command methods
impl Store {
    /// Adds an item to the catalog.
    ///
    /// Item ids are unique within a store; adding a second item with an
    /// existing id fails and leaves the catalog unchanged.
    pub fn add_item(&mut self, item: impl SellableItem + 'static) -> Result<(), DomainError> {
        self.add_boxed_item(Box::new(item))
    }

    /// Adds an already boxed item to the catalog.
    pub fn add_boxed_item(&mut self, item: Box<dyn SellableItem>) -> Result<(), DomainError> {
        if self.items.contains_key(item.id()) {
            return Err(DomainError::DuplicateItem {
                store: self.name.clone(),
                item_id: item.id().clone(),
            });
        }
        self.items.insert(item.id().clone(), item);
        Ok(())
    }

    /// Sells `quantity` units of an item and returns the resulting order.
    ///
    /// Either the item's availability is reduced and an order is returned,
    /// or an error is returned and the catalog is left exactly as it was.
    pub fn process_order(
        &mut self,
        item_id: &ItemId,
        quantity: Quantity,
    ) -> Result<Order, DomainError> {
        self.process_order_at(item_id, quantity, Utc::now())
    }

    /// Same as [`process_order`](Self::process_order) with an explicit
    /// order timestamp.
    pub fn process_order_at(
        &mut self,
        item_id: &ItemId,
        quantity: Quantity,
        created_at: DateTime<Utc>,
    ) -> Result<Order, DomainError> {
        let item = self
            .items
            .get_mut(item_id)
            .ok_or_else(|| DomainError::ItemNotFound {
                store: self.name.clone(),
                item_id: item_id.clone(),
            })?;

        if !item.is_available(quantity) {
            return Err(DomainError::InsufficientAvailability {
                item_id: item_id.clone(),
                item_name: item.name().to_string(),
                requested: quantity.value(),
                available: item.availability().remaining(),
            });
        }

        // Priced before consuming so an overflow cannot leave stock reduced.
        let unit_price = item.price();
        let total_price = unit_price.multiply(quantity)?;

        item.consume(quantity)?;

        tracing::debug!(
            store = %self.name,
            item_id = %item_id,
            quantity = quantity.value(),
            total = total_price.amount(),
            "order processed"
        );

        Ok(Order::new(
            item_id.clone(),
            item.name().to_string(),
            quantity,
            unit_price,
            total_price,
            created_at,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{StockedItem, UnlimitedItem};
    use crate::value_objects::{Money, StockLevel};

    fn money(amount: i64) -> Money {
        Money::new(amount).unwrap()
    }

    fn qty(value: i64) -> Quantity {
        Quantity::new(value).unwrap()
    }

    fn tokyo() -> Store {
        let mut store = Store::new("Tokyo");
        store
            .add_item(StockedItem::new(
                "p-001",
                "Ceramic Mug",
                money(4000),
                StockLevel::new(10),
            ))
            .unwrap();
        store
            .add_item(StockedItem::new(
                "p-002",
                "Linen Towel",
                money(2500),
                StockLevel::new(5),
            ))
            .unwrap();
        store
            .add_item(UnlimitedItem::new("d-001", "Photo Pack", money(8000)))
            .unwrap();
        store
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = Store::new("Tokyo");
        assert_eq!(store.name().as_str(), "Tokyo");
        assert_eq!(store.item_count(), 0);
        assert_eq!(store.version(), Version::initial());
    }

    #[test]
    fn test_add_item_rejects_duplicate_id() {
        let mut store = tokyo();
        let result = store.add_item(UnlimitedItem::new("p-001", "Gift Card", money(1000)));

        assert_eq!(
            result,
            Err(DomainError::DuplicateItem {
                store: StoreName::new("Tokyo"),
                item_id: ItemId::new("p-001"),
            })
        );
        assert_eq!(store.item_count(), 3);
        assert_eq!(
            store.item(&ItemId::new("p-001")).unwrap().name(),
            "Ceramic Mug"
        );
    }

    #[test]
    fn test_process_order_stocked_item() {
        let mut store = tokyo();
        let order = store.process_order(&ItemId::new("p-001"), qty(3)).unwrap();

        assert_eq!(order.item_name(), "Ceramic Mug");
        assert_eq!(order.quantity(), qty(3));
        assert_eq!(order.unit_price(), money(4000));
        assert_eq!(order.total_price(), money(12000));
        assert_eq!(
            store.availability_of(&ItemId::new("p-001")),
            Some(Availability::Limited { remaining: 7 })
        );
    }

    #[test]
    fn test_process_order_insufficient_stock_leaves_catalog_unchanged() {
        let mut store = tokyo();
        let err = store
            .process_order(&ItemId::new("p-002"), qty(10))
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::InsufficientAvailability {
                item_id: ItemId::new("p-002"),
                item_name: "Linen Towel".to_string(),
                requested: 10,
                available: Some(5),
            }
        );
        assert!(err.to_string().contains("Linen Towel"));
        assert_eq!(
            store.availability_of(&ItemId::new("p-002")),
            Some(Availability::Limited { remaining: 5 })
        );
    }

    #[test]
    fn test_process_order_unlimited_item() {
        let mut store = tokyo();
        let order = store.process_order(&ItemId::new("d-001"), qty(50)).unwrap();
        assert_eq!(order.total_price(), money(400_000));

        let again = store.process_order(&ItemId::new("d-001"), qty(50)).unwrap();
        assert_eq!(again.total_price(), money(400_000));
        assert_eq!(
            store.availability_of(&ItemId::new("d-001")),
            Some(Availability::Unlimited)
        );
    }

    #[test]
    fn test_process_order_unknown_item() {
        let mut store = tokyo();
        let err = store
            .process_order(&ItemId::new("x-999"), qty(1))
            .unwrap_err();

        assert_eq!(
            err,
            DomainError::ItemNotFound {
                store: StoreName::new("Tokyo"),
                item_id: ItemId::new("x-999"),
            }
        );
        assert_eq!(store.item_count(), 3);
    }

    #[test]
    fn test_process_order_price_overflow_leaves_stock_untouched() {
        let mut store = Store::new("Tokyo");
        store
            .add_item(StockedItem::new(
                "p-900",
                "Gold Bar",
                money(i64::MAX),
                StockLevel::new(5),
            ))
            .unwrap();

        let result = store.process_order(&ItemId::new("p-900"), qty(2));

        assert!(matches!(result, Err(DomainError::InvalidValue(_))));
        assert_eq!(
            store.availability_of(&ItemId::new("p-900")),
            Some(Availability::Limited { remaining: 5 })
        );
    }

    #[test]
    fn test_process_order_at_uses_given_timestamp() {
        let mut store = tokyo();
        let at = DateTime::parse_from_rfc3339("2024-04-01T09:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let order = store
            .process_order_at(&ItemId::new("p-001"), qty(1), at)
            .unwrap();
        assert_eq!(order.created_at(), at);
    }

    #[test]
    fn test_clone_does_not_share_items() {
        let original = tokyo();
        let mut copy = original.clone();
        copy.process_order(&ItemId::new("p-001"), qty(10)).unwrap();

        assert_eq!(
            original.availability_of(&ItemId::new("p-001")),
            Some(Availability::Limited { remaining: 10 })
        );
        assert_eq!(
            copy.availability_of(&ItemId::new("p-001")),
            Some(Availability::Limited { remaining: 0 })
        );
    }

    #[test]
    fn test_items_iterates_whole_catalog() {
        let store = tokyo();
        let mut ids: Vec<_> = store.items().map(|item| item.id().to_string()).collect();
        ids.sort();
        assert_eq!(ids, vec!["d-001", "p-001", "p-002"]);
    }
}
