//! The record of a completed purchase.

use chrono::{DateTime, Utc};
use common::{ItemId, OrderId};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Money, Quantity};

/// Immutable snapshot of a successful purchase.
///
/// Orders are produced by [`Store::process_order`](crate::Store::process_order)
/// and handed to an order repository; they keep no reference to the store or
/// the item they came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    order_id: OrderId,
    item_id: ItemId,
    item_name: String,
    quantity: Quantity,
    unit_price: Money,
    total_price: Money,
    created_at: DateTime<Utc>,
}

impl Order {
    pub(crate) fn new(
        item_id: ItemId,
        item_name: String,
        quantity: Quantity,
        unit_price: Money,
        total_price: Money,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            order_id: OrderId::new(),
            item_id,
            item_name,
            quantity,
            unit_price,
            total_price,
            created_at,
        }
    }

    pub fn order_id(&self) -> OrderId {
        self.order_id
    }

    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    pub fn item_name(&self) -> &str {
        &self.item_name
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    /// Unit price multiplied by the ordered quantity.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Order {
        Order::new(
            ItemId::new("p-001"),
            "Ceramic Mug".to_string(),
            Quantity::new(3).unwrap(),
            Money::new(4000).unwrap(),
            Money::new(12000).unwrap(),
            Utc::now(),
        )
    }

    #[test]
    fn test_each_order_gets_its_own_id() {
        assert_ne!(sample().order_id(), sample().order_id());
    }

    #[test]
    fn test_order_serialization() {
        let order = sample();
        let json = serde_json::to_value(&order).unwrap();
        assert_eq!(json["item_name"], "Ceramic Mug");
        assert_eq!(json["quantity"], 3);
        assert_eq!(json["total_price"], 12000);

        let back: Order = serde_json::from_value(json).unwrap();
        assert_eq!(back, order);
    }
}
