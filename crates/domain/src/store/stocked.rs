//! Items backed by a finite, countable inventory.

use common::ItemId;
use serde::{Deserialize, Serialize};

use super::SellableItem;
use crate::error::DomainError;
use crate::value_objects::{Availability, Money, Quantity, StockLevel};

/// A physical item with a finite stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockedItem {
    id: ItemId,
    name: String,
    price: Money,
    stock: StockLevel,
}

impl StockedItem {
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money,
        stock: StockLevel,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            stock,
        }
    }

    pub fn stock(&self) -> StockLevel {
        self.stock
    }
}

impl SellableItem for StockedItem {
    fn id(&self) -> &ItemId {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn price(&self) -> Money {
        self.price
    }

    fn kind(&self) -> &'static str {
        "stocked"
    }

    fn is_available(&self, quantity: Quantity) -> bool {
        self.stock.covers(quantity)
    }

    fn consume(&mut self, quantity: Quantity) -> Result<(), DomainError> {
        let remaining =
            self.stock
                .take(quantity)
                .ok_or_else(|| DomainError::InsufficientAvailability {
                    item_id: self.id.clone(),
                    item_name: self.name.clone(),
                    requested: quantity.value(),
                    available: Some(self.stock.units()),
                })?;
        self.stock = remaining;
        Ok(())
    }

    fn availability(&self) -> Availability {
        Availability::Limited {
            remaining: self.stock.units(),
        }
    }

    fn clone_box(&self) -> Box<dyn SellableItem> {
        Box::new(self.clone())
    }
}
