//! Items without an inventory concept, such as digital downloads.

use common::ItemId;
use serde::{Deserialize, Serialize};

use super::SellableItem;
use crate::error::DomainError;
use crate::value_objects::{Availability, Money, Quantity};

/// An item that can be sold in any quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlimitedItem {
    id: ItemId,
    name: String,
    price: Money,
}

impl UnlimitedItem {
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>, price: Money) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
        }
    }
}

impl SellableItem for UnlimitedItem {
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
        "unlimited"
    }

    fn is_available(&self, _quantity: Quantity) -> bool {
        true
    }

    fn consume(&mut self, _quantity: Quantity) -> Result<(), DomainError> {
        Ok(())
    }

    fn availability(&self) -> Availability {
        Availability::Unlimited
    }

    fn clone_box(&self) -> Box<dyn SellableItem> {
        Box::new(self.clone())
    }
}
