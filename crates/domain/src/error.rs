//! Domain error types.

use common::{ItemId, StoreName};
use thiserror::Error;

/// Errors raised by value objects and the store aggregate.
///
/// Every variant that concerns an item or a store names it, so the message
/// can be shown to a user as-is.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// A value object invariant was violated at construction.
    #[error("Invalid value: {0}")]
    InvalidValue(String),

    /// The requested item does not exist in the store's catalog.
    #[error("Item '{item_id}' not found in store '{store}'")]
    ItemNotFound { store: StoreName, item_id: ItemId },

    /// The item cannot supply the requested quantity.
    ///
    /// `available` is `None` when the item does not count its remaining
    /// units.
    #[error(
        "Insufficient availability for '{item_name}' ({item_id}): requested {requested}{}",
        available_suffix(.available)
    )]
    InsufficientAvailability {
        item_id: ItemId,
        item_name: String,
        requested: u32,
        available: Option<u32>,
    },

    /// An item with the same id is already part of the catalog.
    #[error("Item '{item_id}' already exists in store '{store}'")]
    DuplicateItem { store: StoreName, item_id: ItemId },
}

fn available_suffix(available: &Option<u32>) -> String {
    match available {
        Some(units) => format!(", available {units}"),
        None => String::new(),
    }
}

impl DomainError {
    pub(crate) fn invalid_value(message: impl Into<String>) -> Self {
        DomainError::InvalidValue(message.into())
    }
}
