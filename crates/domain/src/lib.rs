//! Domain layer for the storefront.
//!
//! This crate provides:
//! - Money, Quantity and StockLevel value objects
//! - The `SellableItem` capability with stocked and unlimited variants
//! - The `Store` aggregate root and its `process_order` transaction
//! - The `Order` record
//! - Repository ports for stores and orders

pub mod aggregate;
pub mod error;
pub mod order;
pub mod repository;
pub mod store;
pub mod value_objects;

pub use aggregate::Aggregate;
pub use error::DomainError;
pub use order::Order;
pub use repository::{OrderRepository, RepositoryError, StoreRepository};
pub use store::{SellableItem, StockedItem, Store, UnlimitedItem};
pub use value_objects::{Availability, Money, Quantity, StockLevel};
