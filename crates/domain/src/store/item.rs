//! The capability every sellable item provides to the store.

use common::ItemId;

use crate::error::DomainError;
use crate::value_objects::{Availability, Money, Quantity};

/// Something a store can sell.
///
/// The store only ever talks to items through this trait, so a new kind of
/// item is added by implementing it; the store and the use case stay
/// untouched. Implementations must keep the check/consume contract:
///
/// - [`is_available`](Self::is_available) is pure and never fails.
/// - [`consume`](Self::consume) changes state if and only if `is_available`
///   would currently return true, and otherwise fails with
///   [`DomainError::InsufficientAvailability`] leaving the item unchanged.
pub trait SellableItem: std::fmt::Debug + Send + Sync {
    fn id(&self) -> &ItemId;

    fn name(&self) -> &str;

    /// Unit price.
    fn price(&self) -> Money;

    /// Short label of the item kind, for display and logging only.
    fn kind(&self) -> &'static str;

    /// Returns true if `quantity` units can be sold right now.
    fn is_available(&self, quantity: Quantity) -> bool;

    /// Takes `quantity` units out of the item's availability.
    fn consume(&mut self, quantity: Quantity) -> Result<(), DomainError>;

    /// Current availability after all previous consumptions.
    fn availability(&self) -> Availability;

    /// Clones the item behind a fresh box.
    fn clone_box(&self) -> Box<dyn SellableItem>;
}

impl Clone for Box<dyn SellableItem> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}
