//! Store aggregate and the items it sells.

mod aggregate;
mod item;
mod stocked;
mod unlimited;

pub use aggregate::Store;
pub use item::SellableItem;
pub use stocked::StockedItem;
pub use unlimited::UnlimitedItem;
