//! Identifiers and versioning shared by every storefront crate.

pub mod types;
pub mod version;

pub use types::{ItemId, OrderId, StoreName};
pub use version::Version;
