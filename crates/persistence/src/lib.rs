//! Repository adapters for the storefront.
//!
//! Only in-memory adapters are provided. They keep state behind
//! `Arc<RwLock<..>>`, so clones of a repository share the same data.

pub mod memory;

pub use memory::{InMemoryOrderRepository, InMemoryStoreRepository};
