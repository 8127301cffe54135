//! Core aggregate trait.

use common::Version;

/// Trait for aggregate roots.
///
/// An aggregate is a cluster of domain objects treated as a single unit for
/// consistency. Repositories persist and load aggregates as a whole, and use
/// the version to detect concurrent modifications.
pub trait Aggregate: Send + Sync {
    /// The identity type of the aggregate.
    type Id: Clone + Eq + std::hash::Hash + std::fmt::Display + Send + Sync;

    /// Returns the aggregate type name, used in logs and error messages.
    fn aggregate_type() -> &'static str;

    /// Returns the aggregate's identity.
    fn id(&self) -> &Self::Id;

    /// Returns the version the aggregate was loaded at.
    ///
    /// A freshly constructed aggregate is at [`Version::initial`].
    fn version(&self) -> Version;

    /// Sets the aggregate version.
    ///
    /// Called after a repository has persisted the aggregate.
    fn set_version(&mut self, version: Version);
}
