//! Use case error types.

use common::{ItemId, StoreName};
use domain::{DomainError, RepositoryError};
use thiserror::Error;

use crate::dto::FailureKind;

/// Errors that can occur while processing an order.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProcessOrderError {
    /// The raw request could not be turned into domain values.
    #[error("Invalid order for item '{item_id}' in store '{store}': {reason}")]
    InvalidRequest {
        store: StoreName,
        item_id: ItemId,
        reason: DomainError,
    },

    /// The requested store does not exist.
    #[error("Store '{0}' not found")]
    StoreNotFound(StoreName),

    /// The store aggregate rejected the order.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Another request with the same idempotency key has not finished yet.
    #[error("Order with idempotency key '{key}' is already being processed for store '{store}'")]
    RequestInProgress { store: StoreName, key: String },

    /// Every attempt to save the store lost an optimistic-lock race.
    #[error("Store '{store}' was modified concurrently; gave up after {attempts} attempts")]
    ConcurrentModification { store: StoreName, attempts: u32 },

    /// A repository failed for a reason other than a version conflict.
    #[error("Storage error for store '{store}': {source}")]
    Repository {
        store: StoreName,
        #[source]
        source: RepositoryError,
    },
}

impl ProcessOrderError {
    /// Classifies the error for adapters that map outcomes to status codes.
    pub fn kind(&self) -> FailureKind {
        match self {
            ProcessOrderError::InvalidRequest { .. } => FailureKind::InvalidInput,
            ProcessOrderError::StoreNotFound(_) => FailureKind::NotFound,
            ProcessOrderError::Domain(err) => match err {
                DomainError::InvalidValue(_) => FailureKind::InvalidInput,
                DomainError::ItemNotFound { .. } => FailureKind::NotFound,
                DomainError::InsufficientAvailability { .. } => FailureKind::Unavailable,
                DomainError::DuplicateItem { .. } => FailureKind::Conflict,
            },
            ProcessOrderError::RequestInProgress { .. }
            | ProcessOrderError::ConcurrentModification { .. } => FailureKind::Conflict,
            ProcessOrderError::Repository { .. } => FailureKind::Internal,
        }
    }

    /// Message safe to show to the caller.
    ///
    /// Storage failures are replaced by a generic message naming the store;
    /// backend details only go to the logs.
    pub fn user_message(&self) -> String {
        match self {
            ProcessOrderError::Repository { store, .. } => {
                format!("Order for store '{store}' could not be completed, please retry later")
            }
            other => other.to_string(),
        }
    }
}
