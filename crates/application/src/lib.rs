//! Application layer for the storefront.
//!
//! `ProcessOrderUseCase` sequences the repositories and the store aggregate
//! for a single purchase:
//! 1. Validate the raw quantity
//! 2. Load the store
//! 3. Process the order on the aggregate
//! 4. Save the store (retrying on optimistic-lock conflicts)
//! 5. Record the order
//!
//! Every outcome is reported through an `OrderOutputPort`; domain errors
//! never escape the use case.

pub mod dto;
pub mod error;
pub mod idempotency;
pub mod output;
pub mod process_order;
pub mod retry;

pub use dto::{FailureKind, OrderConfirmation, OrderFailure, ProcessOrderRequest};
pub use error::ProcessOrderError;
pub use idempotency::{
    IdempotencyKey, IdempotencyStore, InMemoryIdempotencyStore, RequestFingerprint, Reservation,
};
pub use output::{CollectingOutput, OrderOutcome, OrderOutputPort};
pub use process_order::ProcessOrderUseCase;
pub use retry::RetryPolicy;
