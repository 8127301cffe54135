//! HTTP route handlers.

pub mod health;
pub mod metrics;
pub mod orders;
pub mod stores;

use application::ProcessOrderUseCase;
use domain::{OrderRepository, StoreRepository};

/// Shared application state accessible from all handlers.
///
/// Read endpoints go through the repositories owned by the use case, so
/// every handler observes the same stores and orders.
pub struct AppState<S, O>
where
    S: StoreRepository,
    O: OrderRepository,
{
    pub use_case: ProcessOrderUseCase<S, O>,
}

impl<S, O> AppState<S, O>
where
    S: StoreRepository,
    O: OrderRepository,
{
    pub fn new(use_case: ProcessOrderUseCase<S, O>) -> Self {
        Self { use_case }
    }

    pub fn stores(&self) -> &S {
        self.use_case.stores()
    }

    pub fn orders(&self) -> &O {
        self.use_case.orders()
    }
}
