//! The process-order use case.

use std::sync::Arc;
use std::time::Instant;

use common::{ItemId, StoreName};
use domain::{
    Aggregate, DomainError, OrderRepository, Quantity, RepositoryError, StoreRepository,
};

use crate::dto::{OrderConfirmation, OrderFailure, ProcessOrderRequest};
use crate::error::ProcessOrderError;
use crate::idempotency::{IdempotencyKey, IdempotencyStore, RequestFingerprint, Reservation};
use crate::output::OrderOutputPort;
use crate::retry::RetryPolicy;

/// Orchestrates a single purchase against a store aggregate.
///
/// The use case holds no business rules of its own and never inspects the
/// kind of item being sold; it only sequences the repositories around
/// [`Store::process_order`](domain::Store::process_order).
pub struct ProcessOrderUseCase<S, O>
where
    S: StoreRepository,
    O: OrderRepository,
{
    stores: S,
    orders: O,
    idempotency: Option<Arc<dyn IdempotencyStore>>,
    retry: RetryPolicy,
}

impl<S, O> ProcessOrderUseCase<S, O>
where
    S: StoreRepository,
    O: OrderRepository,
{
    /// Creates a use case over the given repositories with the default retry policy.
    pub fn new(stores: S, orders: O) -> Self {
        Self {
            stores,
            orders,
            idempotency: None,
            retry: RetryPolicy::default(),
        }
    }

    /// Enables replay of requests carrying an idempotency key.
    pub fn with_idempotency(mut self, store: Arc<dyn IdempotencyStore>) -> Self {
        self.idempotency = Some(store);
        self
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn stores(&self) -> &S {
        &self.stores
    }

    pub fn orders(&self) -> &O {
        &self.orders
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Processes the request and reports the outcome through `output`.
    ///
    /// Every error is translated into an [`OrderFailure`]; nothing escapes.
    #[tracing::instrument(
        skip(self, request, output),
        fields(store = %request.store_name, item_id = %request.item_id, quantity = request.quantity)
    )]
    pub async fn execute<P>(&self, request: ProcessOrderRequest, output: &mut P)
    where
        P: OrderOutputPort + ?Sized,
    {
        let started = Instant::now();

        match self.process(request).await {
            Ok(confirmation) => {
                metrics::counter!("orders_processed_total").increment(1);
                tracing::info!(
                    order_id = %confirmation.order_id,
                    total = confirmation.total_price,
                    remaining = %confirmation.remaining_availability,
                    "order accepted"
                );
                output.success(confirmation);
            }
            Err(err) => {
                let failure = OrderFailure::from(&err);
                metrics::counter!("orders_rejected_total", "kind" => failure.kind.as_str())
                    .increment(1);
                if let ProcessOrderError::Repository { source, .. } = &err {
                    tracing::error!(error = %source, "order failed on storage");
                } else {
                    tracing::warn!(kind = %failure.kind, error = %err, "order rejected");
                }
                output.failure(failure);
            }
        }

        metrics::histogram!("order_processing_duration_seconds")
            .record(started.elapsed().as_secs_f64());
    }

    /// Processes the request and returns the typed outcome.
    pub async fn process(
        &self,
        request: ProcessOrderRequest,
    ) -> Result<OrderConfirmation, ProcessOrderError> {
        let store_name = StoreName::new(request.store_name);
        let item_id = ItemId::new(request.item_id);

        let quantity =
            Quantity::new(request.quantity).map_err(|reason| ProcessOrderError::InvalidRequest {
                store: store_name.clone(),
                item_id: item_id.clone(),
                reason,
            })?;

        let (Some(idempotency), Some(key)) = (&self.idempotency, request.idempotency_key) else {
            return self
                .process_with_retry(&store_name, &item_id, quantity)
                .await;
        };
        let key = IdempotencyKey::new(store_name.clone(), key);
        let fingerprint = RequestFingerprint::new(item_id.clone(), quantity);

        let reservation = idempotency
            .reserve(&key, &fingerprint)
            .await
            .map_err(|source| storage_error(&store_name, source))?;

        match reservation {
            Reservation::Acquired => {}
            Reservation::Completed(confirmation) => {
                tracing::info!(key = key.key(), "replaying idempotent order");
                return Ok(confirmation);
            }
            Reservation::InProgress => {
                return Err(ProcessOrderError::RequestInProgress {
                    store: store_name,
                    key: key.key().to_string(),
                });
            }
            Reservation::Mismatch => {
                return Err(ProcessOrderError::InvalidRequest {
                    store: store_name,
                    item_id,
                    reason: DomainError::InvalidValue(format!(
                        "idempotency key '{}' was already used for a different order",
                        key.key()
                    )),
                });
            }
        }

        match self
            .process_with_retry(&store_name, &item_id, quantity)
            .await
        {
            Ok(confirmation) => {
                // The sale is already committed; report it regardless.
                if let Err(err) = idempotency.complete(key, confirmation.clone()).await {
                    tracing::error!(error = %err, "failed to record idempotent order");
                }
                Ok(confirmation)
            }
            Err(err) => {
                if let Err(release_err) = idempotency.release(&key).await {
                    tracing::error!(error = %release_err, "failed to release idempotency key");
                }
                Err(err)
            }
        }
    }

    /// Runs load → process → save, restarting on version conflicts.
    async fn process_with_retry(
        &self,
        store_name: &StoreName,
        item_id: &ItemId,
        quantity: Quantity,
    ) -> Result<OrderConfirmation, ProcessOrderError> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            let mut store = self
                .stores
                .find_by_name(store_name)
                .await
                .map_err(|source| storage_error(store_name, source))?
                .ok_or_else(|| ProcessOrderError::StoreNotFound(store_name.clone()))?;

            let order = store.process_order(item_id, quantity)?;

            match self.stores.save(&store).await {
                Ok(version) => {
                    store.set_version(version);
                }
                Err(RepositoryError::ConcurrencyConflict {
                    expected, actual, ..
                }) => {
                    metrics::counter!("order_save_conflicts_total").increment(1);
                    if !self.retry.should_retry(attempt) {
                        return Err(ProcessOrderError::ConcurrentModification {
                            store: store_name.clone(),
                            attempts: attempt,
                        });
                    }
                    tracing::warn!(
                        attempt,
                        %expected,
                        %actual,
                        "store modified concurrently, retrying"
                    );
                    tokio::time::sleep(self.retry.backoff_after(attempt)).await;
                    continue;
                }
                Err(source) => return Err(storage_error(store_name, source)),
            }

            self.orders
                .save(&order, store_name)
                .await
                .map_err(|source| storage_error(store_name, source))?;

            let remaining = store.availability_of(item_id).ok_or_else(|| {
                DomainError::ItemNotFound {
                    store: store_name.clone(),
                    item_id: item_id.clone(),
                }
            })?;

            return Ok(OrderConfirmation::from_order(
                &order,
                store_name.clone(),
                remaining,
            ));
        }
    }
}

fn storage_error(store: &StoreName, source: RepositoryError) -> ProcessOrderError {
    ProcessOrderError::Repository {
        store: store.clone(),
        source,
    }
}
