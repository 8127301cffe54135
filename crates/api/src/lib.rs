//! HTTP API server with observability for the storefront order core.
//!
//! Translates HTTP requests into `ProcessOrderRequest`s, runs them through
//! the process-order use case and renders the outcome as JSON, with
//! structured logging (tracing) and Prometheus metrics.

pub mod config;
pub mod error;
pub mod presenter;
pub mod routes;
pub mod seed;

use std::sync::Arc;

use application::{InMemoryIdempotencyStore, ProcessOrderUseCase, RetryPolicy};
use axum::Router;
use axum::routing::get;
use domain::{OrderRepository, StoreRepository};
use metrics_exporter_prometheus::PrometheusHandle;
use persistence::{InMemoryOrderRepository, InMemoryStoreRepository};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use routes::AppState;
use seed::SeedError;

/// State wired with the in-memory repositories.
pub type InMemoryState = AppState<InMemoryStoreRepository, InMemoryOrderRepository>;

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<S, O>(state: Arc<AppState<S, O>>, metrics_handle: PrometheusHandle) -> Router
where
    S: StoreRepository + 'static,
    O: OrderRepository + 'static,
{
    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check::<S, O>))
        .route("/stores", get(routes::stores::list::<S, O>))
        .route("/stores/{store}", get(routes::stores::get::<S, O>))
        .route(
            "/stores/{store}/orders",
            get(routes::orders::list::<S, O>).post(routes::orders::place::<S, O>),
        )
        .with_state(state)
        .merge(metrics_router)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

/// Creates the application state over in-memory repositories.
///
/// Seeds the demo stores when `config.seed_demo_data` is set.
pub async fn create_default_state(config: &Config) -> Result<Arc<InMemoryState>, SeedError> {
    let stores = InMemoryStoreRepository::new();
    let orders = InMemoryOrderRepository::new();

    if config.seed_demo_data {
        seed::seed_demo_stores(&stores).await?;
    }

    let use_case = ProcessOrderUseCase::new(stores, orders)
        .with_idempotency(Arc::new(InMemoryIdempotencyStore::new()))
        .with_retry_policy(RetryPolicy::new(config.retry_attempts));

    Ok(Arc::new(AppState::new(use_case)))
}
