//! Health check endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use domain::{OrderRepository, StoreRepository};
use serde::Serialize;

use super::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub stores: usize,
}

/// GET /health — returns system health status.
///
/// Reports `degraded` with 503 when the store repository cannot be read.
#[tracing::instrument(skip(state))]
pub async fn check<S, O>(
    State(state): State<Arc<AppState<S, O>>>,
) -> (StatusCode, Json<HealthResponse>)
where
    S: StoreRepository + 'static,
    O: OrderRepository + 'static,
{
    match state.stores().list_names().await {
        Ok(names) => (
            StatusCode::OK,
            Json(HealthResponse {
                status: "ok",
                stores: names.len(),
            }),
        ),
        Err(err) => {
            tracing::error!(error = %err, "health check could not reach store repository");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded",
                    stores: 0,
                }),
            )
        }
    }
}
