//! Order placement and order history endpoints.

use std::sync::Arc;

use application::ProcessOrderRequest;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::response::IntoResponse;
use common::StoreName;
use domain::{Order, OrderRepository, StoreRepository};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::error::ApiError;
use crate::presenter::JsonPresenter;

/// Header that may carry the idempotency key instead of the body.
pub const IDEMPOTENCY_KEY_HEADER: &str = "idempotency-key";

// -- Request types --

#[derive(Debug, Deserialize)]
pub struct PlaceOrderBody {
    pub item_id: String,
    pub quantity: i64,
    #[serde(default)]
    pub idempotency_key: Option<String>,
}

impl PlaceOrderBody {
    /// Builds the use case request; a key in the body wins over the header.
    pub fn into_request(self, store: String, header_key: Option<String>) -> ProcessOrderRequest {
        let request = ProcessOrderRequest::new(store, self.item_id, self.quantity);
        match self.idempotency_key.or(header_key) {
            Some(key) => request.with_idempotency_key(key),
            None => request,
        }
    }
}

// -- Response types --

#[derive(Serialize)]
pub struct OrderRecordResponse {
    pub order_id: String,
    pub item_id: String,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub total_price: i64,
    pub created_at: String,
}

impl From<&Order> for OrderRecordResponse {
    fn from(order: &Order) -> Self {
        Self {
            order_id: order.order_id().to_string(),
            item_id: order.item_id().to_string(),
            item_name: order.item_name().to_string(),
            quantity: order.quantity().value(),
            unit_price: order.unit_price().amount(),
            total_price: order.total_price().amount(),
            created_at: order.created_at().to_rfc3339(),
        }
    }
}

#[derive(Serialize)]
pub struct OrderListResponse {
    pub store_name: String,
    pub orders: Vec<OrderRecordResponse>,
}

// -- Handlers --

/// POST /stores/{store}/orders — places an order.
#[tracing::instrument(skip_all, fields(store = %store))]
pub async fn place<S, O>(
    State(state): State<Arc<AppState<S, O>>>,
    Path(store): Path<String>,
    headers: HeaderMap,
    Json(body): Json<PlaceOrderBody>,
) -> impl IntoResponse
where
    S: StoreRepository + 'static,
    O: OrderRepository + 'static,
{
    let header_key = headers
        .get(IDEMPOTENCY_KEY_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);

    let request = body.into_request(store, header_key);
    let mut presenter = JsonPresenter::new();
    state.use_case.execute(request, &mut presenter).await;
    presenter
}

/// GET /stores/{store}/orders — lists recorded orders in placement order.
#[tracing::instrument(skip(state))]
pub async fn list<S, O>(
    State(state): State<Arc<AppState<S, O>>>,
    Path(store): Path<String>,
) -> Result<Json<OrderListResponse>, ApiError>
where
    S: StoreRepository + 'static,
    O: OrderRepository + 'static,
{
    let store_name = StoreName::new(store);

    if state.stores().find_by_name(&store_name).await?.is_none() {
        return Err(ApiError::NotFound(format!("Store '{store_name}' not found")));
    }

    let orders = state.orders().find_by_store(&store_name).await?;

    Ok(Json(OrderListResponse {
        store_name: store_name.to_string(),
        orders: orders.iter().map(OrderRecordResponse::from).collect(),
    }))
}
