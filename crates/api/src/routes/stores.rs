//! Store catalog endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, State};
use common::StoreName;
use domain::{Aggregate, Availability, OrderRepository, SellableItem, StoreRepository};
use serde::Serialize;

use super::AppState;
use crate::error::ApiError;

#[derive(Serialize)]
pub struct StoreListResponse {
    pub stores: Vec<String>,
}

#[derive(Serialize)]
pub struct CatalogItemResponse {
    pub id: String,
    pub name: String,
    pub kind: &'static str,
    pub price: i64,
    pub availability: Availability,
}

impl From<&dyn SellableItem> for CatalogItemResponse {
    fn from(item: &dyn SellableItem) -> Self {
        Self {
            id: item.id().to_string(),
            name: item.name().to_string(),
            kind: item.kind(),
            price: item.price().amount(),
            availability: item.availability(),
        }
    }
}

#[derive(Serialize)]
pub struct StoreResponse {
    pub name: String,
    pub version: u64,
    pub items: Vec<CatalogItemResponse>,
}

/// GET /stores — lists store names.
#[tracing::instrument(skip(state))]
pub async fn list<S, O>(
    State(state): State<Arc<AppState<S, O>>>,
) -> Result<Json<StoreListResponse>, ApiError>
where
    S: StoreRepository + 'static,
    O: OrderRepository + 'static,
{
    let names = state.stores().list_names().await?;
    Ok(Json(StoreListResponse {
        stores: names.into_iter().map(|name| name.to_string()).collect(),
    }))
}

/// GET /stores/{store} — returns the catalog with current availability.
#[tracing::instrument(skip(state))]
pub async fn get<S, O>(
    State(state): State<Arc<AppState<S, O>>>,
    Path(store): Path<String>,
) -> Result<Json<StoreResponse>, ApiError>
where
    S: StoreRepository + 'static,
    O: OrderRepository + 'static,
{
    let store_name = StoreName::new(store);
    let store = state
        .stores()
        .find_by_name(&store_name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Store '{store_name}' not found")))?;

    let mut items: Vec<CatalogItemResponse> =
        store.items().map(CatalogItemResponse::from).collect();
    items.sort_by(|a, b| a.id.cmp(&b.id));

    Ok(Json(StoreResponse {
        name: store.name().to_string(),
        version: store.version().as_u64(),
        items,
    }))
}
