//! JSON presenter for the process-order output port.

use application::{FailureKind, OrderConfirmation, OrderFailure, OrderOutputPort};
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use domain::Availability;
use serde::Serialize;

/// Body returned for an accepted order.
#[derive(Debug, Serialize)]
pub struct OrderAcceptedResponse {
    pub order_id: String,
    pub store_name: String,
    pub item_id: String,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub total_price: i64,
    pub created_at: String,
    pub remaining_availability: Availability,
}

impl From<OrderConfirmation> for OrderAcceptedResponse {
    fn from(confirmation: OrderConfirmation) -> Self {
        Self {
            order_id: confirmation.order_id.to_string(),
            store_name: confirmation.store_name.to_string(),
            item_id: confirmation.item_id.to_string(),
            item_name: confirmation.item_name,
            quantity: confirmation.quantity,
            unit_price: confirmation.unit_price,
            total_price: confirmation.total_price,
            created_at: confirmation.created_at.to_rfc3339(),
            remaining_availability: confirmation.remaining_availability,
        }
    }
}

/// Body returned for a rejected order.
#[derive(Debug, Serialize)]
pub struct OrderRejectedResponse {
    pub error: String,
    pub kind: FailureKind,
}

/// Turns use case outcomes into HTTP responses.
#[derive(Debug, Default)]
pub struct JsonPresenter {
    response: Option<(StatusCode, serde_json::Value)>,
}

impl JsonPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> Option<StatusCode> {
        self.response.as_ref().map(|(status, _)| *status)
    }
}

pub fn status_for(kind: FailureKind) -> StatusCode {
    match kind {
        FailureKind::InvalidInput => StatusCode::BAD_REQUEST,
        FailureKind::NotFound => StatusCode::NOT_FOUND,
        FailureKind::Unavailable | FailureKind::Conflict => StatusCode::CONFLICT,
        FailureKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl OrderOutputPort for JsonPresenter {
    fn success(&mut self, confirmation: OrderConfirmation) {
        let body = OrderAcceptedResponse::from(confirmation);
        self.response = Some((StatusCode::CREATED, serde_json::json!(body)));
    }

    fn failure(&mut self, failure: OrderFailure) {
        let body = OrderRejectedResponse {
            error: failure.error_message,
            kind: failure.kind,
        };
        self.response = Some((status_for(failure.kind), serde_json::json!(body)));
    }
}

impl IntoResponse for JsonPresenter {
    fn into_response(self) -> Response {
        match self.response {
            Some((status, body)) => (status, Json(body)).into_response(),
            None => {
                tracing::error!("order handled without an outcome");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(serde_json::json!({ "error": "no outcome reported" })),
                )
                    .into_response()
            }
        }
    }
}
