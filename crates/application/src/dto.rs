//! Request and response objects crossing the use case boundary.

use chrono::{DateTime, Utc};
use common::{ItemId, OrderId, StoreName};
use domain::{Availability, Order};
use serde::{Deserialize, Serialize};

use crate::error::ProcessOrderError;

/// Raw purchase request as received from a controller.
///
/// `quantity` is kept as a plain integer; it only becomes a `Quantity` inside
/// the use case, where invalid values are rejected before any repository is
/// touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessOrderRequest {
    pub item_id: String,
    pub quantity: i64,
    pub store_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub idempotency_key: Option<String>,
}

impl ProcessOrderRequest {
    pub fn new(
        store_name: impl Into<String>,
        item_id: impl Into<String>,
        quantity: i64,
    ) -> Self {
        Self {
            item_id: item_id.into(),
            quantity,
            store_name: store_name.into(),
            idempotency_key: None,
        }
    }

    /// Attaches a client-chosen key; a repeated key replays the first result.
    pub fn with_idempotency_key(mut self, key: impl Into<String>) -> Self {
        self.idempotency_key = Some(key.into());
        self
    }
}

/// Successful outcome of a purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderConfirmation {
    pub order_id: OrderId,
    pub store_name: StoreName,
    pub item_id: ItemId,
    pub item_name: String,
    pub quantity: u32,
    pub unit_price: i64,
    pub total_price: i64,
    pub created_at: DateTime<Utc>,
    /// Availability of the item right after this order.
    pub remaining_availability: Availability,
}

impl OrderConfirmation {
    pub fn from_order(order: &Order, store_name: StoreName, remaining: Availability) -> Self {
        Self {
            order_id: order.order_id(),
            store_name,
            item_id: order.item_id().clone(),
            item_name: order.item_name().to_string(),
            quantity: order.quantity().value(),
            unit_price: order.unit_price().amount(),
            total_price: order.total_price().amount(),
            created_at: order.created_at(),
            remaining_availability: remaining,
        }
    }
}

/// Coarse classification of a failed purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The request carried an invalid value.
    InvalidInput,
    /// The store or item does not exist.
    NotFound,
    /// The item cannot supply the requested quantity.
    Unavailable,
    /// The store changed concurrently too many times.
    Conflict,
    /// Infrastructure failure.
    Internal,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::InvalidInput => "invalid_input",
            FailureKind::NotFound => "not_found",
            FailureKind::Unavailable => "unavailable",
            FailureKind::Conflict => "conflict",
            FailureKind::Internal => "internal",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Failed outcome of a purchase, with a message fit for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFailure {
    pub kind: FailureKind,
    pub error_message: String,
}

impl From<&ProcessOrderError> for OrderFailure {
    fn from(err: &ProcessOrderError) -> Self {
        Self {
            kind: err.kind(),
            error_message: err.user_message(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_deserializes_without_idempotency_key() {
        let request: ProcessOrderRequest = serde_json::from_value(serde_json::json!({
            "item_id": "p-001",
            "quantity": 3,
            "store_name": "Tokyo"
        }))
        .unwrap();

        assert_eq!(request, ProcessOrderRequest::new("Tokyo", "p-001", 3));
    }

    #[test]
    fn test_request_keeps_negative_quantity_raw() {
        let request: ProcessOrderRequest = serde_json::from_value(serde_json::json!({
            "item_id": "p-001",
            "quantity": -2,
            "store_name": "Tokyo",
            "idempotency_key": "abc"
        }))
        .unwrap();

        assert_eq!(request.quantity, -2);
        assert_eq!(request.idempotency_key.as_deref(), Some("abc"));
    }

    #[test]
    fn test_failure_kind_serialization() {
        assert_eq!(
            serde_json::to_value(FailureKind::InvalidInput).unwrap(),
            serde_json::json!("invalid_input")
        );
        assert_eq!(FailureKind::Unavailable.to_string(), "unavailable");
    }
}
