use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Remote Snapshots
// ============================================================================
//
// Read-only views of data owned by the order-domain service. They only live
// for the duration of one aggregation.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteOrder {
    pub id: String,
    pub customer_id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub cpf: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    pub category: String,
}

/// Body of `PATCH /orders/{id}/status`.
#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdateRequest<'a> {
    pub status: &'a str,
}

/// Body of `POST /orders/{id}/production-status` on the payment service.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProductionStatusNotification<'a> {
    pub order_id: &'a str,
    pub status: &'a str,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_order_tolerates_missing_optionals() {
        let order: RemoteOrder =
            serde_json::from_str(r#"{"id":"order-1","customerId":"customer-1"}"#).unwrap();

        assert_eq!(order.customer_id, "customer-1");
        assert!(order.status.is_none());
        assert!(order.created_at.is_none());
    }

    #[test]
    fn test_notification_body_shape() {
        let body = serde_json::to_value(ProductionStatusNotification {
            order_id: "order-1",
            status: "ready",
        })
        .unwrap();

        assert_eq!(body, serde_json::json!({"orderId": "order-1", "status": "ready"}));
    }
}
