use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::order::Order;
use crate::gateway::{Customer, Product};

use super::planning::Priority;

// ============================================================================
// Production Views - what the kitchen sees
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub id: String,
    pub customer_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        Self {
            id: order.id().to_string(),
            customer_id: order.customer_id().to_string(),
            status: order.status().value().map(str::to_string),
            payment_status: order.payment_status().value().map(str::to_string),
            created_at: order.created_at(),
            updated_at: order.updated_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductionInfo {
    pub estimated_time: u32,
    pub priority: Priority,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetails {
    pub order: OrderSummary,
    pub customer: Customer,
    pub products: Vec<Product>,
    pub production_info: ProductionInfo,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueLine {
    pub id: String,
    pub product_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: OrderSummary,
    pub products: Vec<QueueLine>,
}

impl From<&Order> for OrderView {
    fn from(order: &Order) -> Self {
        Self {
            order: OrderSummary::from(order),
            products: order
                .products()
                .items()
                .iter()
                .map(|line| QueueLine {
                    id: line.id().to_string(),
                    product_id: line.product_id().to_string(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductionQueue {
    pub queue: Vec<OrderView>,
    pub total: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueueQuery {
    pub status: Option<String>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkReadyRequest {
    pub notes: Option<String>,
    pub ready_time: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadyConfirmation {
    pub message: String,
    pub order_id: String,
    pub status: String,
    pub notes: Option<String>,
    pub ready_time: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentApprovedAck {
    pub message: String,
    pub order_id: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusUpdateAck {
    pub message: String,
    pub order_id: String,
    pub status: String,
    pub notes: Option<String>,
    pub updated_at: DateTime<Utc>,
}
