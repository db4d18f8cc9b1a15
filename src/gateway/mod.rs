// ============================================================================
// Remote Service Gateway
// ============================================================================
//
// The only place this service talks to its siblings:
// - order-domain service: orders, customers, products, status updates
// - payment service: production-status notifications
//
// ============================================================================

mod errors;
mod http;
mod models;
mod retrying;

#[cfg(test)]
pub(crate) mod mock_server;

use async_trait::async_trait;

pub use errors::GatewayError;
pub use http::HttpGateway;
pub use models::{Customer, Product, RemoteOrder};
pub use retrying::RetryingGateway;

/// Outbound operations used by the production workflows.
#[async_trait]
pub trait ProductionGateway: Send + Sync {
    /// GET /order/{id}
    async fn get_order_by_id(&self, order_id: &str) -> Result<RemoteOrder, GatewayError>;

    /// GET /customers/{cpf}
    async fn get_customer_by_cpf(&self, cpf: &str) -> Result<Customer, GatewayError>;

    /// GET /products/{id}
    async fn get_product_by_id(&self, product_id: &str) -> Result<Product, GatewayError>;

    /// PATCH /orders/{id}/status with `{status}`
    async fn update_order_status(&self, order_id: &str, status: &str) -> Result<(), GatewayError>;

    /// POST /orders/{id}/production-status with `{orderId, status}` on the
    /// payment service
    async fn notify_payment_service(&self, order_id: &str, status: &str) -> Result<(), GatewayError>;
}
