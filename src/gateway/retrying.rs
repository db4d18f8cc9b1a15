use async_trait::async_trait;

use crate::utils::{retry_on_transient, RetryConfig};

use super::errors::GatewayError;
use super::models::{Customer, Product, RemoteOrder};
use super::ProductionGateway;

/// Caller-supplied retry policy around another gateway.
///
/// Only the three reads are retried, and only on transient errors.
/// The two writes pass straight through so a remote mutation is never
/// issued twice.
pub struct RetryingGateway<G> {
    inner: G,
    config: RetryConfig,
}

impl<G: ProductionGateway> RetryingGateway<G> {
    pub fn new(inner: G, config: RetryConfig) -> Self {
        Self { inner, config }
    }
}

#[async_trait]
impl<G: ProductionGateway> ProductionGateway for RetryingGateway<G> {
    async fn get_order_by_id(&self, order_id: &str) -> Result<RemoteOrder, GatewayError> {
        retry_on_transient(self.config.clone(), |_| self.inner.get_order_by_id(order_id))
            .await
            .into_result()
    }

    async fn get_customer_by_cpf(&self, cpf: &str) -> Result<Customer, GatewayError> {
        retry_on_transient(self.config.clone(), |_| self.inner.get_customer_by_cpf(cpf))
            .await
            .into_result()
    }

    async fn get_product_by_id(&self, product_id: &str) -> Result<Product, GatewayError> {
        retry_on_transient(self.config.clone(), |_| self.inner.get_product_by_id(product_id))
            .await
            .into_result()
    }

    async fn update_order_status(&self, order_id: &str, status: &str) -> Result<(), GatewayError> {
        self.inner.update_order_status(order_id, status).await
    }

    async fn notify_payment_service(&self, order_id: &str, status: &str) -> Result<(), GatewayError> {
        self.inner.notify_payment_service(order_id, status).await
    }
}
