// ============================================================================
// Production Aggregation Workflow
// ============================================================================
//
// Builds the kitchen's views by combining local orders with customer and
// product snapshots from the order-domain service, and pushes production
// status changes out to both sibling services.
//
// Writes are strictly sequential: the order service is updated first and
// the payment service is only told once that succeeded. There is no
// compensation if the second call fails.
//
// ============================================================================

mod errors;
mod planning;
mod views;

use chrono::Utc;
use futures_util::future::try_join_all;
use std::sync::Arc;
use tracing::instrument;

use crate::domain::order::OrderCommandHandler;
use crate::gateway::ProductionGateway;
use crate::metrics::Metrics;

use planning::{estimated_time, priority, production_notes};

pub use errors::ProductionError;
pub use views::*;

/// Status sent to the sibling services when the kitchen finishes an order.
pub const READY: &str = "ready";
/// Status sent when a paid order enters the kitchen.
pub const PREPARING: &str = "preparing";

pub struct ProductionService {
    orders: Arc<OrderCommandHandler>,
    gateway: Arc<dyn ProductionGateway>,
    metrics: Arc<Metrics>,
}

impl ProductionService {
    pub fn new(
        orders: Arc<OrderCommandHandler>,
        gateway: Arc<dyn ProductionGateway>,
        metrics: Arc<Metrics>,
    ) -> Self {
        Self { orders, gateway, metrics }
    }

    /// Order plus customer, products, and derived kitchen metadata.
    #[instrument(skip(self))]
    pub async fn order_details(&self, order_id: &str) -> Result<OrderDetails, ProductionError> {
        let orders = self
            .orders
            .all_orders()
            .await
            .map_err(ProductionError::OrderLookup)?;

        let order = orders
            .into_iter()
            .find(|o| o.id().as_str() == order_id)
            .ok_or_else(|| ProductionError::OrderNotFound(order_id.to_string()))?;

        // Customer and products do not depend on each other
        let customer = self.gateway.get_customer_by_cpf(order.customer_id().as_str());
        let products = try_join_all(
            order
                .products()
                .items()
                .iter()
                .map(|line| self.gateway.get_product_by_id(line.product_id().as_str())),
        );
        let (customer, products) = tokio::try_join!(customer, products)?;

        let production_info = ProductionInfo {
            estimated_time: estimated_time(products.len()),
            priority: priority(order.created_at(), Utc::now()),
            notes: production_notes(&products),
        };

        tracing::debug!(
            order_id,
            products = products.len(),
            priority = ?production_info.priority,
            "Order details aggregated"
        );

        Ok(OrderDetails {
            order: OrderSummary::from(&order),
            customer,
            products,
            production_info,
        })
    }

    /// Kitchen queue, oldest first.
    #[instrument(skip(self))]
    pub async fn queue(&self, query: &QueueQuery) -> Result<ProductionQueue, ProductionError> {
        let mut orders = self
            .orders
            .all_orders()
            .await
            .map_err(ProductionError::QueueUnavailable)?;

        if let Some(status) = query.status.as_deref().filter(|s| !s.is_empty()) {
            orders.retain(|o| o.status().value() == Some(status));
        }

        orders.sort_by_key(|o| o.created_at());

        if let Some(limit) = query.limit.filter(|l| *l > 0) {
            orders.truncate(limit);
        }

        let queue: Vec<OrderView> = orders.iter().map(OrderView::from).collect();
        Ok(ProductionQueue {
            total: queue.len(),
            queue,
        })
    }

    /// Record "ready" on the order service, then tell the payment service.
    /// Either failure is returned as-is.
    #[instrument(skip(self, request))]
    pub async fn mark_ready(
        &self,
        order_id: &str,
        request: MarkReadyRequest,
    ) -> Result<ReadyConfirmation, ProductionError> {
        let result = self.publish_status(order_id, READY).await;
        self.metrics.record_workflow("mark_ready", result.is_ok());
        result?;

        let now = Utc::now();
        tracing::info!(order_id, "Order marked as ready");

        Ok(ReadyConfirmation {
            message: "Pedido marcado como pronto para entrega".to_string(),
            order_id: order_id.to_string(),
            status: READY.to_string(),
            notes: request.notes,
            ready_time: request.ready_time.unwrap_or_else(|| now.to_rfc3339()),
            updated_at: now,
        })
    }

    /// Confirm the order exists, move it to "preparing", notify payment.
    ///
    /// Any failure along the way comes back as the same `Aggregation`
    /// error; the cause is only logged.
    #[instrument(skip(self))]
    pub async fn payment_approved(&self, order_id: &str) -> Result<PaymentApprovedAck, ProductionError> {
        let result = self.start_preparation(order_id).await;
        self.metrics.record_workflow("payment_approved", result.is_ok());

        if let Err(e) = result {
            tracing::warn!(order_id, error = %e, "Payment approval could not be processed");
            return Err(ProductionError::payment_approved_failed());
        }

        tracing::info!(order_id, "Order sent to preparation");

        Ok(PaymentApprovedAck {
            message: "Pedido iniciado para preparação".to_string(),
            order_id: order_id.to_string(),
            status: PREPARING.to_string(),
        })
    }

    /// Free-form status override pushed to both services. The status is
    /// not checked against the production stages.
    #[instrument(skip(self, notes))]
    pub async fn update_production_status(
        &self,
        order_id: &str,
        status: &str,
        notes: Option<String>,
    ) -> Result<StatusUpdateAck, ProductionError> {
        let result = self.publish_status(order_id, status).await;
        self.metrics.record_workflow("update_production_status", result.is_ok());
        result?;

        Ok(StatusUpdateAck {
            message: "Status de produção atualizado com sucesso".to_string(),
            order_id: order_id.to_string(),
            status: status.to_string(),
            notes,
            updated_at: Utc::now(),
        })
    }

    async fn start_preparation(&self, order_id: &str) -> Result<(), ProductionError> {
        self.gateway.get_order_by_id(order_id).await?;
        self.publish_status(order_id, PREPARING).await
    }

    async fn publish_status(&self, order_id: &str, status: &str) -> Result<(), ProductionError> {
        self.gateway.update_order_status(order_id, status).await?;
        self.gateway.notify_payment_service(order_id, status).await?;
        Ok(())
    }
}
