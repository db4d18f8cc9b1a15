use std::sync::Arc;
use tracing::instrument;

use crate::metrics::Metrics;

use super::aggregate::Order;
use super::commands::OrderCommand;
use super::entities::{EntityId, OrderProduct};
use super::errors::OrderError;
use super::repository::OrderRepository;
use super::value_objects::{PaymentStatus, Status};

// ============================================================================
// Order Command Handler
// ============================================================================
//
// Orchestrates: load -> one command -> save.
//
// Every use case returns its outcome as a value. A missing order is
// `ResourceNotFound` and never reaches `save`; a rejected literal or a
// refused transition is returned the same way, also without saving.
//
// ============================================================================

pub struct OrderCommandHandler {
    repository: Arc<dyn OrderRepository>,
    metrics: Arc<Metrics>,
}

impl OrderCommandHandler {
    pub fn new(repository: Arc<dyn OrderRepository>, metrics: Arc<Metrics>) -> Self {
        Self { repository, metrics }
    }

    async fn load(&self, id: &EntityId) -> Result<Order, OrderError> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| OrderError::ResourceNotFound(id.to_string()))
    }

    async fn apply(&self, mut order: Order, command: OrderCommand) -> Result<Order, OrderError> {
        if let Err(e) = order.handle_command(&command) {
            tracing::warn!(
                order_id = %order.id(),
                command = command.name(),
                error = %e,
                "Order command refused"
            );
            self.metrics.record_order_transition(command.name(), false);
            return Err(e);
        }

        let saved = self.repository.save(order).await?;
        self.metrics.record_order_transition(command.name(), true);

        tracing::info!(
            order_id = %saved.id(),
            command = command.name(),
            status = saved.status().value().unwrap_or_default(),
            "Order command applied"
        );

        Ok(saved)
    }

    /// Load the order and apply one command to it.
    pub async fn handle(&self, id: &EntityId, command: OrderCommand) -> Result<Order, OrderError> {
        let order = self.load(id).await?;
        self.apply(order, command).await
    }

    /// Register a new order with its product lines. Status and payment
    /// status stay unassigned.
    #[instrument(skip(self, product_ids))]
    pub async fn place_order(
        &self,
        customer_id: EntityId,
        product_ids: Vec<EntityId>,
    ) -> Result<Order, OrderError> {
        let mut order = Order::create(customer_id);
        let lines = product_ids
            .into_iter()
            .map(|product_id| OrderProduct::new(order.id().clone(), product_id))
            .collect();
        order.set_products(lines);

        let saved = self.repository.save(order).await?;
        if saved.products().is_empty() {
            tracing::warn!(order_id = %saved.id(), "Order placed without products");
        }
        tracing::info!(
            order_id = %saved.id(),
            lines = saved.products().len(),
            "Order placed"
        );
        Ok(saved)
    }

    #[instrument(skip(self))]
    pub async fn checkout(&self, id: &EntityId) -> Result<Order, OrderError> {
        self.handle(id, OrderCommand::Checkout).await
    }

    /// With a literal, assign it directly. Without one, advance a single
    /// stage through the guarded transition.
    #[instrument(skip(self))]
    pub async fn update_status(&self, id: &EntityId, status: Option<&str>) -> Result<Order, OrderError> {
        let order = self.load(id).await?;

        let command = match status {
            Some(raw) => OrderCommand::SetStatus { status: Status::create(raw)? },
            None => OrderCommand::AdvanceStatus,
        };

        self.apply(order, command).await
    }

    #[instrument(skip(self))]
    pub async fn update_payment_status(&self, id: &EntityId, payment_status: &str) -> Result<Order, OrderError> {
        let order = self.load(id).await?;
        let payment_status = PaymentStatus::create(payment_status)?;

        self.apply(order, OrderCommand::SetPaymentStatus { payment_status }).await
    }

    /// Payment status literal, or an empty string when none is assigned.
    #[instrument(skip(self))]
    pub async fn payment_status(&self, id: &EntityId) -> Result<String, OrderError> {
        let order = self.load(id).await?;
        Ok(order.payment_status().value().unwrap_or_default().to_string())
    }

    pub async fn all_orders(&self) -> Result<Vec<Order>, OrderError> {
        self.repository.find_all().await
    }
}
