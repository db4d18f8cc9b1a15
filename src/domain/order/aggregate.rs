use chrono::{DateTime, Utc};

use super::commands::OrderCommand;
use super::entities::{EntityId, OrderProduct, OrderProductList};
use super::errors::OrderError;
use super::value_objects::{OrderPaymentStatus, OrderStatus, PaymentStatus, Status};

// ============================================================================
// Order Aggregate - Domain Logic
// ============================================================================
//
// Production stages only move forward:
//
//   Unset/Received -> InPreparation -> Ready -> Finalized
//
// and only while the payment is approved. `set_status` and
// `set_payment_status` deliberately skip that graph; they are the
// correction path for the production floor.
//
// ============================================================================

#[derive(Debug, Clone)]
pub struct Order {
    // Identity
    id: EntityId,
    customer_id: EntityId,

    // Current State
    products: OrderProductList,
    status: OrderStatus,
    payment_status: OrderPaymentStatus,

    // Audit Trail
    created_at: DateTime<Utc>,
    updated_at: Option<DateTime<Utc>>,
}

impl Order {
    /// Place a new order: fresh id, no lines, no status, no payment status.
    pub fn create(customer_id: EntityId) -> Self {
        Self::with_id(EntityId::new(), customer_id, Utc::now())
    }

    /// Rebuild an order with a known identity and creation time.
    pub fn with_id(id: EntityId, customer_id: EntityId, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            customer_id,
            products: OrderProductList::default(),
            status: OrderStatus::Unset,
            payment_status: OrderPaymentStatus::Unset,
            created_at,
            updated_at: None,
        }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn customer_id(&self) -> &EntityId {
        &self.customer_id
    }

    pub fn products(&self) -> &OrderProductList {
        &self.products
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn payment_status(&self) -> OrderPaymentStatus {
        self.payment_status
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    fn touch(&mut self) {
        self.updated_at = Some(Utc::now());
    }

    /// Unchecked status assignment.
    pub fn set_status(&mut self, status: Status) {
        self.status = status.into();
        self.touch();
    }

    pub fn set_payment_status(&mut self, payment_status: PaymentStatus) {
        self.payment_status = payment_status.into();
        self.touch();
    }

    /// Replace the line collection wholesale. Lines that reference another
    /// order are dropped; the list keeps track of what was added and removed.
    pub fn set_products(&mut self, items: Vec<OrderProduct>) {
        let (own, foreign): (Vec<_>, Vec<_>) =
            items.into_iter().partition(|line| line.order_id() == &self.id);

        if !foreign.is_empty() {
            tracing::warn!(
                order_id = %self.id,
                dropped = foreign.len(),
                "Ignoring lines that belong to another order"
            );
        }

        self.products.update(own);
        self.touch();
    }

    /// Line changes have been persisted; start tracking from here.
    pub fn commit_products(&mut self) {
        self.products = OrderProductList::new(self.products.items().to_vec());
    }

    /// Attach one more product to this order.
    #[cfg(test)]
    pub fn add_product(&mut self, product_id: EntityId) -> OrderProduct {
        let line = OrderProduct::new(self.id.clone(), product_id);
        self.products.add(line.clone());
        self.touch();
        line
    }

    /// Stage the order would move to next, without changing anything.
    pub fn next_status(&self) -> Result<Status, OrderError> {
        if self.payment_status != OrderPaymentStatus::Approved {
            return Err(OrderError::PaymentNotApproved(
                self.payment_status.value().unwrap_or_default().to_string(),
            ));
        }

        match self.status {
            OrderStatus::Unset | OrderStatus::Received => Ok(Status::InPreparation),
            OrderStatus::InPreparation => Ok(Status::Ready),
            OrderStatus::Ready => Ok(Status::Finalized),
            OrderStatus::Finalized => Err(OrderError::AlreadyFinalized),
        }
    }

    /// Guarded forward transition.
    pub fn advance_status(&mut self) -> Result<Status, OrderError> {
        let next = self.next_status()?;
        self.set_status(next);
        Ok(next)
    }

    /// Checkout finalizes regardless of the current stage.
    pub fn checkout(&mut self) {
        self.set_status(Status::Finalized);
    }

    pub fn handle_command(&mut self, command: &OrderCommand) -> Result<(), OrderError> {
        match command {
            OrderCommand::Checkout => self.checkout(),
            OrderCommand::AdvanceStatus => {
                self.advance_status()?;
            }
            OrderCommand::SetStatus { status } => self.set_status(*status),
            OrderCommand::SetPaymentStatus { payment_status } => {
                self.set_payment_status(*payment_status)
            }
        }
        Ok(())
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
