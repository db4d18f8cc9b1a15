use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::order::{EntityId, Order, OrderError, OrderRepository};

// ============================================================================
// In-Memory Order Repository
// ============================================================================
//
// Process-local storage keyed by order id. `save` overwrites whatever was
// stored under the same id (last writer wins).
//
// ============================================================================

#[derive(Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<HashMap<EntityId, Order>>,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        let orders = orders
            .into_iter()
            .map(|order| (order.id().clone(), order))
            .collect();

        Self {
            orders: RwLock::new(orders),
        }
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.orders.read().await.len()
    }
}

#[async_trait]
impl OrderRepository for InMemoryOrderRepository {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Order>, OrderError> {
        Ok(self.orders.read().await.get(id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Order>, OrderError> {
        Ok(self.orders.read().await.values().cloned().collect())
    }

    async fn save(&self, mut order: Order) -> Result<Order, OrderError> {
        tracing::debug!(
            order_id = %order.id(),
            added_lines = order.products().new_items().len(),
            removed_lines = order.products().removed_items().len(),
            "Saving order"
        );
        order.commit_products();

        self.orders
            .write()
            .await
            .insert(order.id().clone(), order.clone());
        Ok(order)
    }
}
