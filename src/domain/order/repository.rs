use async_trait::async_trait;

use super::aggregate::Order;
use super::entities::EntityId;
use super::errors::OrderError;

/// Persistence boundary for orders. Storage engines implement this; the
/// domain never talks to storage any other way.
///
/// There is no locking here: two concurrent writers on the same id race
/// and the last `save` wins.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    async fn find_by_id(&self, id: &EntityId) -> Result<Option<Order>, OrderError>;

    async fn find_all(&self) -> Result<Vec<Order>, OrderError>;

    async fn save(&self, order: Order) -> Result<Order, OrderError>;
}
