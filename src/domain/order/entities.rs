use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ============================================================================
// Identity + Order Lines
// ============================================================================

/// Opaque identifier. Generated ids are UUIDv4 strings, but any string
/// handed over by a sibling service (for example a CPF used as customer
/// reference) is accepted as-is.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntityId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for EntityId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One ordered product. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderProduct {
    id: EntityId,
    order_id: EntityId,
    product_id: EntityId,
}

impl OrderProduct {
    pub fn new(order_id: EntityId, product_id: EntityId) -> Self {
        Self::with_id(EntityId::new(), order_id, product_id)
    }

    pub fn with_id(id: EntityId, order_id: EntityId, product_id: EntityId) -> Self {
        Self { id, order_id, product_id }
    }

    pub fn id(&self) -> &EntityId {
        &self.id
    }

    pub fn order_id(&self) -> &EntityId {
        &self.order_id
    }

    pub fn product_id(&self) -> &EntityId {
        &self.product_id
    }
}

/// Ordered collection of line entries that remembers what changed since it
/// was loaded, so a repository can persist only the delta.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderProductList {
    current: Vec<OrderProduct>,
    initial: Vec<OrderProduct>,
    new: Vec<OrderProduct>,
    removed: Vec<OrderProduct>,
}

impl OrderProductList {
    pub fn new(items: Vec<OrderProduct>) -> Self {
        Self {
            current: items.clone(),
            initial: items,
            new: Vec::new(),
            removed: Vec::new(),
        }
    }

    pub fn items(&self) -> &[OrderProduct] {
        &self.current
    }

    pub fn len(&self) -> usize {
        self.current.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    pub fn new_items(&self) -> &[OrderProduct] {
        &self.new
    }

    pub fn removed_items(&self) -> &[OrderProduct] {
        &self.removed
    }

    pub fn exists(&self, item: &OrderProduct) -> bool {
        self.current.iter().any(|i| i.id == item.id)
    }

    pub fn add(&mut self, item: OrderProduct) {
        if self.exists(&item) {
            return;
        }

        if let Some(pos) = self.removed.iter().position(|i| i.id == item.id) {
            self.removed.remove(pos);
        }
        if !self.initial.iter().any(|i| i.id == item.id) {
            self.new.push(item.clone());
        }

        self.current.push(item);
    }

    pub fn remove(&mut self, item: &OrderProduct) {
        let Some(pos) = self.current.iter().position(|i| i.id == item.id) else {
            return;
        };
        let removed = self.current.remove(pos);

        if let Some(pos) = self.new.iter().position(|i| i.id == removed.id) {
            self.new.remove(pos);
            return;
        }
        if !self.removed.iter().any(|i| i.id == removed.id) {
            self.removed.push(removed);
        }
    }

    /// Replace the whole batch, recomputing the added/removed sets against
    /// the initial contents.
    pub fn update(&mut self, items: Vec<OrderProduct>) {
        let stale: Vec<OrderProduct> = self
            .current
            .iter()
            .filter(|c| !items.iter().any(|i| i.id == c.id))
            .cloned()
            .collect();

        for item in &stale {
            self.remove(item);
        }
        for item in &items {
            self.add(item.clone());
        }

        self.current = items;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(order: &str, product: &str) -> OrderProduct {
        OrderProduct::new(EntityId::from(order), EntityId::from(product))
    }

    #[test]
    fn test_generated_ids_are_unique() {
        assert_ne!(EntityId::new(), EntityId::new());
        assert_eq!(EntityId::from("customer-1").as_str(), "customer-1");
    }

    #[test]
    fn test_add_tracks_new_items_in_order() {
        let mut list = OrderProductList::default();
        let a = line("order-1", "product-1");
        let b = line("order-1", "product-2");

        list.add(a.clone());
        list.add(b.clone());
        list.add(a.clone());

        assert_eq!(list.items(), &[a.clone(), b.clone()]);
        assert_eq!(list.new_items(), &[a, b]);
        assert!(list.removed_items().is_empty());
    }

    #[test]
    fn test_remove_initial_item_is_tracked() {
        let a = line("order-1", "product-1");
        let b = line("order-1", "product-2");
        let mut list = OrderProductList::new(vec![a.clone(), b.clone()]);

        list.remove(&a);

        assert_eq!(list.items(), &[b]);
        assert_eq!(list.removed_items(), &[a.clone()]);

        // re-adding cancels the removal
        list.add(a);
        assert!(list.removed_items().is_empty());
        assert!(list.new_items().is_empty());
    }

    #[test]
    fn test_remove_new_item_is_forgotten() {
        let mut list = OrderProductList::default();
        let a = line("order-1", "product-1");

        list.add(a.clone());
        list.remove(&a);

        assert!(list.is_empty());
        assert!(list.new_items().is_empty());
        assert!(list.removed_items().is_empty());
    }

    #[test]
    fn test_update_replaces_batch() {
        let a = line("order-1", "product-1");
        let b = line("order-1", "product-2");
        let c = line("order-1", "product-3");
        let mut list = OrderProductList::new(vec![a.clone(), b.clone()]);

        list.update(vec![b.clone(), c.clone()]);

        assert_eq!(list.items(), &[b, c.clone()]);
        assert_eq!(list.new_items(), &[c]);
        assert_eq!(list.removed_items(), &[a]);
        assert_eq!(list.len(), 2);
    }
}
