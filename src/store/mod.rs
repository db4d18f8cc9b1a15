// ============================================================================
// Order Storage
// ============================================================================
//
// Implementations of `domain::order::OrderRepository`.
//
// ============================================================================

mod memory;

pub use memory::InMemoryOrderRepository;
