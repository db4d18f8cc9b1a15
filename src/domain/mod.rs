// ============================================================================
// Domain Layer - Business Logic
// ============================================================================
//
// The order aggregate and everything it needs to enforce its lifecycle.
// Nothing in here performs I/O; persistence goes through the
// `OrderRepository` trait and remote services live in `crate::gateway`.
//
// ============================================================================

pub mod order;
