// ============================================================================
// Order Domain - Business Logic for the Order Aggregate
// ============================================================================
//
// - Value objects (Status, PaymentStatus and their aggregate slots)
// - Entities (EntityId, OrderProduct, OrderProductList)
// - Commands (Checkout, AdvanceStatus, SetStatus, SetPaymentStatus)
// - Errors (OrderError enum)
// - Aggregate (Order with the production state machine)
// - Repository (persistence boundary)
// - Command Handler (the lifecycle use cases)
//
// ============================================================================

pub mod value_objects;
pub mod entities;
pub mod commands;
pub mod errors;
pub mod aggregate;
pub mod repository;
pub mod command_handler;

// Re-export for convenience
pub use entities::*;
pub use errors::*;
pub use aggregate::*;
pub use repository::*;
pub use command_handler::*;
