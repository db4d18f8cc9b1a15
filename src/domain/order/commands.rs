use super::value_objects::{PaymentStatus, Status};

// ============================================================================
// Order Commands - Represent user intent
// ============================================================================
//
// Every lifecycle use case applies exactly one of these to a loaded order.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum OrderCommand {
    /// Customer has completed and paid; jumps straight to Finalized.
    Checkout,
    /// Guarded forward move through the production stages.
    AdvanceStatus,
    /// Unchecked assignment used for production-floor corrections.
    SetStatus { status: Status },
    SetPaymentStatus { payment_status: PaymentStatus },
}

impl OrderCommand {
    pub fn name(&self) -> &'static str {
        match self {
            OrderCommand::Checkout => "checkout",
            OrderCommand::AdvanceStatus => "advance_status",
            OrderCommand::SetStatus { .. } => "set_status",
            OrderCommand::SetPaymentStatus { .. } => "set_payment_status",
        }
    }
}
