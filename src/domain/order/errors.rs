// ============================================================================
// Order Business Rule Errors
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid status: {0}")]
    InvalidStatus(String),

    #[error("Invalid payment status: {0}")]
    InvalidPaymentStatus(String),

    #[error("Payment must be approved before the order can advance (payment status: {0:?})")]
    PaymentNotApproved(String),

    #[error("Order is already finalized")]
    AlreadyFinalized,

    /// Lookup by id found nothing. Carries the id that was requested.
    #[error("Resource not found")]
    ResourceNotFound(String),

    #[error("Order repository error: {0}")]
    Repository(String),
}

impl OrderError {
    /// True for errors raised by value-object construction.
    pub fn is_validation(&self) -> bool {
        matches!(self, OrderError::InvalidStatus(_) | OrderError::InvalidPaymentStatus(_))
    }
}
