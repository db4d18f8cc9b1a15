use crate::domain::order::OrderError;
use crate::gateway::GatewayError;

pub const PAYMENT_APPROVED_FAILED: &str = "Erro ao processar notificação de pagamento aprovado";

// ============================================================================
// Production Workflow Errors
// ============================================================================
//
// Reads and most writes let the gateway error through untouched.
// The payment-approved workflow is the exception: whatever failed, the
// caller only ever sees `Aggregation`.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProductionError {
    #[error("Erro ao buscar pedidos")]
    OrderLookup(#[source] OrderError),

    #[error("Erro ao buscar fila de produção")]
    QueueUnavailable(#[source] OrderError),

    #[error("Pedido não encontrado")]
    OrderNotFound(String),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("{0}")]
    Aggregation(String),
}

impl ProductionError {
    pub fn payment_approved_failed() -> Self {
        ProductionError::Aggregation(PAYMENT_APPROVED_FAILED.to_string())
    }
}
