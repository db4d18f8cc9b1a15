use crate::utils::IsTransient;

// ============================================================================
// Gateway Errors
// ============================================================================
//
// Three kinds, never merged:
// - NotFound: the service answered 404
// - Upstream: the service answered with any other non-success status
// - Communication: the call never completed (DNS, refused, timeout, bad body)
//
// The display string is the exact message surfaced to callers.
//
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Upstream(String),

    #[error("{0}")]
    Communication(String),
}

impl GatewayError {
    /// Label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::NotFound(_) => "not_found",
            GatewayError::Upstream(_) => "upstream_error",
            GatewayError::Communication(_) => "communication_error",
        }
    }
}

impl IsTransient for GatewayError {
    fn is_transient(&self) -> bool {
        !matches!(self, GatewayError::NotFound(_))
    }
}

/// What a read call was looking for; decides the wording of its errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoteResource {
    Order,
    Customer,
    Product,
}

impl RemoteResource {
    /// Field of the response body that wraps the snapshot.
    pub fn field(&self) -> &'static str {
        match self {
            RemoteResource::Order => "order",
            RemoteResource::Customer => "customer",
            RemoteResource::Product => "product",
        }
    }

    pub fn not_found(&self) -> GatewayError {
        let message = match self {
            RemoteResource::Order => "Pedido não encontrado",
            RemoteResource::Customer => "Cliente não encontrado",
            RemoteResource::Product => "Produto não encontrado",
        };
        GatewayError::NotFound(message.to_string())
    }

    pub fn fetch_failed(&self) -> GatewayError {
        let message = match self {
            RemoteResource::Order => "Erro ao buscar pedido",
            RemoteResource::Customer => "Erro ao buscar cliente",
            RemoteResource::Product => "Erro ao buscar produto",
        };
        GatewayError::Upstream(message.to_string())
    }
}

pub const ORDER_SERVICE_UNREACHABLE: &str = "Erro de comunicação com microserviço de pedidos";
pub const PAYMENT_SERVICE_UNREACHABLE: &str = "Erro de comunicação com microserviço de pagamento";
pub const ORDER_STATUS_UPDATE_FAILED: &str = "Erro ao atualizar status do pedido";
pub const PAYMENT_NOTIFICATION_FAILED: &str = "Erro ao notificar microserviço de pagamento";
