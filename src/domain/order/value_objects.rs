use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::errors::OrderError;

// ============================================================================
// Order Value Objects
// ============================================================================
//
// Status and PaymentStatus are closed enumerations. The only way to obtain
// one from a string is `create` (or `FromStr`), which rejects anything
// outside the valid set. English and Portuguese literals are accepted; the
// canonical value is always the Portuguese literal.
//
// ============================================================================

/// Production stage of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Status {
    Received,
    InPreparation,
    Ready,
    Finalized,
}

impl Status {
    pub const RECEIVED: &'static str = "Recebido";
    pub const IN_PREPARATION: &'static str = "Preparação";
    pub const READY: &'static str = "Pronto";
    pub const FINALIZED: &'static str = "Finalizado";

    pub const VALID_STATUS: [&'static str; 4] = [
        Self::RECEIVED,
        Self::IN_PREPARATION,
        Self::READY,
        Self::FINALIZED,
    ];

    pub fn create(raw: &str) -> Result<Self, OrderError> {
        match raw {
            Self::RECEIVED | "Received" => Ok(Status::Received),
            Self::IN_PREPARATION | "InPreparation" => Ok(Status::InPreparation),
            Self::READY | "Ready" => Ok(Status::Ready),
            Self::FINALIZED | "Finalized" => Ok(Status::Finalized),
            other => Err(OrderError::InvalidStatus(other.to_string())),
        }
    }

    /// Canonical literal
    pub fn value(&self) -> &'static str {
        match self {
            Status::Received => Self::RECEIVED,
            Status::InPreparation => Self::IN_PREPARATION,
            Status::Ready => Self::READY,
            Status::Finalized => Self::FINALIZED,
        }
    }
}

impl FromStr for Status {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Status::create(s)
    }
}

impl TryFrom<String> for Status {
    type Error = OrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Status::create(&value)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        status.value().to_string()
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

/// Outcome of the payment attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaymentStatus {
    Approved,
    Rejected,
    Pending,
}

impl PaymentStatus {
    pub const APPROVED: &'static str = "Aprovado";
    pub const REJECTED: &'static str = "Recusado";
    pub const PENDING: &'static str = "Pendente";

    pub const VALID_STATUS: [&'static str; 3] = [Self::APPROVED, Self::REJECTED, Self::PENDING];

    pub fn create(raw: &str) -> Result<Self, OrderError> {
        match raw {
            Self::APPROVED | "Approved" => Ok(PaymentStatus::Approved),
            Self::REJECTED | "Rejected" => Ok(PaymentStatus::Rejected),
            Self::PENDING | "Pending" => Ok(PaymentStatus::Pending),
            other => Err(OrderError::InvalidPaymentStatus(other.to_string())),
        }
    }

    pub fn value(&self) -> &'static str {
        match self {
            PaymentStatus::Approved => Self::APPROVED,
            PaymentStatus::Rejected => Self::REJECTED,
            PaymentStatus::Pending => Self::PENDING,
        }
    }
}

impl FromStr for PaymentStatus {
    type Err = OrderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaymentStatus::create(s)
    }
}

impl TryFrom<String> for PaymentStatus {
    type Error = OrderError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PaymentStatus::create(&value)
    }
}

impl From<PaymentStatus> for String {
    fn from(status: PaymentStatus) -> Self {
        status.value().to_string()
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.value())
    }
}

// ============================================================================
// Aggregate Slots
// ============================================================================
//
// An order is placed without a status and without a payment status. These
// sum types make "not assigned yet" a matchable state of its own.
//
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderStatus {
    #[default]
    Unset,
    Received,
    InPreparation,
    Ready,
    Finalized,
}

impl OrderStatus {
    pub fn as_status(&self) -> Option<Status> {
        match self {
            OrderStatus::Unset => None,
            OrderStatus::Received => Some(Status::Received),
            OrderStatus::InPreparation => Some(Status::InPreparation),
            OrderStatus::Ready => Some(Status::Ready),
            OrderStatus::Finalized => Some(Status::Finalized),
        }
    }

    pub fn value(&self) -> Option<&'static str> {
        self.as_status().map(|s| s.value())
    }
}

impl From<Status> for OrderStatus {
    fn from(status: Status) -> Self {
        match status {
            Status::Received => OrderStatus::Received,
            Status::InPreparation => OrderStatus::InPreparation,
            Status::Ready => OrderStatus::Ready,
            Status::Finalized => OrderStatus::Finalized,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OrderPaymentStatus {
    #[default]
    Unset,
    Approved,
    Rejected,
    Pending,
}

impl OrderPaymentStatus {
    pub fn as_payment_status(&self) -> Option<PaymentStatus> {
        match self {
            OrderPaymentStatus::Unset => None,
            OrderPaymentStatus::Approved => Some(PaymentStatus::Approved),
            OrderPaymentStatus::Rejected => Some(PaymentStatus::Rejected),
            OrderPaymentStatus::Pending => Some(PaymentStatus::Pending),
        }
    }

    pub fn value(&self) -> Option<&'static str> {
        self.as_payment_status().map(|s| s.value())
    }
}

impl From<PaymentStatus> for OrderPaymentStatus {
    fn from(status: PaymentStatus) -> Self {
        match status {
            PaymentStatus::Approved => OrderPaymentStatus::Approved,
            PaymentStatus::Rejected => OrderPaymentStatus::Rejected,
            PaymentStatus::Pending => OrderPaymentStatus::Pending,
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================
