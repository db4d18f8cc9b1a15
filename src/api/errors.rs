use actix_web::error::{InternalError, JsonPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::Serialize;

use crate::domain::order::OrderError;
use crate::gateway::GatewayError;
use crate::production::ProductionError;

// ============================================================================
// HTTP Error Mapping
// ============================================================================
//
// Every error leaves the service as `{"message": "<display string>"}` with
// a status code chosen by kind.
//
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
}

fn error_response(status: StatusCode, message: String) -> HttpResponse {
    HttpResponse::build(status).json(ErrorBody { message })
}

impl ResponseError for OrderError {
    fn status_code(&self) -> StatusCode {
        match self {
            OrderError::InvalidStatus(_) | OrderError::InvalidPaymentStatus(_) => StatusCode::BAD_REQUEST,
            OrderError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            OrderError::PaymentNotApproved(_) | OrderError::AlreadyFinalized => StatusCode::CONFLICT,
            OrderError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error_response(self.status_code(), self.to_string())
    }
}

impl ResponseError for GatewayError {
    fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::NotFound(_) => StatusCode::NOT_FOUND,
            GatewayError::Upstream(_) => StatusCode::BAD_GATEWAY,
            GatewayError::Communication(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error_response(self.status_code(), self.to_string())
    }
}

impl ResponseError for ProductionError {
    fn status_code(&self) -> StatusCode {
        match self {
            ProductionError::OrderNotFound(_) => StatusCode::NOT_FOUND,
            ProductionError::Gateway(e) => e.status_code(),
            ProductionError::OrderLookup(_)
            | ProductionError::QueueUnavailable(_)
            | ProductionError::Aggregation(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        error_response(self.status_code(), self.to_string())
    }
}

/// Unreadable JSON bodies get the same `{"message"}` shape as every other
/// error.
pub fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    let response = error_response(StatusCode::BAD_REQUEST, err.to_string());
    InternalError::from_response(err, response).into()
}

/// The payment callback answers every failure, a bad body included, with
/// the one aggregation error.
pub fn payment_approved_json_error(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    tracing::warn!(error = %err, "Unreadable payment approval body");
    let response = ProductionError::payment_approved_failed().error_response();
    InternalError::from_response(err, response).into()
}
