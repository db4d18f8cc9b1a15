use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;

use crate::domain::order::{EntityId, OrderError};
use crate::production::{OrderView, ProductionError};

use super::errors::payment_approved_json_error;
use super::AppState;

// ============================================================================
// Order Lifecycle Routes
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceOrderRequest {
    pub customer_id: String,
    #[serde(default)]
    pub products: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePaymentStatusRequest {
    pub payment_status: String,
}

/// Payment service callback. `orderId` in the body names the order; the
/// path segment is not consulted.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentApprovedRequest {
    pub order_id: String,
    #[serde(default)]
    pub status: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/orders")
            .route("", web::post().to(place_order))
            .route("/{id}/checkout", web::post().to(checkout))
            .route("/{id}/status", web::patch().to(update_status))
            .route("/{id}/payment-status", web::patch().to(update_payment_status))
            .route("/{id}/payment-status", web::get().to(payment_status))
            .service(
                web::resource("/{id}/payment-approved")
                    .app_data(web::JsonConfig::default().error_handler(payment_approved_json_error))
                    .route(web::post().to(payment_approved)),
            ),
    );
}

async fn place_order(
    state: web::Data<AppState>,
    body: web::Json<PlaceOrderRequest>,
) -> Result<HttpResponse, OrderError> {
    let body = body.into_inner();
    let products = body.products.into_iter().map(EntityId::from).collect();

    let order = state
        .orders
        .place_order(EntityId::from(body.customer_id), products)
        .await?;

    Ok(HttpResponse::Created().json(json!({ "order": OrderView::from(&order) })))
}

async fn checkout(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, OrderError> {
    let order = state.orders.checkout(&EntityId::from(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(json!({ "order": OrderView::from(&order) })))
}

async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Option<web::Json<UpdateStatusRequest>>,
) -> Result<HttpResponse, OrderError> {
    let status = body.and_then(|b| b.into_inner().status);

    let order = state
        .orders
        .update_status(&EntityId::from(path.into_inner()), status.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "order": OrderView::from(&order) })))
}

async fn update_payment_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePaymentStatusRequest>,
) -> Result<HttpResponse, OrderError> {
    let order = state
        .orders
        .update_payment_status(&EntityId::from(path.into_inner()), &body.payment_status)
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "order": OrderView::from(&order) })))
}

async fn payment_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, OrderError> {
    let status = state.orders.payment_status(&EntityId::from(path.into_inner())).await?;
    Ok(HttpResponse::Ok().json(json!({ "status": status })))
}

async fn payment_approved(
    state: web::Data<AppState>,
    body: web::Json<PaymentApprovedRequest>,
) -> Result<HttpResponse, ProductionError> {
    tracing::debug!(
        order_id = %body.order_id,
        reported_status = ?body.status,
        "Payment approval received"
    );

    let ack = state.production.payment_approved(&body.order_id).await?;
    Ok(HttpResponse::Ok().json(ack))
}
