use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::production::{MarkReadyRequest, ProductionError, QueueQuery};

use super::AppState;

// ============================================================================
// Kitchen Routes
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ProductionStatusRequest {
    pub status: String,
    #[serde(default)]
    pub notes: Option<String>,
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/production")
            .route("/queue", web::get().to(queue))
            .route("/orders/{order_id}/details", web::get().to(order_details))
            .route("/orders/{order_id}/ready", web::post().to(mark_ready))
            .route("/orders/{order_id}/status", web::patch().to(update_status)),
    );
}

async fn queue(
    state: web::Data<AppState>,
    query: web::Query<QueueQuery>,
) -> Result<HttpResponse, ProductionError> {
    let queue = state.production.queue(&query).await?;
    Ok(HttpResponse::Ok().json(queue))
}

async fn order_details(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, ProductionError> {
    let details = state.production.order_details(&path).await?;
    Ok(HttpResponse::Ok().json(details))
}

async fn mark_ready(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: Option<web::Json<MarkReadyRequest>>,
) -> Result<HttpResponse, ProductionError> {
    let request = body.map(web::Json::into_inner).unwrap_or_default();
    let confirmation = state.production.mark_ready(&path, request).await?;
    Ok(HttpResponse::Ok().json(confirmation))
}

async fn update_status(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<ProductionStatusRequest>,
) -> Result<HttpResponse, ProductionError> {
    let body = body.into_inner();
    let ack = state
        .production
        .update_production_status(&path, &body.status, body.notes)
        .await?;
    Ok(HttpResponse::Ok().json(ack))
}
