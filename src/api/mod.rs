// ============================================================================
// HTTP API
// ============================================================================
//
// actix-web surface of the service:
// - /orders/...      order lifecycle use cases and the payment callback
// - /production/...  kitchen queue, details and status workflows
// - /health, /metrics
//
// ============================================================================

mod errors;
mod orders;
mod production;

use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use std::sync::Arc;

use crate::domain::order::OrderCommandHandler;
use crate::metrics::Metrics;
use crate::production::ProductionService;

/// Shared by every request handler.
pub struct AppState {
    pub orders: Arc<OrderCommandHandler>,
    pub production: Arc<ProductionService>,
    pub metrics: Arc<Metrics>,
}

/// Register every route on an actix `App`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(errors::json_error))
        .route("/health", web::get().to(health_handler))
        .route("/metrics", web::get().to(metrics_handler))
        .configure(orders::configure)
        .configure(production::configure);
}

pub async fn start_server(state: web::Data<AppState>, port: u16) -> std::io::Result<()> {
    tracing::info!("Starting production service on http://0.0.0.0:{}", port);

    HttpServer::new(move || App::new().app_data(state.clone()).configure(configure))
        .bind(("0.0.0.0", port))?
        .run()
        .await
}

async fn metrics_handler(state: web::Data<AppState>) -> impl Responder {
    match state.metrics.render() {
        Ok(buffer) => HttpResponse::Ok()
            .content_type("text/plain; version=0.0.4")
            .body(buffer),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            HttpResponse::InternalServerError().finish()
        }
    }
}

async fn health_handler() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": "fastfood-production"
    }))
}
