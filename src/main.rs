use actix_web::web;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod api;
mod config;
mod domain;
mod gateway;
mod metrics;
mod production;
mod store;
mod utils;

use api::AppState;
use config::AppConfig;
use domain::order::{OrderCommandHandler, OrderRepository};
use gateway::{HttpGateway, ProductionGateway, RetryingGateway};
use production::ProductionService;
use store::InMemoryOrderRepository;
use utils::RetryConfig;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Default to INFO level, can be overridden with RUST_LOG env var
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,fastfood_production=debug"))
        )
        .init();

    tracing::info!("🚀 Starting fast-food production service");

    // === 1. Configuration ===
    let config = AppConfig::from_env()?;
    tracing::info!(
        order_service = %config.gateway.order_service_url,
        payment_service = %config.gateway.payment_service_url,
        retry_attempts = config.gateway.retry_attempts,
        "Configuration loaded"
    );

    // === 2. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 3. Order storage and lifecycle use cases ===
    let repository: Arc<dyn OrderRepository> = Arc::new(InMemoryOrderRepository::new());
    let orders = Arc::new(OrderCommandHandler::new(repository, metrics.clone()));

    // === 4. Remote services ===
    let http = HttpGateway::new(&config.gateway, metrics.clone())?;
    let gateway: Arc<dyn ProductionGateway> = if config.gateway.retry_attempts > 1 {
        let retry = RetryConfig::with_attempts(config.gateway.retry_attempts);
        Arc::new(RetryingGateway::new(http, retry))
    } else {
        Arc::new(http)
    };

    // === 5. Production workflows ===
    let production = Arc::new(ProductionService::new(orders.clone(), gateway, metrics.clone()));

    // === 6. HTTP API ===
    let state = web::Data::new(AppState {
        orders,
        production,
        metrics,
    });
    api::start_server(state, config.app_port).await?;

    tracing::info!("👋 Production service stopped");
    Ok(())
}
