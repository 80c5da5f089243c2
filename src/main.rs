use actix_web::{middleware, web, App, HttpServer};
use std::sync::{Arc, Mutex};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod domain;
mod http;
mod metrics;
mod persistence;
mod service;

use config::AppConfig;
use persistence::JsonFileStore;
use service::RestaurantService;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    // Structured logging, overridable with RUST_LOG
    // Example: RUST_LOG=debug cargo run
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_thread_ids(true))
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,restaurant_orders=debug")),
        )
        .init();

    tracing::info!("🍽️  Starting restaurant order service");

    // === 1. Configuration ===
    let config = AppConfig::from_env()?;
    tracing::info!(?config, "Loaded configuration");

    // === 2. Prometheus metrics ===
    let metrics = Arc::new(metrics::Metrics::new()?);
    tracing::info!("📊 Metrics registry created with {} metrics", metrics.registry().gather().len());

    // === 3. Load menu and orders from disk ===
    let store = JsonFileStore::new(&config.menu_file, &config.orders_file);
    let service = RestaurantService::open(Box::new(store), config.dish_ids, metrics.clone());
    let state = web::Data::new(Mutex::new(service));

    // === 4. Serve until shutdown signal ===
    let server_state = state.clone();
    let metrics_data = web::Data::from(metrics);
    tracing::info!("🚀 Listening on http://{}:{}", config.host, config.port);

    HttpServer::new(move || {
        App::new()
            .wrap(middleware::Logger::default())
            .app_data(server_state.clone())
            .app_data(metrics_data.clone())
            .configure(http::configure)
            .configure(metrics::configure)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await?;

    // === 5. Final flush ===
    match state.lock() {
        Ok(service) => service.flush()?,
        Err(_) => tracing::error!("State lock poisoned, skipping final flush"),
    }

    tracing::info!("👋 Restaurant order service stopped");

    Ok(())
}
