// src/main.rs

use actix_web::{web as actix_data, App, HttpServer};
use std::sync::Arc;
use tracing::Level;
use tracing_subscriber::fmt::format::FmtSpan; // For span events in tracing

use shop_api::config::AppConfig;
use shop_api::state::AppState;
use shop_api::{seed, store, web};

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Initialize tracing subscriber for logging
  tracing_subscriber::fmt()
    .with_max_level(Level::INFO) // Default level
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env()) // Allow RUST_LOG override
    .with_span_events(FmtSpan::CLOSE) // Log when spans close, showing duration
    .init();

  tracing::info!("Starting e-commerce application server...");

  // Load application configuration
  let app_config = Arc::new(AppConfig::from_env()?);

  // Initialize database pool and schema
  let db_pool = store::connect(&app_config.database_url).await?;
  store::migrate(&db_pool).await?;

  // Seed the catalog if configured
  if app_config.seed_db {
    seed::run(&db_pool).await?;
  }

  // Create AppState
  let app_state = AppState {
    db_pool: db_pool.clone(),
    config: app_config.clone(),
  };

  // Configure and start the Actix Web server
  let server_address = format!("{}:{}", app_config.server_host, app_config.server_port);
  tracing::info!("Attempting to bind server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(actix_data::Data::new(app_state.clone())) // Share AppState with handlers
      .wrap(tracing_actix_web::TracingLogger::default()) // Actix middleware for tracing requests
      .configure(web::routes::configure_app_routes)
  })
  .bind(&server_address)?
  .run()
  .await?;

  Ok(())
}
