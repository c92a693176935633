// src/bin/seed_catalog.rs
//
// Standalone catalog seeder; the server can also seed at startup with
// SEED_DB=true.

use shop_api::config::AppConfig;
use shop_api::{seed, store};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
    .init();

  let config = AppConfig::from_env()?;
  let pool = store::connect(&config.database_url).await?;
  store::migrate(&pool).await?;
  seed::run(&pool).await?;

  Ok(())
}
