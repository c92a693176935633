// tests/common/mod.rs
#![allow(dead_code)] // Allow unused code in this common test module

use once_cell::sync::Lazy;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;
use tracing::Level;

use shop_api::models::cart::{Cart, CartPayload};
use shop_api::models::category::{Category, CategoryPayload};
use shop_api::models::product::{Product, ProductPayload};
use shop_api::models::user::{User, UserPayload};
use shop_api::services::{carts, categories, products, users};
use shop_api::store;

// --- Helper for Tracing Setup (call once per test run if needed) ---
static TRACING_INIT: Lazy<()> = Lazy::new(|| {
  tracing_subscriber::fmt()
    .with_max_level(Level::DEBUG)
    .with_test_writer() // Important for tests to capture output
    .try_init()
    .ok(); // Allow multiple initializations in tests (ok if fails)
});

pub fn setup_tracing() {
  Lazy::force(&TRACING_INIT);
}

/// Fresh in-memory database with the schema applied. A single connection
/// keeps the in-memory database alive for the whole test; every test gets
/// its own isolated store.
pub async fn test_pool() -> SqlitePool {
  setup_tracing();

  let options = SqliteConnectOptions::from_str("sqlite::memory:").unwrap();
  let pool = SqlitePoolOptions::new()
    .max_connections(1)
    .idle_timeout(None)
    .max_lifetime(None)
    .connect_with(options)
    .await
    .unwrap();
  store::migrate(&pool).await.unwrap();
  pool
}

// --- Entity fixtures ---

pub async fn seed_user(pool: &SqlitePool, username: &str) -> User {
  users::create_user(
    pool,
    UserPayload {
      username: username.to_string(),
      email: format!("{}@example.com", username),
    },
  )
  .await
  .unwrap()
}

pub async fn seed_category(pool: &SqlitePool, name: &str) -> Category {
  categories::create_category(
    pool,
    CategoryPayload {
      name: name.to_string(),
      description: format!("{} description", name),
    },
  )
  .await
  .unwrap()
}

pub async fn seed_product(pool: &SqlitePool, name: &str, price: f64, quantity: i64, category_id: i64) -> Product {
  products::create_product(
    pool,
    ProductPayload {
      name: name.to_string(),
      description: format!("{} description", name),
      price,
      quantity,
      category_id,
    },
  )
  .await
  .unwrap()
}

pub async fn seed_cart(pool: &SqlitePool, user_id: i64) -> Cart {
  carts::create_cart(pool, CartPayload { user_id }).await.unwrap()
}

// --- Raw lookups for invariant assertions ---

/// The persisted total, read straight off the carts row (the default cart
/// lookups exclude soft-deleted carts, these assertions must not).
pub async fn stored_cart_total(pool: &SqlitePool, cart_id: i64) -> f64 {
  sqlx::query_scalar("SELECT total_price FROM carts WHERE id = ?")
    .bind(cart_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

/// What the total *should* be: the sum over the cart's active items.
pub async fn active_items_sum(pool: &SqlitePool, cart_id: i64) -> f64 {
  sqlx::query_scalar("SELECT COALESCE(SUM(price * quantity), 0.0) FROM cart_items WHERE cart_id = ? AND deleted_at IS NULL")
    .bind(cart_id)
    .fetch_one(pool)
    .await
    .unwrap()
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
  sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
    .fetch_one(pool)
    .await
    .unwrap()
}
