// src/store/mod.rs
//
// Database bootstrap: pool construction and schema migration. The pool is
// created once at startup and passed explicitly through `AppState`; no
// module-level handle exists.

pub mod scope;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::str::FromStr;

use crate::errors::Result;

/// Connect to the SQLite database named by `database_url`, creating the
/// file when it does not exist yet.
pub async fn connect(database_url: &str) -> Result<SqlitePool> {
  let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

  let pool = SqlitePoolOptions::new().connect_with(options).await?;
  tracing::info!("Successfully connected to the database.");
  Ok(pool)
}

/// Idempotent schema migration: one table per entity, columns = entity
/// attributes plus id/created_at/updated_at/deleted_at. Timestamps are
/// bound from the application on every write, so none of the columns carry
/// database-side defaults.
pub async fn migrate(pool: &SqlitePool) -> Result<()> {
  let statements = [
    "CREATE TABLE IF NOT EXISTS users (
       id INTEGER PRIMARY KEY AUTOINCREMENT,
       username TEXT NOT NULL,
       email TEXT NOT NULL,
       created_at TEXT NOT NULL,
       updated_at TEXT NOT NULL,
       deleted_at TEXT
     )",
    "CREATE TABLE IF NOT EXISTS categories (
       id INTEGER PRIMARY KEY AUTOINCREMENT,
       name TEXT NOT NULL,
       description TEXT NOT NULL,
       created_at TEXT NOT NULL,
       updated_at TEXT NOT NULL,
       deleted_at TEXT
     )",
    "CREATE TABLE IF NOT EXISTS products (
       id INTEGER PRIMARY KEY AUTOINCREMENT,
       name TEXT NOT NULL,
       description TEXT NOT NULL,
       price REAL NOT NULL,
       quantity INTEGER NOT NULL,
       category_id INTEGER NOT NULL,
       created_at TEXT NOT NULL,
       updated_at TEXT NOT NULL,
       deleted_at TEXT
     )",
    "CREATE TABLE IF NOT EXISTS carts (
       id INTEGER PRIMARY KEY AUTOINCREMENT,
       user_id INTEGER NOT NULL,
       total_price REAL NOT NULL DEFAULT 0,
       created_at TEXT NOT NULL,
       updated_at TEXT NOT NULL,
       deleted_at TEXT
     )",
    "CREATE TABLE IF NOT EXISTS cart_items (
       id INTEGER PRIMARY KEY AUTOINCREMENT,
       cart_id INTEGER NOT NULL,
       product_id INTEGER NOT NULL,
       quantity INTEGER NOT NULL,
       price REAL NOT NULL,
       created_at TEXT NOT NULL,
       updated_at TEXT NOT NULL,
       deleted_at TEXT
     )",
  ];

  for statement in statements {
    sqlx::query(statement).execute(pool).await?;
  }

  tracing::info!("Database migration completed.");
  Ok(())
}
