// src/models/product.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::store::scope::{Arg, Op, Scope};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Product {
  pub id: i64,
  pub name: String,
  pub description: String,
  pub price: f64,
  pub quantity: i64, // units in stock
  // A dangling category_id is tolerated; nothing validates the reference.
  pub category_id: i64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
  pub const TABLE: &'static str = "products";
  pub const COLUMNS: &'static str =
    "id, name, description, price, quantity, category_id, created_at, updated_at, deleted_at";

  pub fn active() -> Scope {
    Scope::Active
  }

  pub fn in_stock() -> Scope {
    Scope::Filter {
      column: "quantity",
      op: Op::Gt,
      arg: Arg::Int(0),
    }
  }

  pub fn by_category(category_id: i64) -> Scope {
    Scope::Filter {
      column: "category_id",
      op: Op::Eq,
      arg: Arg::Int(category_id),
    }
  }

  /// Inclusive price range.
  pub fn by_price_range(min: f64, max: f64) -> Scope {
    Scope::Between {
      column: "price",
      min,
      max,
    }
  }
}

// --- Request DTO ---
#[derive(Debug, Deserialize)]
pub struct ProductPayload {
  pub name: String,
  pub description: String,
  pub price: f64,
  pub quantity: i64,
  pub category_id: i64,
}
