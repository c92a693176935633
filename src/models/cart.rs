// src/models/cart.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::cart_item::CartItemWithProduct;
use crate::store::scope::{Arg, Op, Relation, Scope};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Cart {
  pub id: i64,
  pub user_id: i64,
  // Derived, denormalized: always the sum of price * quantity over the
  // cart's active items. Maintained by the pricing engine on every item
  // mutation, never computed on read.
  pub total_price: f64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl Cart {
  pub const TABLE: &'static str = "carts";
  pub const COLUMNS: &'static str = "id, user_id, total_price, created_at, updated_at, deleted_at";

  pub fn active() -> Scope {
    Scope::Active
  }

  pub fn with_items() -> Scope {
    Scope::Load(Relation::CartItems)
  }

  pub fn by_user(user_id: i64) -> Scope {
    Scope::Filter {
      column: "user_id",
      op: Op::Eq,
      arg: Arg::Int(user_id),
    }
  }
}

// --- Request DTO ---
#[derive(Debug, Deserialize)]
pub struct CartPayload {
  pub user_id: i64,
}

// --- Response shape for cart reads ---
#[derive(Debug, Serialize)]
pub struct CartWithItems {
  #[serde(flatten)]
  pub cart: Cart,
  pub items: Vec<CartItemWithProduct>,
}
