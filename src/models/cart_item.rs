// src/models/cart_item.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::product::Product;
use crate::store::scope::{Arg, Op, Relation, Scope};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CartItem {
  pub id: i64,
  pub cart_id: i64,
  pub product_id: i64,
  pub quantity: i64,
  // Snapshot of the product's unit price at the moment the item was added;
  // later product price edits do not touch it.
  pub price: f64,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl CartItem {
  pub const TABLE: &'static str = "cart_items";
  pub const COLUMNS: &'static str =
    "id, cart_id, product_id, quantity, price, created_at, updated_at, deleted_at";

  pub fn active() -> Scope {
    Scope::Active
  }

  pub fn with_product() -> Scope {
    Scope::Load(Relation::ItemProduct)
  }

  pub fn by_cart(cart_id: i64) -> Scope {
    Scope::Filter {
      column: "cart_id",
      op: Op::Eq,
      arg: Arg::Int(cart_id),
    }
  }
}

// --- Request DTO for "add item to cart" ---
#[derive(Debug, Deserialize)]
pub struct NewCartItem {
  pub product_id: i64,
  pub quantity: i64,
}

// --- Response shape with the referenced product embedded ---
// The product is None when it has since been soft-deleted; the item keeps
// its snapshot price either way.
#[derive(Debug, Serialize)]
pub struct CartItemWithProduct {
  #[serde(flatten)]
  pub item: CartItem,
  pub product: Option<Product>,
}
