// src/models/category.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::product::Product;
use crate::store::scope::{Arg, Op, Relation, Scope};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Category {
  pub id: i64,
  pub name: String,
  pub description: String,
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl Category {
  pub const TABLE: &'static str = "categories";
  pub const COLUMNS: &'static str = "id, name, description, created_at, updated_at, deleted_at";

  pub fn active() -> Scope {
    Scope::Active
  }

  pub fn with_products() -> Scope {
    Scope::Load(Relation::CategoryProducts)
  }

  /// Substring match on the category name.
  pub fn by_name(name: &str) -> Scope {
    Scope::Filter {
      column: "name",
      op: Op::Like,
      arg: Arg::Text(name.to_string()),
    }
  }
}

// --- Request DTO ---
#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
  pub name: String,
  pub description: String,
}

// --- Response shape for the with-products listing ---
#[derive(Debug, Serialize)]
pub struct CategoryWithProducts {
  #[serde(flatten)]
  pub category: Category,
  pub products: Vec<Product>,
}
