// src/models/user.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::cart::Cart;
use crate::store::scope::{Arg, Op, Relation, Scope};

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct User {
  pub id: i64,
  pub username: String,
  pub email: String, // unique by convention, not enforced at the model level
  pub created_at: DateTime<Utc>,
  pub updated_at: DateTime<Utc>,
  pub deleted_at: Option<DateTime<Utc>>,
}

impl User {
  pub const TABLE: &'static str = "users";
  pub const COLUMNS: &'static str = "id, username, email, created_at, updated_at, deleted_at";

  pub fn active() -> Scope {
    Scope::Active
  }

  pub fn with_carts() -> Scope {
    Scope::Load(Relation::UserCarts)
  }

  pub fn by_email(email: &str) -> Scope {
    Scope::Filter {
      column: "email",
      op: Op::Eq,
      arg: Arg::Text(email.to_string()),
    }
  }
}

// --- Request DTO ---
#[derive(Debug, Deserialize)]
pub struct UserPayload {
  pub username: String,
  pub email: String,
}

// --- Response shape for the with-carts listing ---
#[derive(Debug, Serialize)]
pub struct UserWithCarts {
  #[serde(flatten)]
  pub user: User,
  pub carts: Vec<Cart>,
}
