// src/services/users.rs

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::{AppError, Result};
use crate::models::cart::Cart;
use crate::models::user::{User, UserPayload, UserWithCarts};
use crate::store::scope::{Relation, ScopedQuery};

fn validate(payload: &UserPayload) -> Result<()> {
  if payload.username.trim().is_empty() {
    return Err(AppError::Validation("Username must not be empty.".to_string()));
  }
  if payload.email.trim().is_empty() {
    return Err(AppError::Validation("Email must not be empty.".to_string()));
  }
  Ok(())
}

pub async fn list_users(pool: &SqlitePool) -> Result<Vec<User>> {
  let users = ScopedQuery::new(User::TABLE, User::COLUMNS)
    .scope(User::active())
    .fetch_all(pool)
    .await?;
  Ok(users)
}

pub async fn list_users_with_carts(pool: &SqlitePool) -> Result<Vec<UserWithCarts>> {
  let query = ScopedQuery::new(User::TABLE, User::COLUMNS)
    .scope(User::active())
    .scope(User::with_carts());
  let users: Vec<User> = query.fetch_all(pool).await?;

  let mut grouped: HashMap<i64, Vec<Cart>> = HashMap::new();
  if query.wants(Relation::UserCarts) {
    let ids: Vec<i64> = users.iter().map(|u| u.id).collect();
    for cart in carts_for_users(pool, &ids).await? {
      grouped.entry(cart.user_id).or_default().push(cart);
    }
  }

  Ok(
    users
      .into_iter()
      .map(|user| {
        let carts = grouped.remove(&user.id).unwrap_or_default();
        UserWithCarts { user, carts }
      })
      .collect(),
  )
}

/// Preload query for User -> Carts.
async fn carts_for_users(pool: &SqlitePool, user_ids: &[i64]) -> Result<Vec<Cart>> {
  if user_ids.is_empty() {
    return Ok(Vec::new());
  }

  let placeholders = vec!["?"; user_ids.len()].join(", ");
  let sql = format!(
    "SELECT {} FROM carts WHERE user_id IN ({}) AND deleted_at IS NULL ORDER BY id ASC",
    Cart::COLUMNS,
    placeholders
  );

  let mut query = sqlx::query_as::<_, Cart>(&sql);
  for id in user_ids {
    query = query.bind(*id);
  }
  Ok(query.fetch_all(pool).await?)
}

pub async fn get_user(pool: &SqlitePool, id: i64) -> Result<User> {
  let user: Option<User> = sqlx::query_as(&format!(
    "SELECT {} FROM users WHERE id = ? AND deleted_at IS NULL",
    User::COLUMNS
  ))
  .bind(id)
  .fetch_optional(pool)
  .await?;

  user.ok_or_else(|| AppError::NotFound(format!("User with ID {} not found.", id)))
}

pub async fn create_user(pool: &SqlitePool, payload: UserPayload) -> Result<User> {
  validate(&payload)?;

  let now = Utc::now();
  let user: User = sqlx::query_as(&format!(
    "INSERT INTO users (username, email, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING {}",
    User::COLUMNS
  ))
  .bind(&payload.username)
  .bind(&payload.email)
  .bind(now)
  .bind(now)
  .fetch_one(pool)
  .await?;

  info!("Created user {} ({}).", user.id, user.username);
  Ok(user)
}

pub async fn update_user(pool: &SqlitePool, id: i64, payload: UserPayload) -> Result<User> {
  validate(&payload)?;

  let mut user = get_user(pool, id).await?;
  user.username = payload.username;
  user.email = payload.email;
  user.updated_at = Utc::now();

  sqlx::query("UPDATE users SET username = ?, email = ?, updated_at = ? WHERE id = ?")
    .bind(&user.username)
    .bind(&user.email)
    .bind(user.updated_at)
    .bind(user.id)
    .execute(pool)
    .await?;

  info!("Updated user {}.", user.id);
  Ok(user)
}

pub async fn delete_user(pool: &SqlitePool, id: i64) -> Result<()> {
  let now = Utc::now();
  let result = sqlx::query("UPDATE users SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL")
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("User with ID {} not found.", id)));
  }

  info!("Soft-deleted user {}.", id);
  Ok(())
}

/// Exact-email lookup over active users.
pub async fn find_users_by_email(pool: &SqlitePool, email: &str) -> Result<Vec<User>> {
  let users = ScopedQuery::new(User::TABLE, User::COLUMNS)
    .scope(User::active())
    .scope(User::by_email(email))
    .fetch_all(pool)
    .await?;
  Ok(users)
}
