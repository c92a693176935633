// src/services/products.rs

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::{AppError, Result};
use crate::models::product::{Product, ProductPayload};
use crate::store::scope::ScopedQuery;

fn validate(payload: &ProductPayload) -> Result<()> {
  if payload.name.trim().is_empty() {
    return Err(AppError::Validation("Product name must not be empty.".to_string()));
  }
  if payload.price < 0.0 {
    return Err(AppError::Validation("Product price must not be negative.".to_string()));
  }
  if payload.quantity < 0 {
    return Err(AppError::Validation(
      "Product stock quantity must not be negative.".to_string(),
    ));
  }
  Ok(())
}

pub async fn list_products(pool: &SqlitePool) -> Result<Vec<Product>> {
  let products = ScopedQuery::new(Product::TABLE, Product::COLUMNS)
    .scope(Product::active())
    .order_by("name")
    .fetch_all(pool)
    .await?;
  Ok(products)
}

pub async fn get_product(pool: &SqlitePool, id: i64) -> Result<Product> {
  let product: Option<Product> = sqlx::query_as(&format!(
    "SELECT {} FROM products WHERE id = ? AND deleted_at IS NULL",
    Product::COLUMNS
  ))
  .bind(id)
  .fetch_optional(pool)
  .await?;

  product.ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found.", id)))
}

pub async fn create_product(pool: &SqlitePool, payload: ProductPayload) -> Result<Product> {
  validate(&payload)?;

  let now = Utc::now();
  let product: Product = sqlx::query_as(&format!(
    "INSERT INTO products (name, description, price, quantity, category_id, created_at, updated_at) \
     VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {}",
    Product::COLUMNS
  ))
  .bind(&payload.name)
  .bind(&payload.description)
  .bind(payload.price)
  .bind(payload.quantity)
  .bind(payload.category_id)
  .bind(now)
  .bind(now)
  .fetch_one(pool)
  .await?;

  info!("Created product {} ({}).", product.id, product.name);
  Ok(product)
}

/// Load-then-merge-then-save: only the mutable fields are copied from the
/// payload; id and the lifecycle timestamps stay as persisted.
pub async fn update_product(pool: &SqlitePool, id: i64, payload: ProductPayload) -> Result<Product> {
  validate(&payload)?;

  let mut product = get_product(pool, id).await?;
  product.name = payload.name;
  product.description = payload.description;
  product.price = payload.price;
  product.quantity = payload.quantity;
  product.category_id = payload.category_id;
  product.updated_at = Utc::now();

  sqlx::query(
    "UPDATE products SET name = ?, description = ?, price = ?, quantity = ?, category_id = ?, updated_at = ? \
     WHERE id = ?",
  )
  .bind(&product.name)
  .bind(&product.description)
  .bind(product.price)
  .bind(product.quantity)
  .bind(product.category_id)
  .bind(product.updated_at)
  .bind(product.id)
  .execute(pool)
  .await?;

  info!("Updated product {}.", product.id);
  Ok(product)
}

pub async fn delete_product(pool: &SqlitePool, id: i64) -> Result<()> {
  let now = Utc::now();
  let result = sqlx::query("UPDATE products SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL")
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("Product with ID {} not found.", id)));
  }

  info!("Soft-deleted product {}.", id);
  Ok(())
}

pub async fn list_products_by_category(pool: &SqlitePool, category_id: i64) -> Result<Vec<Product>> {
  let products = ScopedQuery::new(Product::TABLE, Product::COLUMNS)
    .scope(Product::active())
    .scope(Product::by_category(category_id))
    .fetch_all(pool)
    .await?;
  Ok(products)
}

pub async fn list_products_by_price_range(pool: &SqlitePool, min: f64, max: f64) -> Result<Vec<Product>> {
  let products = ScopedQuery::new(Product::TABLE, Product::COLUMNS)
    .scope(Product::active())
    .scope(Product::by_price_range(min, max))
    .fetch_all(pool)
    .await?;
  Ok(products)
}
