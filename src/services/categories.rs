// src/services/categories.rs

use std::collections::HashMap;

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::info;

use crate::errors::{AppError, Result};
use crate::models::category::{Category, CategoryPayload, CategoryWithProducts};
use crate::models::product::Product;
use crate::store::scope::{Relation, ScopedQuery};

fn validate(payload: &CategoryPayload) -> Result<()> {
  if payload.name.trim().is_empty() {
    return Err(AppError::Validation("Category name must not be empty.".to_string()));
  }
  Ok(())
}

pub async fn list_categories(pool: &SqlitePool) -> Result<Vec<Category>> {
  let categories = ScopedQuery::new(Category::TABLE, Category::COLUMNS)
    .scope(Category::active())
    .fetch_all(pool)
    .await?;
  Ok(categories)
}

pub async fn list_categories_with_products(pool: &SqlitePool) -> Result<Vec<CategoryWithProducts>> {
  let query = ScopedQuery::new(Category::TABLE, Category::COLUMNS)
    .scope(Category::active())
    .scope(Category::with_products());
  let categories: Vec<Category> = query.fetch_all(pool).await?;

  let mut grouped: HashMap<i64, Vec<Product>> = HashMap::new();
  if query.wants(Relation::CategoryProducts) {
    let ids: Vec<i64> = categories.iter().map(|c| c.id).collect();
    for product in products_for_categories(pool, &ids).await? {
      grouped.entry(product.category_id).or_default().push(product);
    }
  }

  Ok(
    categories
      .into_iter()
      .map(|category| {
        let products = grouped.remove(&category.id).unwrap_or_default();
        CategoryWithProducts { category, products }
      })
      .collect(),
  )
}

/// Preload query for Category -> Products. Grouping happens at the caller;
/// this only fetches the active products of the given categories.
async fn products_for_categories(pool: &SqlitePool, category_ids: &[i64]) -> Result<Vec<Product>> {
  if category_ids.is_empty() {
    return Ok(Vec::new());
  }

  let placeholders = vec!["?"; category_ids.len()].join(", ");
  let sql = format!(
    "SELECT {} FROM products WHERE category_id IN ({}) AND deleted_at IS NULL ORDER BY id ASC",
    Product::COLUMNS,
    placeholders
  );

  let mut query = sqlx::query_as::<_, Product>(&sql);
  for id in category_ids {
    query = query.bind(*id);
  }
  Ok(query.fetch_all(pool).await?)
}

pub async fn get_category(pool: &SqlitePool, id: i64) -> Result<Category> {
  let category: Option<Category> = sqlx::query_as(&format!(
    "SELECT {} FROM categories WHERE id = ? AND deleted_at IS NULL",
    Category::COLUMNS
  ))
  .bind(id)
  .fetch_optional(pool)
  .await?;

  category.ok_or_else(|| AppError::NotFound(format!("Category with ID {} not found.", id)))
}

pub async fn create_category(pool: &SqlitePool, payload: CategoryPayload) -> Result<Category> {
  validate(&payload)?;

  let now = Utc::now();
  let category: Category = sqlx::query_as(&format!(
    "INSERT INTO categories (name, description, created_at, updated_at) VALUES (?, ?, ?, ?) RETURNING {}",
    Category::COLUMNS
  ))
  .bind(&payload.name)
  .bind(&payload.description)
  .bind(now)
  .bind(now)
  .fetch_one(pool)
  .await?;

  info!("Created category {} ({}).", category.id, category.name);
  Ok(category)
}

pub async fn update_category(pool: &SqlitePool, id: i64, payload: CategoryPayload) -> Result<Category> {
  validate(&payload)?;

  let mut category = get_category(pool, id).await?;
  category.name = payload.name;
  category.description = payload.description;
  category.updated_at = Utc::now();

  sqlx::query("UPDATE categories SET name = ?, description = ?, updated_at = ? WHERE id = ?")
    .bind(&category.name)
    .bind(&category.description)
    .bind(category.updated_at)
    .bind(category.id)
    .execute(pool)
    .await?;

  info!("Updated category {}.", category.id);
  Ok(category)
}

pub async fn delete_category(pool: &SqlitePool, id: i64) -> Result<()> {
  let now = Utc::now();
  let result = sqlx::query("UPDATE categories SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL")
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("Category with ID {} not found.", id)));
  }

  info!("Soft-deleted category {}.", id);
  Ok(())
}

pub async fn search_categories_by_name(pool: &SqlitePool, name: &str) -> Result<Vec<Category>> {
  let categories = ScopedQuery::new(Category::TABLE, Category::COLUMNS)
    .scope(Category::active())
    .scope(Category::by_name(name))
    .fetch_all(pool)
    .await?;
  Ok(categories)
}
