// src/services/carts.rs
//
// Cart CRUD plus the pricing engine. A cart's total_price is denormalized:
// it must always equal the sum of price * quantity over the cart's active
// items, so every item mutation recomputes it before the request returns.
// Each mutation runs inside one transaction spanning the existence checks,
// the item write and the recompute; a failure partway rolls everything
// back, so a NotFound add or remove leaves no writes behind.

use std::collections::HashMap;

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use crate::errors::{AppError, Result};
use crate::models::cart::{Cart, CartPayload, CartWithItems};
use crate::models::cart_item::{CartItem, CartItemWithProduct, NewCartItem};
use crate::models::product::Product;
use crate::store::scope::{Relation, ScopedQuery};

pub async fn list_carts(pool: &SqlitePool) -> Result<Vec<Cart>> {
  let carts = ScopedQuery::new(Cart::TABLE, Cart::COLUMNS)
    .scope(Cart::active())
    .fetch_all(pool)
    .await?;
  Ok(carts)
}

pub async fn get_cart(pool: &SqlitePool, id: i64) -> Result<CartWithItems> {
  let cart = find_cart(pool, id).await?;
  let items = items_for_cart(pool, cart.id).await?;
  Ok(CartWithItems { cart, items })
}

pub async fn create_cart(pool: &SqlitePool, payload: CartPayload) -> Result<Cart> {
  let now = Utc::now();
  let cart: Cart = sqlx::query_as(&format!(
    "INSERT INTO carts (user_id, total_price, created_at, updated_at) VALUES (?, 0, ?, ?) RETURNING {}",
    Cart::COLUMNS
  ))
  .bind(payload.user_id)
  .bind(now)
  .bind(now)
  .fetch_one(pool)
  .await?;

  info!("Created cart {} for user {}.", cart.id, cart.user_id);
  Ok(cart)
}

pub async fn list_carts_by_user(pool: &SqlitePool, user_id: i64) -> Result<Vec<CartWithItems>> {
  let query = ScopedQuery::new(Cart::TABLE, Cart::COLUMNS)
    .scope(Cart::active())
    .scope(Cart::with_items())
    .scope(Cart::by_user(user_id));
  let carts: Vec<Cart> = query.fetch_all(pool).await?;

  let mut result = Vec::with_capacity(carts.len());
  for cart in carts {
    let items = if query.wants(Relation::CartItems) {
      items_for_cart(pool, cart.id).await?
    } else {
      Vec::new()
    };
    result.push(CartWithItems { cart, items });
  }
  Ok(result)
}

/// Soft-delete a cart. Deliberately does not cascade to its items; they
/// stay behind as orphaned rows, excluded only when a caller applies the
/// active-cart scope.
pub async fn delete_cart(pool: &SqlitePool, id: i64) -> Result<()> {
  let now = Utc::now();
  let result = sqlx::query("UPDATE carts SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL")
    .bind(now)
    .bind(now)
    .bind(id)
    .execute(pool)
    .await?;

  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!("Cart with ID {} not found.", id)));
  }

  info!("Soft-deleted cart {}.", id);
  Ok(())
}

/// Add an item to a cart, snapshotting the product's current unit price
/// onto the item row, then recompute the cart total. The item price is
/// immutable after creation; later product price edits do not touch it.
pub async fn add_item_to_cart(pool: &SqlitePool, cart_id: i64, payload: NewCartItem) -> Result<CartItem> {
  if payload.quantity < 1 {
    return Err(AppError::Validation("Quantity must be a positive number.".to_string()));
  }

  let mut tx = pool.begin().await?;

  // The cart must exist and be live before anything is written.
  let cart_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM carts WHERE id = ? AND deleted_at IS NULL")
    .bind(cart_id)
    .fetch_optional(&mut *tx)
    .await?;
  if cart_exists.is_none() {
    return Err(AppError::NotFound(format!("Cart with ID {} not found.", cart_id)));
  }

  let product: Option<Product> = sqlx::query_as(&format!(
    "SELECT {} FROM products WHERE id = ? AND deleted_at IS NULL",
    Product::COLUMNS
  ))
  .bind(payload.product_id)
  .fetch_optional(&mut *tx)
  .await?;
  let product =
    product.ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found.", payload.product_id)))?;

  let now = Utc::now();
  let item: CartItem = sqlx::query_as(&format!(
    "INSERT INTO cart_items (cart_id, product_id, quantity, price, created_at, updated_at) \
     VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
    CartItem::COLUMNS
  ))
  .bind(cart_id)
  .bind(payload.product_id)
  .bind(payload.quantity)
  .bind(product.price) // price snapshot
  .bind(now)
  .bind(now)
  .fetch_one(&mut *tx)
  .await?;

  let total = recompute_cart_total(&mut tx, cart_id).await?;
  tx.commit().await?;

  info!(
    "Added item {} (product {}, quantity {}) to cart {}; new total {:.2}.",
    item.id, item.product_id, item.quantity, cart_id, total
  );
  Ok(item)
}

/// Soft-delete an item from a cart, then recompute the cart total.
/// Removal is terminal; there is no restore operation.
pub async fn remove_item_from_cart(pool: &SqlitePool, cart_id: i64, item_id: i64) -> Result<()> {
  let mut tx = pool.begin().await?;

  let cart_exists: Option<i64> = sqlx::query_scalar("SELECT id FROM carts WHERE id = ? AND deleted_at IS NULL")
    .bind(cart_id)
    .fetch_optional(&mut *tx)
    .await?;
  if cart_exists.is_none() {
    return Err(AppError::NotFound(format!("Cart with ID {} not found.", cart_id)));
  }

  let now = Utc::now();
  let result = sqlx::query(
    "UPDATE cart_items SET deleted_at = ?, updated_at = ? WHERE id = ? AND cart_id = ? AND deleted_at IS NULL",
  )
  .bind(now)
  .bind(now)
  .bind(item_id)
  .bind(cart_id)
  .execute(&mut *tx)
  .await?;
  if result.rows_affected() == 0 {
    return Err(AppError::NotFound(format!(
      "Cart item with ID {} not found in cart {}.",
      item_id, cart_id
    )));
  }

  let total = recompute_cart_total(&mut tx, cart_id).await?;
  tx.commit().await?;

  info!("Removed item {} from cart {}; new total {:.2}.", item_id, cart_id, total);
  Ok(())
}

/// Recompute and persist a cart's total_price as the sum of
/// price * quantity over its active items (0 when the cart is empty).
pub async fn recompute_cart_total(conn: &mut SqliteConnection, cart_id: i64) -> Result<f64> {
  let total: f64 = sqlx::query_scalar(
    "SELECT COALESCE(SUM(price * quantity), 0.0) FROM cart_items WHERE cart_id = ? AND deleted_at IS NULL",
  )
  .bind(cart_id)
  .fetch_one(&mut *conn)
  .await?;

  sqlx::query("UPDATE carts SET total_price = ?, updated_at = ? WHERE id = ?")
    .bind(total)
    .bind(Utc::now())
    .bind(cart_id)
    .execute(&mut *conn)
    .await?;

  Ok(total)
}

async fn find_cart(pool: &SqlitePool, id: i64) -> Result<Cart> {
  let cart: Option<Cart> = sqlx::query_as(&format!(
    "SELECT {} FROM carts WHERE id = ? AND deleted_at IS NULL",
    Cart::COLUMNS
  ))
  .bind(id)
  .fetch_optional(pool)
  .await?;

  cart.ok_or_else(|| AppError::NotFound(format!("Cart with ID {} not found.", id)))
}

/// Active items of a cart, with their products preloaded. A product that
/// was soft-deleted after the item was added comes back as None.
async fn items_for_cart(pool: &SqlitePool, cart_id: i64) -> Result<Vec<CartItemWithProduct>> {
  let query = ScopedQuery::new(CartItem::TABLE, CartItem::COLUMNS)
    .scope(CartItem::active())
    .scope(CartItem::by_cart(cart_id))
    .scope(CartItem::with_product());
  let items: Vec<CartItem> = query.fetch_all(pool).await?;

  let mut products: HashMap<i64, Product> = HashMap::new();
  if query.wants(Relation::ItemProduct) && !items.is_empty() {
    let mut ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
    ids.sort_unstable();
    ids.dedup();

    let placeholders = vec!["?"; ids.len()].join(", ");
    let sql = format!(
      "SELECT {} FROM products WHERE id IN ({}) AND deleted_at IS NULL",
      Product::COLUMNS,
      placeholders
    );
    let mut product_query = sqlx::query_as::<_, Product>(&sql);
    for id in &ids {
      product_query = product_query.bind(*id);
    }
    for product in product_query.fetch_all(pool).await? {
      products.insert(product.id, product);
    }
  }

  Ok(
    items
      .into_iter()
      .map(|item| {
        let product = products.get(&item.product_id).cloned();
        CartItemWithProduct { item, product }
      })
      .collect(),
  )
}
