// tests/scope_tests.rs
mod common; // Reference the common module

use common::*;
use shop_api::models::cart_item::NewCartItem;
use shop_api::models::product::Product;
use shop_api::services::{carts, categories, products, users};
use shop_api::store::scope::ScopedQuery;

#[tokio::test]
async fn price_range_returns_only_products_inside_the_bounds() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;
  seed_product(&pool, "Entry", 10.99, 10, category.id).await;
  seed_product(&pool, "Midrange", 50.99, 10, category.id).await;
  seed_product(&pool, "Premium", 100.99, 10, category.id).await;

  let found = products::list_products_by_price_range(&pool, 30.0, 80.0).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].name, "Midrange");
  assert_eq!(found[0].price, 50.99);
}

#[tokio::test]
async fn price_range_bounds_are_inclusive() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;
  seed_product(&pool, "Lower", 30.0, 10, category.id).await;
  seed_product(&pool, "Upper", 80.0, 10, category.id).await;
  seed_product(&pool, "Outside", 80.01, 10, category.id).await;

  let found = products::list_products_by_price_range(&pool, 30.0, 80.0).await.unwrap();
  let names: Vec<&str> = found.iter().map(|p| p.name.as_str()).collect();
  assert_eq!(names, vec!["Lower", "Upper"]);
}

#[tokio::test]
async fn name_search_matches_substrings() {
  let pool = test_pool().await;
  seed_category(&pool, "Apple").await;
  seed_category(&pool, "Banana").await;
  seed_category(&pool, "Apple Premium").await;

  let found = categories::search_categories_by_name(&pool, "Apple").await.unwrap();
  let names: Vec<&str> = found.iter().map(|c| c.name.as_str()).collect();
  assert_eq!(names, vec!["Apple", "Apple Premium"]);
}

#[tokio::test]
async fn by_category_returns_only_that_category_products() {
  let pool = test_pool().await;
  let electronics = seed_category(&pool, "Electronics").await;
  let books = seed_category(&pool, "Books").await;
  seed_product(&pool, "Laptop", 1299.99, 5, electronics.id).await;
  seed_product(&pool, "Novel", 14.99, 50, books.id).await;

  let found = products::list_products_by_category(&pool, books.id).await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].name, "Novel");
}

#[tokio::test]
async fn soft_deleted_rows_vanish_from_scoped_queries_but_not_unscoped_ones() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;
  seed_product(&pool, "Kept", 10.0, 10, category.id).await;
  let doomed = seed_product(&pool, "Doomed", 20.0, 10, category.id).await;

  products::delete_product(&pool, doomed.id).await.unwrap();

  let active = products::list_products(&pool).await.unwrap();
  assert_eq!(active.len(), 1);
  assert_eq!(active[0].name, "Kept");

  // The same query without the active scope still sees the row.
  let everything: Vec<Product> = ScopedQuery::new(Product::TABLE, Product::COLUMNS)
    .fetch_all(&pool)
    .await
    .unwrap();
  assert_eq!(everything.len(), 2);
  assert!(everything.iter().any(|p| p.name == "Doomed" && p.deleted_at.is_some()));
}

#[tokio::test]
async fn in_stock_scope_drops_sold_out_products() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;
  seed_product(&pool, "Available", 10.0, 3, category.id).await;
  seed_product(&pool, "SoldOut", 10.0, 0, category.id).await;

  let in_stock: Vec<Product> = ScopedQuery::new(Product::TABLE, Product::COLUMNS)
    .scope(Product::active())
    .scope(Product::in_stock())
    .fetch_all(&pool)
    .await
    .unwrap();
  assert_eq!(in_stock.len(), 1);
  assert_eq!(in_stock[0].name, "Available");
}

#[tokio::test]
async fn with_products_load_never_restricts_the_category_row_count() {
  let pool = test_pool().await;
  let stocked = seed_category(&pool, "Stocked").await;
  let empty = seed_category(&pool, "Empty").await;
  seed_product(&pool, "Widget", 10.0, 10, stocked.id).await;

  let listed = categories::list_categories_with_products(&pool).await.unwrap();
  assert_eq!(listed.len(), 2);

  let stocked_entry = listed.iter().find(|c| c.category.id == stocked.id).unwrap();
  assert_eq!(stocked_entry.products.len(), 1);
  let empty_entry = listed.iter().find(|c| c.category.id == empty.id).unwrap();
  assert!(empty_entry.products.is_empty());
}

#[tokio::test]
async fn with_products_load_excludes_soft_deleted_products() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;
  seed_product(&pool, "Kept", 10.0, 10, category.id).await;
  let doomed = seed_product(&pool, "Doomed", 20.0, 10, category.id).await;
  products::delete_product(&pool, doomed.id).await.unwrap();

  let listed = categories::list_categories_with_products(&pool).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].products.len(), 1);
  assert_eq!(listed[0].products[0].name, "Kept");
}

#[tokio::test]
async fn email_lookup_is_an_exact_match() {
  let pool = test_pool().await;
  seed_user(&pool, "alice").await;
  seed_user(&pool, "alicia").await;

  let found = users::find_users_by_email(&pool, "alice@example.com").await.unwrap();
  assert_eq!(found.len(), 1);
  assert_eq!(found[0].username, "alice");
}

#[tokio::test]
async fn carts_by_user_composes_active_ownership_and_item_loading() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;
  let product = seed_product(&pool, "Widget", 25.0, 100, category.id).await;
  let alice = seed_user(&pool, "alice").await;
  let bob = seed_user(&pool, "bob").await;

  let alice_cart = seed_cart(&pool, alice.id).await;
  seed_cart(&pool, bob.id).await;
  let deleted_cart = seed_cart(&pool, alice.id).await;
  carts::delete_cart(&pool, deleted_cart.id).await.unwrap();

  carts::add_item_to_cart(
    &pool,
    alice_cart.id,
    NewCartItem {
      product_id: product.id,
      quantity: 2,
    },
  )
  .await
  .unwrap();

  let listed = carts::list_carts_by_user(&pool, alice.id).await.unwrap();
  assert_eq!(listed.len(), 1); // bob's cart and the deleted cart are out
  assert_eq!(listed[0].cart.id, alice_cart.id);
  assert_eq!(listed[0].items.len(), 1);
  assert_eq!(listed[0].items[0].item.quantity, 2);

  // The item's product rides along with the preload.
  let embedded = listed[0].items[0].product.as_ref().unwrap();
  assert_eq!(embedded.id, product.id);
}

#[tokio::test]
async fn users_with_carts_load_preloads_only_active_carts() {
  let pool = test_pool().await;
  let alice = seed_user(&pool, "alice").await;
  let bob = seed_user(&pool, "bob").await;

  seed_cart(&pool, alice.id).await;
  let doomed = seed_cart(&pool, alice.id).await;
  carts::delete_cart(&pool, doomed.id).await.unwrap();

  let listed = users::list_users_with_carts(&pool).await.unwrap();
  assert_eq!(listed.len(), 2);

  let alice_entry = listed.iter().find(|u| u.user.id == alice.id).unwrap();
  assert_eq!(alice_entry.carts.len(), 1);
  let bob_entry = listed.iter().find(|u| u.user.id == bob.id).unwrap();
  assert!(bob_entry.carts.is_empty());
}
