// tests/entity_services_tests.rs
mod common; // Reference the common module

use common::*;
use shop_api::errors::AppError;
use shop_api::models::category::CategoryPayload;
use shop_api::models::product::ProductPayload;
use shop_api::models::user::UserPayload;
use shop_api::services::{carts, categories, products, users};
use shop_api::{seed, store};

#[tokio::test]
async fn category_crud_cycle() {
  let pool = test_pool().await;

  let created = categories::create_category(
    &pool,
    CategoryPayload {
      name: "Electronics".to_string(),
      description: "Gadgets".to_string(),
    },
  )
  .await
  .unwrap();
  assert!(created.id > 0);
  assert!(created.deleted_at.is_none());

  let fetched = categories::get_category(&pool, created.id).await.unwrap();
  assert_eq!(fetched.name, "Electronics");

  let updated = categories::update_category(
    &pool,
    created.id,
    CategoryPayload {
      name: "Consumer Electronics".to_string(),
      description: "Gadgets and devices".to_string(),
    },
  )
  .await
  .unwrap();
  // Merge copies only the mutable fields; identity and creation stay put.
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.created_at, created.created_at);
  assert_eq!(updated.name, "Consumer Electronics");
  assert!(updated.deleted_at.is_none());

  categories::delete_category(&pool, created.id).await.unwrap();
  let err = categories::get_category(&pool, created.id).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));
  assert!(categories::list_categories(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn product_update_merges_all_mutable_fields() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;
  let other = seed_category(&pool, "Books").await;
  let product = seed_product(&pool, "Widget", 49.99, 100, category.id).await;

  let updated = products::update_product(
    &pool,
    product.id,
    ProductPayload {
      name: "Widget v2".to_string(),
      description: "Improved widget".to_string(),
      price: 59.99,
      quantity: 80,
      category_id: other.id,
    },
  )
  .await
  .unwrap();

  assert_eq!(updated.id, product.id);
  assert_eq!(updated.name, "Widget v2");
  assert_eq!(updated.price, 59.99);
  assert_eq!(updated.quantity, 80);
  assert_eq!(updated.category_id, other.id);

  let fetched = products::get_product(&pool, product.id).await.unwrap();
  assert_eq!(fetched.name, "Widget v2");
  assert_eq!(fetched.created_at, product.created_at);
}

#[tokio::test]
async fn operations_on_missing_or_deleted_products_are_not_found() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;
  let product = seed_product(&pool, "Widget", 49.99, 100, category.id).await;

  let err = products::get_product(&pool, 4242).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));

  products::delete_product(&pool, product.id).await.unwrap();

  let err = products::get_product(&pool, product.id).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));

  let err = products::update_product(
    &pool,
    product.id,
    ProductPayload {
      name: "Zombie".to_string(),
      description: "Should not come back".to_string(),
      price: 1.0,
      quantity: 1,
      category_id: category.id,
    },
  )
  .await
  .unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));

  let err = products::delete_product(&pool, product.id).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn malformed_input_is_rejected_before_touching_storage() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;

  let err = products::create_product(
    &pool,
    ProductPayload {
      name: "  ".to_string(),
      description: "Nameless".to_string(),
      price: 10.0,
      quantity: 1,
      category_id: category.id,
    },
  )
  .await
  .unwrap_err();
  assert!(matches!(err, AppError::Validation(_)));

  let err = products::create_product(
    &pool,
    ProductPayload {
      name: "Negative".to_string(),
      description: "Bad price".to_string(),
      price: -1.0,
      quantity: 1,
      category_id: category.id,
    },
  )
  .await
  .unwrap_err();
  assert!(matches!(err, AppError::Validation(_)));

  let err = categories::create_category(
    &pool,
    CategoryPayload {
      name: String::new(),
      description: "Empty".to_string(),
    },
  )
  .await
  .unwrap_err();
  assert!(matches!(err, AppError::Validation(_)));

  let err = users::create_user(
    &pool,
    UserPayload {
      username: String::new(),
      email: "nobody@example.com".to_string(),
    },
  )
  .await
  .unwrap_err();
  assert!(matches!(err, AppError::Validation(_)));

  assert_eq!(count_rows(&pool, "products").await, 0);
  assert_eq!(count_rows(&pool, "categories").await, 1);
  assert_eq!(count_rows(&pool, "users").await, 0);
}

#[tokio::test]
async fn user_crud_cycle() {
  let pool = test_pool().await;

  let created = users::create_user(
    &pool,
    UserPayload {
      username: "alice".to_string(),
      email: "alice@example.com".to_string(),
    },
  )
  .await
  .unwrap();

  let updated = users::update_user(
    &pool,
    created.id,
    UserPayload {
      username: "alice2".to_string(),
      email: "alice2@example.com".to_string(),
    },
  )
  .await
  .unwrap();
  assert_eq!(updated.id, created.id);
  assert_eq!(updated.username, "alice2");

  users::delete_user(&pool, created.id).await.unwrap();
  let err = users::get_user(&pool, created.id).await.unwrap_err();
  assert!(matches!(err, AppError::NotFound(_)));
  assert!(users::list_users(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn a_dangling_category_reference_is_tolerated() {
  let pool = test_pool().await;

  // No category with id 999 exists; the product is created anyway.
  let product = seed_product(&pool, "Orphan", 10.0, 5, 999).await;
  assert_eq!(product.category_id, 999);

  let listed = products::list_products_by_category(&pool, 999).await.unwrap();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].name, "Orphan");
}

#[tokio::test]
async fn get_cart_embeds_products_and_tolerates_their_later_deletion() {
  let pool = test_pool().await;
  let category = seed_category(&pool, "Electronics").await;
  let product = seed_product(&pool, "Widget", 25.0, 100, category.id).await;
  let user = seed_user(&pool, "alice").await;
  let cart = seed_cart(&pool, user.id).await;

  carts::add_item_to_cart(
    &pool,
    cart.id,
    shop_api::models::cart_item::NewCartItem {
      product_id: product.id,
      quantity: 2,
    },
  )
  .await
  .unwrap();

  let fetched = carts::get_cart(&pool, cart.id).await.unwrap();
  assert_eq!(fetched.items.len(), 1);
  assert!(fetched.items[0].product.is_some());

  products::delete_product(&pool, product.id).await.unwrap();

  // The item survives with its snapshot price; only the embed goes away.
  let fetched = carts::get_cart(&pool, cart.id).await.unwrap();
  assert_eq!(fetched.items.len(), 1);
  assert!(fetched.items[0].product.is_none());
  assert_eq!(fetched.items[0].item.price, 25.0);
  assert_eq!(fetched.cart.total_price, 50.0);
}

#[tokio::test]
async fn seeding_is_idempotent() {
  let pool = test_pool().await;
  store::migrate(&pool).await.unwrap();

  seed::run(&pool).await.unwrap();
  assert_eq!(count_rows(&pool, "categories").await, 5);
  assert_eq!(count_rows(&pool, "products").await, 25);

  seed::run(&pool).await.unwrap();
  assert_eq!(count_rows(&pool, "categories").await, 5);
  assert_eq!(count_rows(&pool, "products").await, 25);
}
