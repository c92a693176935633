// src/seed.rs
//
// Catalog seeding: get-or-create by name, so running it twice is harmless.

use sqlx::SqlitePool;
use tracing::info;

use crate::errors::Result;
use crate::models::category::CategoryPayload;
use crate::models::product::ProductPayload;
use crate::services::{categories, products};

const CATEGORIES: &[(&str, &str)] = &[
  ("Electronics", "Electronic devices and gadgets"),
  ("Clothing", "Apparel and fashion items"),
  ("Books", "Books and literature"),
  ("Home & Kitchen", "Home and kitchen items"),
  ("Sports", "Sports equipment and gear"),
];

// (name, description, price, quantity, category_id)
const PRODUCTS: &[(&str, &str, f64, i64, i64)] = &[
  // Electronics
  ("Smartphone", "Latest model smartphone", 999.99, 50, 1),
  ("Laptop", "High-performance laptop", 1299.99, 30, 1),
  ("Wireless Headphones", "Noise-canceling wireless headphones", 199.99, 100, 1),
  ("Tablet", "10-inch tablet with retina display", 499.99, 45, 1),
  ("Smartwatch", "Fitness and health tracking smartwatch", 249.99, 75, 1),
  // Clothing
  ("T-Shirt", "Cotton crew neck t-shirt", 19.99, 200, 2),
  ("Jeans", "Classic blue denim jeans", 59.99, 150, 2),
  ("Hoodie", "Warm pullover hoodie", 39.99, 100, 2),
  ("Sneakers", "Comfortable everyday sneakers", 79.99, 80, 2),
  ("Winter Jacket", "Waterproof insulated winter jacket", 129.99, 60, 2),
  // Books
  ("Programming in Rust", "Learn the Rust programming language", 34.99, 40, 3),
  ("Science Fiction Anthology", "Collection of sci-fi short stories", 24.99, 35, 3),
  ("Cookbook", "International cuisine recipes", 29.99, 25, 3),
  ("History Book", "Comprehensive world history", 49.99, 20, 3),
  ("Self-Help Guide", "Personal development and growth", 19.99, 50, 3),
  // Home & Kitchen
  ("Coffee Maker", "Automatic drip coffee maker", 89.99, 30, 4),
  ("Cookware Set", "10-piece non-stick cookware set", 199.99, 25, 4),
  ("Blender", "High-speed countertop blender", 79.99, 40, 4),
  ("Bedding Set", "Queen size cotton bedding set", 129.99, 35, 4),
  ("Smart Light Bulbs", "WiFi-enabled color changing bulbs", 49.99, 60, 4),
  // Sports
  ("Yoga Mat", "Non-slip exercise yoga mat", 29.99, 100, 5),
  ("Dumbbells", "Pair of 5kg dumbbells", 39.99, 75, 5),
  ("Basketball", "Official size basketball", 24.99, 50, 5),
  ("Tennis Racket", "Professional tennis racket", 149.99, 30, 5),
  ("Fitness Tracker", "Activity and sleep tracking band", 99.99, 65, 5),
];

pub async fn run(pool: &SqlitePool) -> Result<()> {
  info!("Starting to seed the catalog...");

  for (name, description) in CATEGORIES {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM categories WHERE name = ? AND deleted_at IS NULL")
      .bind(name)
      .fetch_optional(pool)
      .await?;
    if existing.is_none() {
      categories::create_category(
        pool,
        CategoryPayload {
          name: name.to_string(),
          description: description.to_string(),
        },
      )
      .await?;
      info!("Created category: {}", name);
    } else {
      info!("Category already exists: {}", name);
    }
  }

  for (name, description, price, quantity, category_id) in PRODUCTS {
    let existing: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE name = ? AND deleted_at IS NULL")
      .bind(name)
      .fetch_optional(pool)
      .await?;
    if existing.is_none() {
      products::create_product(
        pool,
        ProductPayload {
          name: name.to_string(),
          description: description.to_string(),
          price: *price,
          quantity: *quantity,
          category_id: *category_id,
        },
      )
      .await?;
      info!("Created product: {}", name);
    } else {
      info!("Product already exists: {}", name);
    }
  }

  info!("Finished seeding the catalog successfully!");
  Ok(())
}
