// src/web/routes.rs

use actix_web::web;

use crate::web::handlers::{cart_handlers, category_handlers, product_handlers, user_handlers};

// Simple liveness probe; storage connectivity shows up in the request
// handlers soon enough.
async fn health_check_handler() -> actix_web::HttpResponse {
  actix_web::HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

// This function is called in `main.rs` to configure services for the Actix App.
// Literal path segments are registered before `{id}` routes so that
// `/products/price-range` and friends are not swallowed by the id matcher.
pub fn configure_app_routes(cfg: &mut web::ServiceConfig) {
  cfg
    .route("/health", web::get().to(health_check_handler))
    // Product Routes
    .service(
      web::scope("/products")
        .route("", web::get().to(product_handlers::list_products_handler))
        .route("", web::post().to(product_handlers::create_product_handler))
        .route(
          "/price-range",
          web::get().to(product_handlers::list_products_by_price_range_handler),
        )
        .route(
          "/category/{category_id}",
          web::get().to(product_handlers::list_products_by_category_handler),
        )
        .route("/{id}", web::get().to(product_handlers::get_product_handler))
        .route("/{id}", web::put().to(product_handlers::update_product_handler))
        .route("/{id}", web::delete().to(product_handlers::delete_product_handler)),
    )
    // Category Routes
    .service(
      web::scope("/categories")
        .route("", web::get().to(category_handlers::list_categories_handler))
        .route("", web::post().to(category_handlers::create_category_handler))
        .route(
          "/with-products",
          web::get().to(category_handlers::list_categories_with_products_handler),
        )
        .route("/search", web::get().to(category_handlers::search_categories_handler))
        .route("/{id}", web::get().to(category_handlers::get_category_handler))
        .route("/{id}", web::put().to(category_handlers::update_category_handler))
        .route("/{id}", web::delete().to(category_handlers::delete_category_handler)),
    )
    // Cart Routes
    .service(
      web::scope("/carts")
        .route("", web::get().to(cart_handlers::list_carts_handler))
        .route("", web::post().to(cart_handlers::create_cart_handler))
        .route("/user/{user_id}", web::get().to(cart_handlers::list_carts_by_user_handler))
        .route("/{id}", web::get().to(cart_handlers::get_cart_handler))
        .route("/{id}", web::delete().to(cart_handlers::delete_cart_handler))
        .route("/{id}/items", web::post().to(cart_handlers::add_item_to_cart_handler))
        .route(
          "/{id}/items/{item_id}",
          web::delete().to(cart_handlers::remove_item_from_cart_handler),
        ),
    )
    // User Routes
    .service(
      web::scope("/users")
        .route("", web::get().to(user_handlers::list_users_handler))
        .route("", web::post().to(user_handlers::create_user_handler))
        .route("/with-carts", web::get().to(user_handlers::list_users_with_carts_handler))
        .route("/search", web::get().to(user_handlers::search_users_handler))
        .route("/{id}", web::get().to(user_handlers::get_user_handler))
        .route("/{id}", web::put().to(user_handlers::update_user_handler))
        .route("/{id}", web::delete().to(user_handlers::delete_user_handler)),
    );
}
