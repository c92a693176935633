// src/web/handlers/cart_handlers.rs

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::cart::CartPayload;
use crate::models::cart_item::NewCartItem;
use crate::services::carts;
use crate::state::AppState;
use crate::web::handlers::parse_id;

#[instrument(name = "handler::list_carts", skip(app_state))]
pub async fn list_carts_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let carts = carts::list_carts(&app_state.db_pool).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Carts fetched successfully.",
      "carts": carts
  })))
}

#[instrument(name = "handler::get_cart", skip(app_state, path), fields(cart_id = %path.as_ref()))]
pub async fn get_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let cart_id = parse_id(&path.into_inner(), "cart")?;
  let cart = carts::get_cart(&app_state.db_pool, cart_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Cart fetched successfully.",
      "cart": cart
  })))
}

#[instrument(name = "handler::create_cart", skip(app_state, payload))]
pub async fn create_cart_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CartPayload>,
) -> Result<HttpResponse, AppError> {
  let cart = carts::create_cart(&app_state.db_pool, payload.into_inner()).await?;

  Ok(HttpResponse::Created().json(json!({
      "message": "Cart created successfully.",
      "cart": cart
  })))
}

#[instrument(name = "handler::delete_cart", skip(app_state, path), fields(cart_id = %path.as_ref()))]
pub async fn delete_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let cart_id = parse_id(&path.into_inner(), "cart")?;
  carts::delete_cart(&app_state.db_pool, cart_id).await?;

  Ok(HttpResponse::NoContent().finish())
}

#[instrument(
    name = "handler::add_item_to_cart",
    skip(app_state, path, payload),
    fields(cart_id = %path.as_ref(), product_id = %payload.product_id, quantity = %payload.quantity)
)]
pub async fn add_item_to_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<NewCartItem>,
) -> Result<HttpResponse, AppError> {
  let cart_id = parse_id(&path.into_inner(), "cart")?;
  let item = carts::add_item_to_cart(&app_state.db_pool, cart_id, payload.into_inner()).await?;

  info!(
    "Add to cart successful. Item ID: {}, Product ID: {}, Quantity: {}",
    item.id, item.product_id, item.quantity
  );

  Ok(HttpResponse::Created().json(json!({
      "message": "Item added to cart successfully.",
      "cartItem": item
  })))
}

#[instrument(
    name = "handler::remove_item_from_cart",
    skip(app_state, path),
    fields(cart_id = %path.0, item_id = %path.1)
)]
pub async fn remove_item_from_cart_handler(
  app_state: web::Data<AppState>,
  path: web::Path<(String, String)>,
) -> Result<HttpResponse, AppError> {
  let (raw_cart_id, raw_item_id) = path.into_inner();
  let cart_id = parse_id(&raw_cart_id, "cart")?;
  let item_id = parse_id(&raw_item_id, "item")?;
  carts::remove_item_from_cart(&app_state.db_pool, cart_id, item_id).await?;

  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::list_carts_by_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn list_carts_by_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let user_id = parse_id(&path.into_inner(), "user")?;
  let carts = carts::list_carts_by_user(&app_state.db_pool, user_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Carts fetched successfully.",
      "carts": carts
  })))
}
