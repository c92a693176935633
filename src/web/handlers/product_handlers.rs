// src/web/handlers/product_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, instrument};

use crate::errors::AppError;
use crate::models::product::ProductPayload;
use crate::services::products;
use crate::state::AppState;
use crate::web::handlers::parse_id;

// Wide explicit bounds stand in for omitted ones; "no bound" is never sent
// to the query layer.
const DEFAULT_PRICE_MIN: f64 = 0.0;
const DEFAULT_PRICE_MAX: f64 = 1_000_000.0;

#[derive(Deserialize, Debug)]
pub struct PriceRangeQuery {
  pub min: Option<f64>,
  pub max: Option<f64>,
}

#[instrument(name = "handler::list_products", skip(app_state))]
pub async fn list_products_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let products = products::list_products(&app_state.db_pool).await?;
  info!("Successfully fetched {} products.", products.len());

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::get_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn get_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = parse_id(&path.into_inner(), "product")?;
  let product = products::get_product(&app_state.db_pool, product_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Product fetched successfully.",
      "product": product
  })))
}

#[instrument(name = "handler::create_product", skip(app_state, payload))]
pub async fn create_product_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
  let product = products::create_product(&app_state.db_pool, payload.into_inner()).await?;

  Ok(HttpResponse::Created().json(json!({
      "message": "Product created successfully.",
      "product": product
  })))
}

#[instrument(name = "handler::update_product", skip(app_state, path, payload), fields(product_id = %path.as_ref()))]
pub async fn update_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<ProductPayload>,
) -> Result<HttpResponse, AppError> {
  let product_id = parse_id(&path.into_inner(), "product")?;
  let product = products::update_product(&app_state.db_pool, product_id, payload.into_inner()).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Product updated successfully.",
      "product": product
  })))
}

#[instrument(name = "handler::delete_product", skip(app_state, path), fields(product_id = %path.as_ref()))]
pub async fn delete_product_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let product_id = parse_id(&path.into_inner(), "product")?;
  products::delete_product(&app_state.db_pool, product_id).await?;

  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::list_products_by_category", skip(app_state, path), fields(category_id = %path.as_ref()))]
pub async fn list_products_by_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let category_id = parse_id(&path.into_inner(), "category")?;
  let products = products::list_products_by_category(&app_state.db_pool, category_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}

#[instrument(name = "handler::list_products_by_price_range", skip(app_state, query))]
pub async fn list_products_by_price_range_handler(
  app_state: web::Data<AppState>,
  query: web::Query<PriceRangeQuery>,
) -> Result<HttpResponse, AppError> {
  let min = query.min.unwrap_or(DEFAULT_PRICE_MIN);
  let max = query.max.unwrap_or(DEFAULT_PRICE_MAX);
  let products = products::list_products_by_price_range(&app_state.db_pool, min, max).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Products fetched successfully.",
      "products": products
  })))
}
