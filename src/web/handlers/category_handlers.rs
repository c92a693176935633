// src/web/handlers/category_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::models::category::CategoryPayload;
use crate::services::categories;
use crate::state::AppState;
use crate::web::handlers::parse_id;

#[derive(Deserialize, Debug)]
pub struct NameSearchQuery {
  pub name: Option<String>,
}

#[instrument(name = "handler::list_categories", skip(app_state))]
pub async fn list_categories_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let categories = categories::list_categories(&app_state.db_pool).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Categories fetched successfully.",
      "categories": categories
  })))
}

#[instrument(name = "handler::list_categories_with_products", skip(app_state))]
pub async fn list_categories_with_products_handler(
  app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
  let categories = categories::list_categories_with_products(&app_state.db_pool).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Categories fetched successfully.",
      "categories": categories
  })))
}

#[instrument(name = "handler::get_category", skip(app_state, path), fields(category_id = %path.as_ref()))]
pub async fn get_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let category_id = parse_id(&path.into_inner(), "category")?;
  let category = categories::get_category(&app_state.db_pool, category_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Category fetched successfully.",
      "category": category
  })))
}

#[instrument(name = "handler::create_category", skip(app_state, payload))]
pub async fn create_category_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<CategoryPayload>,
) -> Result<HttpResponse, AppError> {
  let category = categories::create_category(&app_state.db_pool, payload.into_inner()).await?;

  Ok(HttpResponse::Created().json(json!({
      "message": "Category created successfully.",
      "category": category
  })))
}

#[instrument(name = "handler::update_category", skip(app_state, path, payload), fields(category_id = %path.as_ref()))]
pub async fn update_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<CategoryPayload>,
) -> Result<HttpResponse, AppError> {
  let category_id = parse_id(&path.into_inner(), "category")?;
  let category = categories::update_category(&app_state.db_pool, category_id, payload.into_inner()).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Category updated successfully.",
      "category": category
  })))
}

#[instrument(name = "handler::delete_category", skip(app_state, path), fields(category_id = %path.as_ref()))]
pub async fn delete_category_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let category_id = parse_id(&path.into_inner(), "category")?;
  categories::delete_category(&app_state.db_pool, category_id).await?;

  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::search_categories", skip(app_state, query))]
pub async fn search_categories_handler(
  app_state: web::Data<AppState>,
  query: web::Query<NameSearchQuery>,
) -> Result<HttpResponse, AppError> {
  let name = match query.name.as_deref() {
    Some(name) if !name.is_empty() => name,
    _ => return Err(AppError::Validation("Name parameter is required".to_string())),
  };
  let categories = categories::search_categories_by_name(&app_state.db_pool, name).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Categories fetched successfully.",
      "categories": categories
  })))
}
