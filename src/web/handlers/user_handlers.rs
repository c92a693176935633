// src/web/handlers/user_handlers.rs

use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::instrument;

use crate::errors::AppError;
use crate::models::user::UserPayload;
use crate::services::users;
use crate::state::AppState;
use crate::web::handlers::parse_id;

#[derive(Deserialize, Debug)]
pub struct EmailSearchQuery {
  pub email: Option<String>,
}

#[instrument(name = "handler::list_users", skip(app_state))]
pub async fn list_users_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let users = users::list_users(&app_state.db_pool).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Users fetched successfully.",
      "users": users
  })))
}

#[instrument(name = "handler::list_users_with_carts", skip(app_state))]
pub async fn list_users_with_carts_handler(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
  let users = users::list_users_with_carts(&app_state.db_pool).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Users fetched successfully.",
      "users": users
  })))
}

#[instrument(name = "handler::get_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn get_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let user_id = parse_id(&path.into_inner(), "user")?;
  let user = users::get_user(&app_state.db_pool, user_id).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "User fetched successfully.",
      "user": user
  })))
}

#[instrument(name = "handler::create_user", skip(app_state, payload))]
pub async fn create_user_handler(
  app_state: web::Data<AppState>,
  payload: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
  let user = users::create_user(&app_state.db_pool, payload.into_inner()).await?;

  Ok(HttpResponse::Created().json(json!({
      "message": "User created successfully.",
      "user": user
  })))
}

#[instrument(name = "handler::update_user", skip(app_state, path, payload), fields(user_id = %path.as_ref()))]
pub async fn update_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
  payload: web::Json<UserPayload>,
) -> Result<HttpResponse, AppError> {
  let user_id = parse_id(&path.into_inner(), "user")?;
  let user = users::update_user(&app_state.db_pool, user_id, payload.into_inner()).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "User updated successfully.",
      "user": user
  })))
}

#[instrument(name = "handler::delete_user", skip(app_state, path), fields(user_id = %path.as_ref()))]
pub async fn delete_user_handler(
  app_state: web::Data<AppState>,
  path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
  let user_id = parse_id(&path.into_inner(), "user")?;
  users::delete_user(&app_state.db_pool, user_id).await?;

  Ok(HttpResponse::NoContent().finish())
}

#[instrument(name = "handler::search_users", skip(app_state, query))]
pub async fn search_users_handler(
  app_state: web::Data<AppState>,
  query: web::Query<EmailSearchQuery>,
) -> Result<HttpResponse, AppError> {
  let email = match query.email.as_deref() {
    Some(email) if !email.is_empty() => email,
    _ => return Err(AppError::Validation("Email parameter is required".to_string())),
  };
  let users = users::find_users_by_email(&app_state.db_pool, email).await?;

  Ok(HttpResponse::Ok().json(json!({
      "message": "Users fetched successfully.",
      "users": users
  })))
}
