// src/web/handlers/mod.rs

pub mod cart_handlers;
pub mod category_handlers;
pub mod product_handlers;
pub mod user_handlers;

use crate::errors::AppError;

/// Parse a path identifier. A non-numeric id is a validation failure, not
/// a routing miss.
pub(crate) fn parse_id(raw: &str, label: &str) -> Result<i64, AppError> {
  raw
    .parse::<i64>()
    .map_err(|_| AppError::Validation(format!("Invalid {} ID", label)))
}
