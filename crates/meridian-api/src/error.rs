//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("upstream unavailable: {0}")]
  Upstream(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<meridian_core::Error> for ApiError {
  fn from(e: meridian_core::Error) -> Self {
    use meridian_core::Error;
    match e {
      Error::NotFound(m) => ApiError::NotFound(m),
      Error::InvalidQuery(m) => ApiError::BadRequest(m),
      Error::Fetch(f) => ApiError::Upstream(f.to_string()),
      Error::Persistence(inner) => ApiError::Store(inner),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, title, details) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, "Country not found", m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, "Validation failed", m.clone()),
      ApiError::Upstream(m) => {
        error!(error = %m, "upstream fetch failed");
        (StatusCode::SERVICE_UNAVAILABLE, "External data source unavailable", m.clone())
      }
      ApiError::Store(e) => {
        error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error", e.to_string())
      }
    };
    (status, Json(json!({ "error": title, "details": details }))).into_response()
  }
}
