//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("store error: {0}")]
  Store(#[source] BoxError),

  /// The external generator failed or produced unusable output.
  #[error("generation failed: {0}")]
  Generation(#[source] BoxError),
}

impl ApiError {
  pub fn store(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Store(Box::new(e))
  }

  pub fn generation(e: impl std::error::Error + Send + Sync + 'static) -> Self {
    Self::Generation(Box::new(e))
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
      ApiError::Generation(_) => StatusCode::BAD_GATEWAY,
    };
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }
    let message = self.to_string();
    // `detail` is what the browser frontend reads.
    let body = json!({ "status": "error", "error": message, "detail": message });
    (status, Json(body)).into_response()
  }
}
