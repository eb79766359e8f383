//! Error type for `mentor-llm`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("generator returned {status}: {body}")]
  Status {
    status: reqwest::StatusCode,
    body:   String,
  },

  #[error("generator returned no content")]
  EmptyResponse,

  #[error("generator output contains no JSON object")]
  NoJsonObject,

  #[error("generator output is not valid: {0}")]
  Json(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
