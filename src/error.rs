use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};

use crate::prelude::{error, warn};

#[derive(thiserror::Error, Debug)]
pub enum Error {
  /// Unknown service type or missing fee rule
  #[error("Configuration error: {0}")]
  Configuration(String),
  #[error("Invalid arguments: {0}")]
  InvalidArgs(String),
  #[error("Internal error: {0}")]
  Internal(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
  pub fn status(&self) -> StatusCode {
    match self {
      Error::Configuration(_) | Error::InvalidArgs(_) => {
        StatusCode::BAD_REQUEST
      }
      Error::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }

  pub(crate) fn overflow(what: &str) -> Self {
    Error::Internal(format!("{what} overflow"))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      error!("request failed: {self}");
    } else {
      warn!("request rejected: {self}");
    }
    (status, Json(json::json!({ "error": self.to_string() }))).into_response()
  }
}
