//! Error types and axum `IntoResponse` implementation.

use axum::{
  Json,
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use glint_bootstrap::Error as BootstrapError;
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unauthorized")]
  Unauthorized,
  #[error("bad request: {0}")]
  BadRequest(String),
  #[error(transparent)]
  Bootstrap(#[from] BootstrapError),
}

impl Error {
  fn status(&self) -> StatusCode {
    match self {
      Error::Unauthorized => StatusCode::UNAUTHORIZED,
      Error::BadRequest(_) => StatusCode::BAD_REQUEST,
      Error::Bootstrap(e) => match e {
        BootstrapError::MissingCredential(_) => StatusCode::NOT_FOUND,
        BootstrapError::InvalidCredential(_) => StatusCode::UNPROCESSABLE_ENTITY,
        BootstrapError::CredentialStore(_) | BootstrapError::Url(_) => {
          StatusCode::INTERNAL_SERVER_ERROR
        }
        BootstrapError::Contact(_)
        | BootstrapError::Subscription(_)
        | BootstrapError::Location(_)
        | BootstrapError::WelcomeCard(_) => StatusCode::BAD_GATEWAY,
      },
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    if status.is_server_error() {
      tracing::error!(error = %self, "request failed");
    }

    let mut res = (status, Json(json!({ "error": self.to_string() }))).into_response();
    if matches!(self, Error::Unauthorized) {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"glint\""),
      );
    }
    res
  }
}
