//! Error types for `glint-core`.

use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid request scheme: {0:?}")]
  InvalidScheme(String),

  #[error("invalid request authority: {0:?}")]
  InvalidAuthority(String),

  #[error("path must be absolute (start with '/'): {0:?}")]
  RelativePath(String),

  #[error("credential for {0:?} has an empty access token")]
  EmptyAccessToken(String),

  #[error("credential for {user_id:?} expired at {expired_at}")]
  CredentialExpired {
    user_id:    String,
    expired_at: DateTime<Utc>,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
