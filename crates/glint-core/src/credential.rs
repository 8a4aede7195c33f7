//! Credentials and the `CredentialStore` trait.
//!
//! Token acquisition (the OAuth flow) happens elsewhere; the bootstrap
//! workflow only borrows whatever the store holds for a user.

use std::{fmt, future::Future};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Token material for one user.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
  pub access_token:  String,
  pub refresh_token: Option<String>,
  pub expires_at:    Option<DateTime<Utc>>,
}

impl Credential {
  /// A bearer token with no refresh token and no known expiry.
  pub fn bearer(access_token: impl Into<String>) -> Self {
    Self {
      access_token:  access_token.into(),
      refresh_token: None,
      expires_at:    None,
    }
  }

  /// Check the credential is usable for `user_id` at `now`.
  ///
  /// There is no refresh flow, so an expired token is as unusable as an empty
  /// one.
  pub fn validate(&self, user_id: &str, now: DateTime<Utc>) -> Result<()> {
    if self.access_token.trim().is_empty() {
      return Err(Error::EmptyAccessToken(user_id.to_owned()));
    }
    if let Some(expired_at) = self.expires_at
      && expired_at <= now
    {
      return Err(Error::CredentialExpired {
        user_id: user_id.to_owned(),
        expired_at,
      });
    }
    Ok(())
  }
}

// Token material never reaches the logs.
impl fmt::Debug for Credential {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Credential")
      .field("access_token", &"<redacted>")
      .field("refresh_token", &self.refresh_token.as_ref().map(|_| "<redacted>"))
      .field("expires_at", &self.expires_at)
      .finish()
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over wherever user credentials are kept.
///
/// All methods return `Send` futures so the trait can be used from axum
/// handlers on a multi-threaded runtime.
pub trait CredentialStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Load the credential for `user_id`. Returns `None` if none is stored.
  fn load<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<Option<Credential>, Self::Error>> + Send + 'a;

  /// Store `credential` for `user_id`, replacing any existing one.
  fn save<'a>(
    &'a self,
    user_id: &'a str,
    credential: &'a Credential,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Remove the credential for `user_id`. Returns `false` if there was none.
  fn delete<'a>(
    &'a self,
    user_id: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use chrono::{Duration, TimeZone};

  use super::*;

  fn now() -> DateTime<Utc> { Utc.timestamp_opt(1_700_000_000, 0).unwrap() }

  #[test]
  fn bearer_without_expiry_is_valid() {
    assert!(Credential::bearer("tok").validate("u1", now()).is_ok());
  }

  #[test]
  fn blank_token_is_rejected() {
    let err = Credential::bearer("  ").validate("u1", now()).unwrap_err();
    assert!(matches!(err, Error::EmptyAccessToken(u) if u == "u1"));
  }

  #[test]
  fn expired_token_is_rejected() {
    let cred = Credential {
      expires_at: Some(now() - Duration::seconds(1)),
      ..Credential::bearer("tok")
    };
    assert!(matches!(
      cred.validate("u1", now()),
      Err(Error::CredentialExpired { .. })
    ));
  }

  #[test]
  fn debug_output_redacts_tokens() {
    let cred = Credential {
      refresh_token: Some("refresh-secret".into()),
      ..Credential::bearer("access-secret")
    };
    let rendered = format!("{cred:?}");
    assert!(!rendered.contains("secret"), "{rendered}");
  }
}
