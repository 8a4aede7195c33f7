//! Error type for `glint-bootstrap`.
//!
//! Each variant names the step that aborted the run. A rejected subscription
//! never shows up here; it is reported through
//! [`SubscriptionOutcome::Rejected`](crate::SubscriptionOutcome::Rejected).

use glint_core::mirror::ServiceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("no credential stored for user {0:?}")]
  MissingCredential(String),

  #[error("unusable credential: {0}")]
  InvalidCredential(#[source] glint_core::Error),

  #[error("credential store error: {0}")]
  CredentialStore(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("cannot build url: {0}")]
  Url(#[source] glint_core::Error),

  #[error("inserting starter contact failed: {0}")]
  Contact(#[source] ServiceError),

  #[error("inserting timeline subscription failed: {0}")]
  Subscription(#[source] ServiceError),

  #[error("fetching location failed: {0}")]
  Location(#[source] ServiceError),

  #[error("inserting welcome card failed: {0}")]
  WelcomeCard(#[source] ServiceError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
