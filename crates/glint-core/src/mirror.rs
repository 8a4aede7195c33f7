//! The `MirrorService` trait and its error type.
//!
//! Implemented by `glint-mirror-http` against the real REST API and by
//! in-process fakes in tests. The bootstrap workflow depends only on this
//! abstraction.

use std::future::Future;

use thiserror::Error;

use crate::{
  credential::Credential,
  model::{Contact, Location, Subscription, TimelineItem},
};

// ─── Errors ──────────────────────────────────────────────────────────────────

/// Failure of a single remote call.
///
/// Callers that tolerate some failures match on [`ServiceError::Rejected`];
/// every other variant means the call did not complete.
#[derive(Debug, Error)]
pub enum ServiceError {
  /// The service answered with a structured JSON error body.
  #[error("mirror service rejected the request ({status}): {details}")]
  Rejected {
    status:  u16,
    /// The `error` object of the response body.
    details: serde_json::Value,
  },

  /// A non-success status whose body was not a structured error.
  #[error("mirror service returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("mirror service transport error: {0}")]
  Transport(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("could not decode mirror service response: {0}")]
  Decode(String),
}

impl ServiceError {
  /// Whether this is a structured rejection rather than a broken exchange.
  pub fn is_rejection(&self) -> bool { matches!(self, ServiceError::Rejected { .. }) }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// The subset of the mirror API the bootstrap workflow consumes.
///
/// Every call is authorised by the caller's [`Credential`]. Inserts return the
/// stored payload, including any server-assigned id.
pub trait MirrorService: Send + Sync {
  /// Insert (or overwrite) a contact.
  fn insert_contact<'a>(
    &'a self,
    credential: &'a Credential,
    contact: &'a Contact,
  ) -> impl Future<Output = Result<Contact, ServiceError>> + Send + 'a;

  /// Subscribe `callback_url` to updates of `collection` for `user_id`.
  fn insert_subscription<'a>(
    &'a self,
    credential: &'a Credential,
    callback_url: &'a str,
    user_id: &'a str,
    collection: &'a str,
  ) -> impl Future<Output = Result<Subscription, ServiceError>> + Send + 'a;

  /// Fetch a location by id; `"latest"` is the most recent known position.
  fn get_location<'a>(
    &'a self,
    credential: &'a Credential,
    id: &'a str,
  ) -> impl Future<Output = Result<Location, ServiceError>> + Send + 'a;

  /// Insert a card into the user's timeline.
  fn insert_timeline_item<'a>(
    &'a self,
    credential: &'a Credential,
    item: &'a TimelineItem,
  ) -> impl Future<Output = Result<TimelineItem, ServiceError>> + Send + 'a;
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn only_rejections_are_rejections() {
    let rejected = ServiceError::Rejected {
      status:  400,
      details: json!({ "code": 400, "message": "callback unreachable" }),
    };
    assert!(rejected.is_rejection());
    assert!(rejected.to_string().contains("callback unreachable"));

    let status = ServiceError::Status { status: 502, body: "bad gateway".into() };
    assert!(!status.is_rejection());
  }
}
