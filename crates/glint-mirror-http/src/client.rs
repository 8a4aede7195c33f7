//! Async HTTP client wrapping the mirror JSON API.

use std::time::Duration;

use glint_core::{
  credential::Credential,
  mirror::{MirrorService, ServiceError},
  model::{Contact, Location, Subscription, TimelineItem},
};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::{Deserialize, de::DeserializeOwned};

pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/mirror/v1";

/// Connection settings for the mirror API.
#[derive(Debug, Clone)]
pub struct MirrorConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

impl Default for MirrorConfig {
  fn default() -> Self {
    Self {
      base_url: DEFAULT_BASE_URL.to_string(),
      timeout:  Duration::from_secs(30),
    }
  }
}

/// Async HTTP client for the mirror REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct MirrorClient {
  client: Client,
  config: MirrorConfig,
}

impl MirrorClient {
  pub fn new(config: MirrorConfig) -> reqwest::Result<Self> {
    let client = Client::builder().timeout(config.timeout).build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// `{base}/locations/{id}` with `id` encoded as a single path segment.
  fn location_url(&self, id: &str) -> Result<Url, ServiceError> {
    let mut url = Url::parse(&self.url("/locations")).map_err(|e| ServiceError::Transport(Box::new(e)))?;
    url
      .path_segments_mut()
      .map_err(|()| ServiceError::Transport("mirror base url cannot carry a path".into()))?
      .push(id);
    Ok(url)
  }

  fn auth(&self, req: RequestBuilder, credential: &Credential) -> RequestBuilder {
    req.bearer_auth(&credential.access_token)
  }

  async fn send<T: DeserializeOwned>(&self, what: &str, req: RequestBuilder) -> Result<T, ServiceError> {
    tracing::debug!("mirror request: {what}");
    let resp = req.send().await.map_err(|e| ServiceError::Transport(Box::new(e)))?;
    read_response(resp).await
  }
}

// ─── Response handling ───────────────────────────────────────────────────────

/// Shape of the service's structured error bodies: `{"error": {...}}`.
#[derive(Deserialize)]
struct ErrorEnvelope {
  error: serde_json::Value,
}

async fn read_response<T: DeserializeOwned>(resp: Response) -> Result<T, ServiceError> {
  let status = resp.status();
  let body = resp
    .bytes()
    .await
    .map_err(|e| ServiceError::Transport(Box::new(e)))?;

  if !status.is_success() {
    return Err(classify_failure(status, &body));
  }
  serde_json::from_slice(&body).map_err(|e| ServiceError::Decode(e.to_string()))
}

fn classify_failure(status: StatusCode, body: &[u8]) -> ServiceError {
  match serde_json::from_slice::<ErrorEnvelope>(body) {
    Ok(envelope) if envelope.error.is_object() => ServiceError::Rejected {
      status:  status.as_u16(),
      details: envelope.error,
    },
    _ => ServiceError::Status {
      status: status.as_u16(),
      body:   String::from_utf8_lossy(body).into_owned(),
    },
  }
}

// ─── MirrorService impl ──────────────────────────────────────────────────────

impl MirrorService for MirrorClient {
  /// `POST /contacts`
  async fn insert_contact(
    &self,
    credential: &Credential,
    contact: &Contact,
  ) -> Result<Contact, ServiceError> {
    let req = self.auth(self.client.post(self.url("/contacts")), credential).json(contact);
    self.send("POST /contacts", req).await
  }

  /// `POST /subscriptions`
  async fn insert_subscription(
    &self,
    credential: &Credential,
    callback_url: &str,
    user_id: &str,
    collection: &str,
  ) -> Result<Subscription, ServiceError> {
    let subscription = Subscription {
      id:           None,
      callback_url: callback_url.to_owned(),
      collection:   collection.to_owned(),
      user_token:   user_id.to_owned(),
    };
    let req = self
      .auth(self.client.post(self.url("/subscriptions")), credential)
      .json(&subscription);
    self.send("POST /subscriptions", req).await
  }

  /// `GET /locations/<id>`
  async fn get_location(&self, credential: &Credential, id: &str) -> Result<Location, ServiceError> {
    let url  = self.location_url(id)?;
    let what = format!("GET {}", url.path());
    let req  = self.auth(self.client.get(url), credential);
    self.send(&what, req).await
  }

  /// `POST /timeline`
  async fn insert_timeline_item(
    &self,
    credential: &Credential,
    item: &TimelineItem,
  ) -> Result<TimelineItem, ServiceError> {
    let req = self.auth(self.client.post(self.url("/timeline")), credential).json(item);
    self.send("POST /timeline", req).await
  }
}

#[cfg(test)]
mod unit {
  use super::*;

  #[test]
  fn structured_error_body_is_a_rejection() {
    let body = br#"{"error":{"code":400,"message":"bad callback","errors":[]}}"#;
    match classify_failure(StatusCode::BAD_REQUEST, body) {
      ServiceError::Rejected { status, details } => {
        assert_eq!(status, 400);
        assert_eq!(details["message"], "bad callback");
      }
      other => panic!("expected rejection, got {other:?}"),
    }
  }

  #[test]
  fn plain_error_body_is_a_status_error() {
    let err = classify_failure(StatusCode::BAD_GATEWAY, b"upstream down");
    assert!(matches!(err, ServiceError::Status { status: 502, ref body } if body == "upstream down"));
  }

  #[test]
  fn string_error_field_is_not_structured() {
    let err = classify_failure(StatusCode::UNAUTHORIZED, br#"{"error":"invalid_token"}"#);
    assert!(matches!(err, ServiceError::Status { status: 401, .. }));
  }

  #[test]
  fn url_joins_without_double_slash() {
    let client = MirrorClient::new(MirrorConfig {
      base_url: "http://mirror.test/v1/".into(),
      ..MirrorConfig::default()
    })
    .unwrap();
    assert_eq!(client.url("/timeline"), "http://mirror.test/v1/timeline");
  }

  #[test]
  fn location_id_stays_one_path_segment() {
    let client = MirrorClient::new(MirrorConfig {
      base_url: "http://mirror.test/v1/".into(),
      ..MirrorConfig::default()
    })
    .unwrap();
    assert_eq!(
      client.location_url("latest").unwrap().as_str(),
      "http://mirror.test/v1/locations/latest"
    );
    assert_eq!(
      client.location_url("a/b?c").unwrap().as_str(),
      "http://mirror.test/v1/locations/a%2Fb%3Fc"
    );
  }
}
