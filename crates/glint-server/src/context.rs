//! Derive the [`RequestContext`] of an inbound request.
//!
//! A configured `public_origin` wins. Otherwise the origin comes from the
//! `X-Forwarded-Proto` and `Host` headers (or the request URI's authority), so
//! URLs handed to the mirror service point back at whatever name the caller
//! used to reach us.

use axum::{
  extract::{FromRef, FromRequestParts},
  http::{HeaderMap, Uri, header, request::Parts},
};
use glint_core::request::RequestContext;

use crate::error::Error;

/// Origin override from configuration, if any.
#[derive(Clone, Debug, Default)]
pub struct PublicOrigin(pub Option<RequestContext>);

/// Extractor yielding the request's [`RequestContext`].
pub struct Origin(pub RequestContext);

pub fn request_context(headers: &HeaderMap, uri: &Uri) -> Result<RequestContext, Error> {
  let scheme = headers
    .get("x-forwarded-proto")
    .and_then(|v| v.to_str().ok())
    .and_then(|v| v.split(',').next())
    .map(str::trim)
    .filter(|v| !v.is_empty())
    .or_else(|| uri.scheme_str())
    .unwrap_or("http");

  let authority = headers
    .get(header::HOST)
    .and_then(|v| v.to_str().ok())
    .map(str::to_owned)
    .or_else(|| uri.authority().map(|a| a.to_string()))
    .ok_or_else(|| Error::BadRequest("missing Host header".to_string()))?;

  RequestContext::new(scheme, &authority).map_err(|e| Error::BadRequest(e.to_string()))
}

impl<S> FromRequestParts<S> for Origin
where
  PublicOrigin: FromRef<S>,
  S: Send + Sync,
{
  type Rejection = Error;

  async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
    if let PublicOrigin(Some(ctx)) = PublicOrigin::from_ref(state) {
      return Ok(Origin(ctx));
    }
    request_context(&parts.headers, &parts.uri).map(Origin)
  }
}

#[cfg(test)]
mod tests {
  use axum::http::HeaderValue;

  use super::*;

  fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (k, v) in pairs {
      map.insert(*k, HeaderValue::from_static(*v));
    }
    map
  }

  #[test]
  fn host_header_defaults_to_http() {
    let ctx = request_context(&headers(&[("host", "localhost:8080")]), &Uri::from_static("/x")).unwrap();
    assert_eq!(ctx.origin(), "http://localhost:8080");
  }

  #[test]
  fn forwarded_proto_takes_first_hop() {
    let ctx = request_context(
      &headers(&[("host", "glint.example"), ("x-forwarded-proto", "https, http")]),
      &Uri::from_static("/x"),
    )
    .unwrap();
    assert_eq!(ctx.origin(), "https://glint.example");
  }

  #[test]
  fn blank_forwarded_proto_falls_back_to_http() {
    for proto in ["", " ", " , https"] {
      let ctx = request_context(
        &headers(&[("host", "glint.example"), ("x-forwarded-proto", proto)]),
        &Uri::from_static("/x"),
      )
      .unwrap();
      assert_eq!(ctx.origin(), "http://glint.example", "{proto:?}");
    }
  }

  #[test]
  fn absolute_uri_is_used_without_host() {
    let ctx = request_context(&HeaderMap::new(), &Uri::from_static("https://glint.example:8443/x")).unwrap();
    assert_eq!(ctx.origin(), "https://glint.example:8443");
  }

  #[test]
  fn missing_host_is_bad_request() {
    let err = request_context(&HeaderMap::new(), &Uri::from_static("/x")).unwrap_err();
    assert!(matches!(err, Error::BadRequest(_)));
  }
}
