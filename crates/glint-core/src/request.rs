//! The inbound request context and absolute-URL building.
//!
//! The bootstrap workflow hands the mirror service URLs that point back at
//! this deployment (contact image, subscription callback). They are built from
//! the origin of the request that triggered the workflow, so the same binary
//! works behind any host name.

use std::fmt;

use crate::{Error, Result};

/// Scheme and authority (`host[:port]`) of the request being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
  scheme:    String,
  authority: String,
}

impl RequestContext {
  /// Build a context from a scheme (`http` / `https`) and an authority.
  pub fn new(scheme: &str, authority: &str) -> Result<Self> {
    let scheme = scheme.to_ascii_lowercase();
    if scheme != "http" && scheme != "https" {
      return Err(Error::InvalidScheme(scheme));
    }

    let authority = authority.trim();
    if authority.is_empty()
      || authority
        .chars()
        .any(|c| c.is_whitespace() || matches!(c, '/' | '?' | '#' | '@'))
    {
      return Err(Error::InvalidAuthority(authority.to_owned()));
    }

    Ok(Self {
      scheme,
      authority: authority.to_owned(),
    })
  }

  /// Parse an origin such as `https://example.com:8443`.
  ///
  /// A trailing `/` is accepted; any other path component is rejected.
  pub fn from_origin(origin: &str) -> Result<Self> {
    let (scheme, rest) = origin
      .split_once("://")
      .ok_or_else(|| Error::InvalidScheme(origin.to_owned()))?;
    Self::new(scheme, rest.strip_suffix('/').unwrap_or(rest))
  }

  pub fn scheme(&self) -> &str { &self.scheme }

  pub fn authority(&self) -> &str { &self.authority }

  /// `scheme://authority`, without a trailing slash.
  pub fn origin(&self) -> String { format!("{}://{}", self.scheme, self.authority) }

  /// Resolve an absolute `path` against this request's origin.
  ///
  /// The path replaces whatever path the inbound request had; query and
  /// fragment are not carried over.
  pub fn build_url(&self, path: &str) -> Result<String> {
    if !path.starts_with('/') {
      return Err(Error::RelativePath(path.to_owned()));
    }
    Ok(format!("{}{}", self.origin(), path))
  }
}

impl fmt::Display for RequestContext {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}://{}", self.scheme, self.authority)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn build_url_keeps_port() {
    let ctx = RequestContext::new("http", "localhost:8080").unwrap();
    assert_eq!(
      ctx.build_url("/notify").unwrap(),
      "http://localhost:8080/notify"
    );
  }

  #[test]
  fn scheme_is_normalised() {
    let ctx = RequestContext::new("HTTPS", "example.com").unwrap();
    assert_eq!(ctx.origin(), "https://example.com");
  }

  #[test]
  fn from_origin_accepts_trailing_slash() {
    let ctx = RequestContext::from_origin("https://example.com/").unwrap();
    assert_eq!(ctx.authority(), "example.com");
  }

  #[test]
  fn from_origin_rejects_paths_and_bad_schemes() {
    assert!(matches!(
      RequestContext::from_origin("https://example.com/app"),
      Err(Error::InvalidAuthority(_))
    ));
    assert!(matches!(
      RequestContext::from_origin("ftp://example.com"),
      Err(Error::InvalidScheme(_))
    ));
    assert!(matches!(
      RequestContext::from_origin("example.com"),
      Err(Error::InvalidScheme(_))
    ));
  }

  #[test]
  fn relative_paths_are_rejected() {
    let ctx = RequestContext::new("http", "localhost").unwrap();
    assert!(matches!(ctx.build_url("notify"), Err(Error::RelativePath(_))));
  }
}
