//! HTTP client for the mirror REST API.
//!
//! [`MirrorClient`] implements [`glint_core::mirror::MirrorService`] with
//! `reqwest`, authenticating every request with the user's bearer token.

mod client;

pub use client::{DEFAULT_BASE_URL, MirrorClient, MirrorConfig};
