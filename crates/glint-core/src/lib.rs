//! Core types and trait definitions for Glint.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! describes the mirror service payloads, the two collaborator traits the
//! bootstrap workflow consumes ([`MirrorService`](mirror::MirrorService) and
//! [`CredentialStore`](credential::CredentialStore)), and the request context
//! used to build absolute URLs.

pub mod credential;
pub mod error;
pub mod mirror;
pub mod model;
pub mod request;

pub use error::{Error, Result};
