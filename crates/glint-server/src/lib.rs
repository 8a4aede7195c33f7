//! HTTP surface for Glint.
//!
//! Exposes an axum [`Router`] that runs the new-user bootstrap workflow on
//! operator request and receives the mirror service's subscription callbacks.

pub mod auth;
pub mod context;
pub mod error;
pub mod handlers;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  extract::FromRef,
  routing::post,
};
use glint_bootstrap::{BootstrapConfig, Bootstrapper};
use glint_core::{credential::CredentialStore, mirror::MirrorService};
use glint_mirror_http::DEFAULT_BASE_URL;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;
use context::PublicOrigin;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml`.
#[derive(Deserialize, Clone, Debug)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                String,
  #[serde(default = "default_port")]
  pub port:                u16,
  /// Origin to build callback and image URLs from, e.g.
  /// `https://glint.example`. Unset means "use the request's Host header".
  #[serde(default)]
  pub public_origin:       Option<String>,
  #[serde(default = "default_mirror_base_url")]
  pub mirror_base_url:     String,
  #[serde(default = "default_mirror_timeout_secs")]
  pub mirror_timeout_secs: u64,
  #[serde(default = "default_store_path")]
  pub store_path:          PathBuf,
  pub auth_username:       String,
  pub auth_password_hash:  String,
  #[serde(default)]
  pub bootstrap:           BootstrapConfig,
}

fn default_host() -> String { "127.0.0.1".to_string() }

fn default_port() -> u16 { 8080 }

fn default_mirror_base_url() -> String { DEFAULT_BASE_URL.to_string() }

fn default_mirror_timeout_secs() -> u64 { 30 }

fn default_store_path() -> PathBuf { PathBuf::from("glint.db") }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, M> {
  pub bootstrapper:  Bootstrapper<S, M>,
  pub auth:          Arc<AuthConfig>,
  pub public_origin: PublicOrigin,
}

impl<S, M> Clone for AppState<S, M> {
  fn clone(&self) -> Self {
    Self {
      bootstrapper:  self.bootstrapper.clone(),
      auth:          Arc::clone(&self.auth),
      public_origin: self.public_origin.clone(),
    }
  }
}

impl<S, M> FromRef<AppState<S, M>> for Arc<AuthConfig> {
  fn from_ref(state: &AppState<S, M>) -> Self { Arc::clone(&state.auth) }
}

impl<S, M> FromRef<AppState<S, M>> for PublicOrigin {
  fn from_ref(state: &AppState<S, M>) -> Self { state.public_origin.clone() }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the server.
pub fn router<S, M>(state: AppState<S, M>) -> Router
where
  S: CredentialStore + 'static,
  M: MirrorService + 'static,
{
  Router::new()
    .route("/users/{user_id}/bootstrap", post(handlers::bootstrap::handler::<S, M>))
    .route("/notify",                    post(handlers::notify::handler))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
