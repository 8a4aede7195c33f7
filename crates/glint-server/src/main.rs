//! glint-server binary.
//!
//! Reads `config.toml` (or the path specified with `--config`), opens the
//! SQLite credential store, and serves the bootstrap and notify endpoints.
//!
//! # Helpers
//!
//! Generate the argon2 PHC string for `auth_password_hash`:
//!
//! ```
//! cargo run -p glint-server -- --hash-password
//! ```
//!
//! Store an access token for a user (read from stdin):
//!
//! ```
//! cargo run -p glint-server -- --save-credential <USER_ID>
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
  time::Duration,
};

use anyhow::Context as _;
use argon2::{Argon2, PasswordHasher, password_hash::SaltString};
use clap::Parser;
use glint_bootstrap::Bootstrapper;
use glint_core::{
  credential::{Credential, CredentialStore},
  request::RequestContext,
};
use glint_mirror_http::{MirrorClient, MirrorConfig};
use glint_server::{AppState, ServerConfig, auth::AuthConfig, context::PublicOrigin};
use glint_store_sqlite::SqliteCredentialStore;
use rand_core::OsRng;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Glint new-user bootstrap server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,

  /// Store an access token (read from stdin) for USER_ID and exit.
  #[arg(long, value_name = "USER_ID")]
  save_credential: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Helper mode: hash a password and exit.
  if cli.hash_password {
    let password = read_stdin_line("Password: ")?;
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
      .hash_password(password.as_bytes(), &salt)
      .map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?
      .to_string();
    println!("{hash}");
    return Ok(());
  }

  // Load configuration.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("GLINT")
        .prefix_separator("_")
        .separator("__"),
    )
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  // Expand `~` in store path.
  let store_path = expand_tilde(&server_cfg.store_path);

  // Open SQLite store.
  let store = SqliteCredentialStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Helper mode: store a credential and exit.
  if let Some(user_id) = cli.save_credential {
    let token = read_stdin_line("Access token: ")?;
    anyhow::ensure!(!token.trim().is_empty(), "access token must not be empty");
    store
      .save(&user_id, &Credential::bearer(token.trim()))
      .await
      .with_context(|| format!("failed to store credential for {user_id}"))?;
    println!("stored credential for {user_id}");
    return Ok(());
  }

  let mirror = MirrorClient::new(MirrorConfig {
    base_url: server_cfg.mirror_base_url.clone(),
    timeout:  Duration::from_secs(server_cfg.mirror_timeout_secs),
  })
  .context("failed to build mirror client")?;

  let public_origin = server_cfg
    .public_origin
    .as_deref()
    .map(RequestContext::from_origin)
    .transpose()
    .context("invalid public_origin")?;

  // Build application state.
  let state = AppState {
    bootstrapper:  Bootstrapper::new(
      Arc::new(store),
      Arc::new(mirror),
      Arc::new(server_cfg.bootstrap.clone()),
    ),
    auth:          Arc::new(AuthConfig {
      username:      server_cfg.auth_username.clone(),
      password_hash: server_cfg.auth_password_hash.clone(),
    }),
    public_origin: PublicOrigin(public_origin),
  };

  let app = glint_server::router(state);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(mirror = %server_cfg.mirror_base_url, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Prompt on stdout and read one line from stdin.
fn read_stdin_line(prompt: &str) -> anyhow::Result<String> {
  use std::io::{self, BufRead, Write};
  let stdin = io::stdin();
  print!("{prompt}");
  io::stdout().flush().ok();
  let mut line = String::new();
  stdin.lock().read_line(&mut line)?;
  Ok(
    line
      .trim_end_matches('\n')
      .trim_end_matches('\r')
      .to_string(),
  )
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
