//! [`SqliteCredentialStore`]: the SQLite implementation of [`CredentialStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use glint_core::credential::{Credential, CredentialStore};
use rusqlite::OptionalExtension as _;

use crate::{Error, Result, schema::SCHEMA};

// ─── Encoding ────────────────────────────────────────────────────────────────

fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

/// A row as read from the `credentials` table, before date decoding.
struct RawCredential {
  access_token:  String,
  refresh_token: Option<String>,
  expires_at:    Option<String>,
}

impl RawCredential {
  fn decode(self) -> Result<Credential> {
    Ok(Credential {
      access_token:  self.access_token,
      refresh_token: self.refresh_token,
      expires_at:    self.expires_at.as_deref().map(decode_dt).transpose()?,
    })
  }
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A credential store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteCredentialStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteCredentialStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── CredentialStore impl ────────────────────────────────────────────────────

impl CredentialStore for SqliteCredentialStore {
  type Error = Error;

  async fn load(&self, user_id: &str) -> Result<Option<Credential>> {
    let user_id = user_id.to_owned();

    let raw: Option<RawCredential> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT access_token, refresh_token, expires_at
                 FROM credentials WHERE user_id = ?1",
              rusqlite::params![user_id],
              |row| {
                Ok(RawCredential {
                  access_token:  row.get(0)?,
                  refresh_token: row.get(1)?,
                  expires_at:    row.get(2)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawCredential::decode).transpose()
  }

  async fn save(&self, user_id: &str, credential: &Credential) -> Result<()> {
    let user_id_str    = user_id.to_owned();
    let access_token   = credential.access_token.clone();
    let refresh_token  = credential.refresh_token.clone();
    let expires_at_str = credential.expires_at.map(encode_dt);
    let updated_at_str = encode_dt(Utc::now());

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO credentials (user_id, access_token, refresh_token, expires_at, updated_at)
           VALUES (?1, ?2, ?3, ?4, ?5)
           ON CONFLICT (user_id) DO UPDATE SET
             access_token  = excluded.access_token,
             refresh_token = excluded.refresh_token,
             expires_at    = excluded.expires_at,
             updated_at    = excluded.updated_at",
          rusqlite::params![user_id_str, access_token, refresh_token, expires_at_str, updated_at_str],
        )?;
        Ok(())
      })
      .await?;

    tracing::debug!(user_id, "stored credential");
    Ok(())
  }

  async fn delete(&self, user_id: &str) -> Result<bool> {
    let user_id = user_id.to_owned();

    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "DELETE FROM credentials WHERE user_id = ?1",
          rusqlite::params![user_id],
        )?)
      })
      .await?;

    Ok(removed > 0)
  }
}
