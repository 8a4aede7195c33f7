//! SQL schema for the Glint SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS credentials (
    user_id       TEXT PRIMARY KEY,
    access_token  TEXT NOT NULL,
    refresh_token TEXT,
    expires_at    TEXT,            -- RFC 3339 UTC or NULL
    updated_at    TEXT NOT NULL    -- RFC 3339 UTC; store-assigned
);

PRAGMA user_version = 1;
";
