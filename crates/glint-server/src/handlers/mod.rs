//! HTTP route handlers.

pub mod bootstrap;
pub mod notify;
