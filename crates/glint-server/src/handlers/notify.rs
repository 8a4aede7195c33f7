//! `POST /notify`: subscription callback target.
//!
//! The mirror service posts here whenever a subscribed collection changes.
//! Notifications are acknowledged and logged; acting on them is left to
//! future handlers.

use axum::{Json, http::StatusCode};
use glint_core::model::Notification;

pub async fn handler(Json(notification): Json<Notification>) -> StatusCode {
  let actions: Vec<&str> = notification
    .user_actions
    .iter()
    .map(|a| a.kind.as_str())
    .collect();

  tracing::info!(
    collection = %notification.collection,
    operation = notification.operation.as_deref().unwrap_or("-"),
    item_id = notification.item_id.as_deref().unwrap_or("-"),
    user = notification.user_token.as_deref().unwrap_or("-"),
    ?actions,
    "received notification"
  );
  StatusCode::OK
}
