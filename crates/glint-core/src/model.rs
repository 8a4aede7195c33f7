//! Mirror service payloads.
//!
//! Field names follow the service's camelCase JSON. Every type is a transient
//! request/response body: nothing here is persisted locally.

use serde::{Deserialize, Serialize};

// ─── Contacts ────────────────────────────────────────────────────────────────

/// A command a contact can receive from the user's voice menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CommandType {
  #[serde(rename = "TAKE_A_NOTE")]
  TakeANote,
  #[serde(rename = "POST_AN_UPDATE")]
  PostAnUpdate,
  #[serde(other)]
  Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Command {
  #[serde(rename = "type")]
  pub kind: CommandType,
}

impl Command {
  pub fn new(kind: CommandType) -> Self { Self { kind } }
}

/// A contact shown in the share and voice-command menus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
  pub id:              String,
  pub display_name:    String,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub image_urls:      Vec<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub accept_commands: Vec<Command>,
}

// ─── Subscriptions ───────────────────────────────────────────────────────────

/// A request for the service to push collection updates to `callback_url`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
  /// Assigned by the service on insert.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:           Option<String>,
  pub callback_url: String,
  pub collection:   String,
  /// Echoed back in every notification; we use the user id.
  pub user_token:   String,
}

// ─── Locations ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:           Option<String>,
  pub latitude:     f64,
  pub longitude:    f64,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub accuracy:     Option<f64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub display_name: Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub address:      Option<String>,
}

impl Location {
  pub fn at(latitude: f64, longitude: f64) -> Self {
    Self {
      id: None,
      latitude,
      longitude,
      accuracy: None,
      timestamp: None,
      display_name: None,
      address: None,
    }
  }
}

// ─── Timeline ────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NotificationLevel {
  #[serde(rename = "DEFAULT")]
  Default,
  #[serde(other)]
  Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationConfig {
  pub level: NotificationLevel,
}

/// Built-in menu actions understood by the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MenuAction {
  Reply,
  Delete,
  Share,
  ReadAloud,
  Navigate,
  TogglePinned,
  OpenUri,
  Custom,
  #[serde(other)]
  Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
  pub action: MenuAction,
}

impl MenuItem {
  pub fn new(action: MenuAction) -> Self { Self { action } }
}

/// A card on the user's timeline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineItem {
  /// Assigned by the service on insert.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:           Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub html:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text:         Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub notification: Option<NotificationConfig>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub location:     Option<Location>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub menu_items:   Vec<MenuItem>,
}

// ─── Notifications ───────────────────────────────────────────────────────────

/// An action the user took on a card, as reported in a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserAction {
  #[serde(rename = "type")]
  pub kind:    String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub payload: Option<String>,
}

/// Body the service posts to a subscription's callback URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
  pub collection:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub item_id:      Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub operation:    Option<String>,
  /// The `user_token` given when subscribing.
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_token:   Option<String>,
  #[serde(default, skip_serializing_if = "Vec::is_empty")]
  pub user_actions: Vec<UserAction>,
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn contact_serialises_camel_case_with_command_type() {
    let contact = Contact {
      id:              "starter".into(),
      display_name:    "Starter".into(),
      image_urls:      vec!["http://localhost/a.jpg".into()],
      accept_commands: vec![Command::new(CommandType::TakeANote)],
    };
    assert_eq!(
      serde_json::to_value(&contact).unwrap(),
      json!({
        "id": "starter",
        "displayName": "Starter",
        "imageUrls": ["http://localhost/a.jpg"],
        "acceptCommands": [{ "type": "TAKE_A_NOTE" }],
      })
    );
  }

  #[test]
  fn timeline_item_omits_unset_fields() {
    let item = TimelineItem {
      html: Some("<p>hi</p>".into()),
      notification: Some(NotificationConfig { level: NotificationLevel::Default }),
      menu_items: vec![MenuItem::new(MenuAction::Navigate), MenuItem::new(MenuAction::Delete)],
      ..TimelineItem::default()
    };
    assert_eq!(
      serde_json::to_value(&item).unwrap(),
      json!({
        "html": "<p>hi</p>",
        "notification": { "level": "DEFAULT" },
        "menuItems": [{ "action": "NAVIGATE" }, { "action": "DELETE" }],
      })
    );
  }

  #[test]
  fn location_tolerates_extra_service_fields() {
    let loc: Location = serde_json::from_value(json!({
      "kind": "mirror#location",
      "id": "latest",
      "latitude": 37.0,
      "longitude": -122.0,
      "accuracy": 5.0,
    }))
    .unwrap();
    assert_eq!(loc.id.as_deref(), Some("latest"));
    assert_eq!((loc.latitude, loc.longitude), (37.0, -122.0));
  }

  #[test]
  fn notification_decodes_user_actions() {
    let n: Notification = serde_json::from_value(json!({
      "collection": "timeline",
      "itemId": "card-1",
      "operation": "UPDATE",
      "userToken": "u1",
      "userActions": [{ "type": "SHARE" }],
    }))
    .unwrap();
    assert_eq!(n.user_token.as_deref(), Some("u1"));
    assert_eq!(n.user_actions, vec![UserAction { kind: "SHARE".into(), payload: None }]);
  }

  #[test]
  fn unknown_menu_action_does_not_fail_decoding() {
    let item: MenuItem = serde_json::from_value(json!({ "action": "VOICE_CALL" })).unwrap();
    assert_eq!(item.action, MenuAction::Unknown);
  }
}
