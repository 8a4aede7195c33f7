//! Fixed identifiers and paths used by the workflow.
//!
//! Loaded once at startup (usually as the `[bootstrap]` table of the server
//! config) and shared read-only afterwards.

use serde::Deserialize;

/// Values every bootstrap run uses regardless of user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct BootstrapConfig {
  /// Well-known id of the starter contact; re-inserting overwrites it.
  pub contact_id:         String,
  pub contact_name:       String,
  /// Absolute path of the contact image on this deployment.
  pub contact_image_path: String,
  /// Absolute path the mirror service posts notifications to.
  pub callback_path:      String,
  pub collection:         String,
  /// Location id asked for when building the welcome card.
  pub location_id:        String,
  pub card_caption:       String,
}

impl Default for BootstrapConfig {
  fn default() -> Self {
    Self {
      contact_id:         "glint.contact.starter".to_string(),
      contact_name:       "Glint Starter".to_string(),
      contact_image_path: "/static/images/starter-640x360.jpg".to_string(),
      callback_path:      "/notify".to_string(),
      collection:         "timeline".to_string(),
      location_id:        "latest".to_string(),
      card_caption:       "Remembered Location".to_string(),
    }
  }
}
