//! Payload builders for the starter contact and the welcome card.

use glint_core::{
  model::{
    Command, CommandType, Contact, Location, MenuAction, MenuItem, NotificationConfig,
    NotificationLevel, TimelineItem,
  },
  request::RequestContext,
};

use crate::BootstrapConfig;

/// Render a coordinate the way the device's map URL expects it: shortest
/// round-tripping form, always with a fractional part (`37.0`, `-122.0`).
pub fn format_coordinate(value: f64) -> String { format!("{value:?}") }

/// Marker parameter of the static map: `0;{lat},{lon}`.
pub fn map_marker(location: &Location) -> String {
  format!(
    "0;{},{}",
    format_coordinate(location.latitude),
    format_coordinate(location.longitude)
  )
}

/// Full-bleed static map image centred on `location`.
pub fn map_image(location: &Location) -> String {
  format!(
    "<img src='glass://map?w=640&h=360&marker={}' height='100%' width='100%'/>",
    map_marker(location)
  )
}

/// Wrap `content` in the photo card layout with a caption overlay.
///
/// The caption is inserted verbatim; it comes from configuration, not users.
pub fn photo_card_html(content: &str, caption: &str) -> String {
  format!(
    "<article class='photo'>{content}<div class='photo-overlay'/><section><div \
     class='text-auto-size'><p class='yellow'>{caption}</p></div></section></article>"
  )
}

/// The welcome card: a map of `location`, default notification, and
/// navigate/delete actions.
pub fn welcome_card(location: Location, caption: &str) -> TimelineItem {
  TimelineItem {
    html: Some(photo_card_html(&map_image(&location), caption)),
    notification: Some(NotificationConfig { level: NotificationLevel::Default }),
    location: Some(location),
    menu_items: vec![
      MenuItem::new(MenuAction::Navigate),
      MenuItem::new(MenuAction::Delete),
    ],
    ..TimelineItem::default()
  }
}

/// The starter contact, with its image served from this deployment.
pub fn starter_contact(
  config: &BootstrapConfig,
  ctx: &RequestContext,
) -> glint_core::Result<Contact> {
  Ok(Contact {
    id:              config.contact_id.clone(),
    display_name:    config.contact_name.clone(),
    image_urls:      vec![ctx.build_url(&config.contact_image_path)?],
    accept_commands: vec![Command::new(CommandType::TakeANote)],
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn marker_keeps_fractional_zero() {
    let loc = Location::at(37.0, -122.0);
    assert_eq!(map_marker(&loc), "0;37.0,-122.0");
  }

  #[test]
  fn map_image_embeds_coordinates() {
    let img = map_image(&Location::at(10.5, 20.25));
    assert_eq!(
      img,
      "<img src='glass://map?w=640&h=360&marker=0;10.5,20.25' height='100%' width='100%'/>"
    );
  }

  #[test]
  fn welcome_card_has_caption_and_two_actions() {
    let card = welcome_card(Location::at(1.5, 2.5), "Remembered Location");
    let html = card.html.as_deref().unwrap();
    assert!(html.starts_with("<article class='photo'><img "), "{html}");
    assert!(html.contains("<p class='yellow'>Remembered Location</p>"), "{html}");
    assert_eq!(
      card.menu_items,
      vec![MenuItem::new(MenuAction::Navigate), MenuItem::new(MenuAction::Delete)]
    );
    assert_eq!(
      card.notification,
      Some(NotificationConfig { level: NotificationLevel::Default })
    );
    assert_eq!(card.location, Some(Location::at(1.5, 2.5)));
  }

  #[test]
  fn starter_contact_resolves_image_against_origin() {
    let ctx     = RequestContext::new("https", "glint.example").unwrap();
    let contact = starter_contact(&BootstrapConfig::default(), &ctx).unwrap();
    assert_eq!(
      contact.image_urls,
      vec!["https://glint.example/static/images/starter-640x360.jpg".to_string()]
    );
    assert_eq!(contact.accept_commands, vec![Command::new(CommandType::TakeANote)]);
  }
}
