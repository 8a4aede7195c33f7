//! [`Bootstrapper`]: the ordered provisioning sequence.

use std::sync::Arc;

use chrono::Utc;
use glint_core::{
  credential::{Credential, CredentialStore},
  mirror::{MirrorService, ServiceError},
  model::Location,
  request::RequestContext,
};
use serde::Serialize;

use crate::{
  BootstrapConfig,
  card::{starter_contact, welcome_card},
  Error, Result,
};

// ─── Report ──────────────────────────────────────────────────────────────────

/// What happened to the subscription step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubscriptionOutcome {
  Created { id: Option<String> },
  /// The service refused the subscription; the run carried on without it.
  Rejected { details: serde_json::Value },
}

/// Summary of a completed bootstrap run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BootstrapReport {
  pub user_id:          String,
  pub contact_id:       String,
  pub subscription:     SubscriptionOutcome,
  pub location:         Location,
  pub timeline_item_id: Option<String>,
}

// ─── Bootstrapper ────────────────────────────────────────────────────────────

/// Runs the new-user workflow against a credential store and a mirror service.
///
/// Cheap to clone; all collaborators are reference-counted.
pub struct Bootstrapper<C, M> {
  credentials: Arc<C>,
  mirror:      Arc<M>,
  config:      Arc<BootstrapConfig>,
}

impl<C, M> Clone for Bootstrapper<C, M> {
  fn clone(&self) -> Self {
    Self {
      credentials: Arc::clone(&self.credentials),
      mirror:      Arc::clone(&self.mirror),
      config:      Arc::clone(&self.config),
    }
  }
}

impl<C, M> Bootstrapper<C, M>
where
  C: CredentialStore,
  M: MirrorService,
{
  pub fn new(credentials: Arc<C>, mirror: Arc<M>, config: Arc<BootstrapConfig>) -> Self {
    Self { credentials, mirror, config }
  }

  /// Provision `user_id` into the mirror service.
  ///
  /// Steps, each awaited before the next starts:
  ///
  /// 1. load and validate the user's credential;
  /// 2. insert the starter contact;
  /// 3. subscribe the `/notify` callback to the timeline (a structured
  ///    rejection is logged and tolerated);
  /// 4. fetch the latest location and insert the welcome card.
  ///
  /// Any other failure aborts the run and is returned unchanged inside the
  /// [`Error`] variant naming the step.
  pub async fn bootstrap_new_user(
    &self,
    ctx: &RequestContext,
    user_id: &str,
  ) -> Result<BootstrapReport> {
    let credential = self.load_credential(user_id).await?;

    // Both URLs are resolved before anything is sent to the service.
    let contact      = starter_contact(&self.config, ctx).map_err(Error::Url)?;
    let callback_url = ctx.build_url(&self.config.callback_path).map_err(Error::Url)?;

    let inserted = self
      .mirror
      .insert_contact(&credential, &contact)
      .await
      .map_err(Error::Contact)?;
    tracing::info!(user_id, contact_id = %inserted.id, "bootstrapper inserted contact");

    let subscription = self
      .subscribe(&credential, &callback_url, user_id)
      .await?;

    let location = self
      .mirror
      .get_location(&credential, &self.config.location_id)
      .await
      .map_err(Error::Location)?;
    tracing::info!(
      user_id,
      latitude = location.latitude,
      longitude = location.longitude,
      "fetched latest location"
    );

    let card = welcome_card(location.clone(), &self.config.card_caption);
    let inserted_card = self
      .mirror
      .insert_timeline_item(&credential, &card)
      .await
      .map_err(Error::WelcomeCard)?;
    tracing::info!(
      user_id,
      item_id = inserted_card.id.as_deref().unwrap_or("-"),
      "bootstrapper inserted welcome card"
    );

    Ok(BootstrapReport {
      user_id: user_id.to_owned(),
      contact_id: inserted.id,
      subscription,
      location,
      timeline_item_id: inserted_card.id,
    })
  }

  async fn load_credential(&self, user_id: &str) -> Result<Credential> {
    let credential = self
      .credentials
      .load(user_id)
      .await
      .map_err(|e| Error::CredentialStore(Box::new(e)))?
      .ok_or_else(|| Error::MissingCredential(user_id.to_owned()))?;
    credential
      .validate(user_id, Utc::now())
      .map_err(Error::InvalidCredential)?;
    Ok(credential)
  }

  /// Insert the timeline subscription, downgrading a rejection to a warning.
  ///
  /// Rejections are expected when the callback URL is unreachable from the
  /// service, e.g. when running on localhost.
  async fn subscribe(
    &self,
    credential: &Credential,
    callback_url: &str,
    user_id: &str,
  ) -> Result<SubscriptionOutcome> {
    let result = self
      .mirror
      .insert_subscription(credential, callback_url, user_id, &self.config.collection)
      .await;

    match result {
      Ok(subscription) => {
        tracing::info!(
          user_id,
          subscription_id = subscription.id.as_deref().unwrap_or("-"),
          "bootstrapper inserted subscription"
        );
        Ok(SubscriptionOutcome::Created { id: subscription.id })
      }
      Err(ServiceError::Rejected { status, details }) => {
        tracing::warn!(
          user_id,
          callback_url,
          status,
          "failed to create timeline subscription, might be running on localhost. details: {}",
          serde_json::to_string_pretty(&details).unwrap_or_else(|_| details.to_string())
        );
        Ok(SubscriptionOutcome::Rejected { details })
      }
      Err(e) => Err(Error::Subscription(e)),
    }
  }
}
