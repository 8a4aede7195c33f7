//! `POST /users/{user_id}/bootstrap`: run the new-user workflow.

use axum::{
  Json,
  extract::{Path, State},
};
use glint_bootstrap::BootstrapReport;
use glint_core::{credential::CredentialStore, mirror::MirrorService};

use crate::{AppState, auth::Authenticated, context::Origin, error::Error};

pub async fn handler<S, M>(
  _auth: Authenticated,
  State(state): State<AppState<S, M>>,
  Origin(ctx): Origin,
  Path(user_id): Path<String>,
) -> Result<Json<BootstrapReport>, Error>
where
  S: CredentialStore + 'static,
  M: MirrorService + 'static,
{
  tracing::info!(user_id, origin = %ctx, "bootstrapping new user");
  let report = state.bootstrapper.bootstrap_new_user(&ctx, &user_id).await?;
  Ok(Json(report))
}
