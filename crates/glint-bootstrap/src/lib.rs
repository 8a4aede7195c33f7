//! New-user bootstrap workflow.
//!
//! [`Bootstrapper::bootstrap_new_user`] provisions a freshly authorised user
//! into the mirror service: a starter contact, a timeline subscription, and a
//! welcome card pinned to the user's last known location. The steps run in a
//! fixed order; only a rejected subscription is tolerated.

mod bootstrapper;
pub mod card;
pub mod config;
pub mod error;

pub use bootstrapper::{BootstrapReport, Bootstrapper, SubscriptionOutcome};
pub use config::BootstrapConfig;
pub use error::{Error, Result};
