//! Deployment request assembly for compose-deploy
//!
//! Turns one triggering event into a [`DeploymentRequest`]: a shallow
//! working copy of the repository at the triggered reference paired with
//! its resolved and validated [`deploy_config::DeployConfig`], ready to be
//! handed to an external compose executor.

pub mod assembler;
pub mod error;
pub mod event;
pub mod logging;
pub mod request;
pub mod response;
pub mod settings;

pub use assembler::Assembler;
pub use error::{Error, Result};
pub use event::TriggerEvent;
pub use request::{DeploymentRequest, Handoff};
pub use response::Response;
pub use settings::Settings;
