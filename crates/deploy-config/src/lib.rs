//! Deployment configuration for compose-deploy
//!
//! Decodes `.compose-deploy.yaml` documents into a [`DeployConfig`],
//! validates required keys and discovers the configuration file inside a
//! repository working copy, falling back to a computed default when the
//! repository declares none.

pub mod codec;
pub mod error;
pub mod model;
pub mod resolver;
pub mod validation;

pub use error::{Error, Result};
pub use model::{BuildOpts, DeployConfig};
pub use resolver::{ConfigResolver, DEFAULT_CONFIG_FILE_NAMES, DEFAULT_MAX_CONFIG_SIZE};
pub use validation::{is_contained, validate};
