//! Deployment configuration schema - loaded from `.compose-deploy.yaml`
//!
//! # Example YAML
//!
//! ```yaml
//! name: demo
//! reference: refs/heads/main
//! working_dir: deploy
//! compose_files:
//!   - compose.prod.yaml
//! remove_orphans: true
//! timeout: 600
//! build_opts:
//!   quiet: true
//!   args:
//!     RUST_VERSION: "1.85"
//!   memory_limit: 2147483648
//! ```
//!
//! Every key except `name` is optional; absent keys keep the defaults
//! produced by [`DeployConfig::default`].

use std::collections::BTreeMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Reference deployed when the configuration does not name one.
pub const DEFAULT_REFERENCE: &str = "refs/heads/main";

/// Deployment root used when the configuration does not name one.
pub const DEFAULT_WORKING_DIR: &str = ".";

/// Conventional compose file names, in the order the executor tries them.
pub const DEFAULT_COMPOSE_FILES: [&str; 4] = [
    "compose.yaml",
    "compose.yml",
    "docker-compose.yml",
    "docker-compose.yaml",
];

/// Seconds the executor may spend on one deployment.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// The resolved deployment intent for one stack.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeployConfig {
    /// Logical stack identifier
    pub name: String,
    /// Git reference to deploy, e.g. `refs/heads/main` or `refs/tags/v1.0.0`
    pub reference: String,
    /// Subdirectory of the repository used as deployment root
    #[serde(rename = "working_dir")]
    pub working_directory: String,
    /// Candidate compose file names; the executor uses the first one present
    pub compose_files: Vec<String>,
    pub remove_orphans: bool,
    pub force_recreate: bool,
    pub force_image_pull: bool,
    /// Deployment timeout in seconds
    pub timeout: u64,
    pub build_opts: BuildOpts,
}

impl Default for DeployConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            reference: DEFAULT_REFERENCE.to_string(),
            working_directory: DEFAULT_WORKING_DIR.to_string(),
            compose_files: DEFAULT_COMPOSE_FILES.iter().map(|f| f.to_string()).collect(),
            remove_orphans: true,
            force_recreate: false,
            force_image_pull: false,
            timeout: DEFAULT_TIMEOUT_SECS,
            build_opts: BuildOpts::default(),
        }
    }
}

impl DeployConfig {
    /// The configuration used when a repository declares none.
    ///
    /// Valid by construction; it is never passed through validation.
    pub fn default_for(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Options for building images before the stack is brought up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOpts {
    pub force_image_pull: bool,
    pub quiet: bool,
    /// Build arguments
    pub args: BTreeMap<String, String>,
    /// Memory limit in bytes, 0 means unlimited
    pub memory_limit: u64,
    pub no_cache: bool,
}

impl Default for BuildOpts {
    fn default() -> Self {
        Self {
            force_image_pull: true,
            quiet: false,
            args: BTreeMap::new(),
            memory_limit: 0,
            no_cache: false,
        }
    }
}
