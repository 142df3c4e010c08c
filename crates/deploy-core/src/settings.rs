//! Process settings passed to the assembler at construction

use std::path::PathBuf;

use deploy_config::{DEFAULT_CONFIG_FILE_NAMES, DEFAULT_MAX_CONFIG_SIZE};
use serde::Deserialize;

use crate::{Error, Result};

pub const DEFAULT_PORT: u16 = 8080;

/// Process environment as read by `envy`.
///
/// Field names map to variables upper-cased: `deploy_workdir` is
/// `DEPLOY_WORKDIR`. Lists are comma separated.
#[derive(Deserialize)]
struct EnvSettings {
    webhook_secret: Option<String>,
    port: Option<u16>,
    deploy_workdir: Option<PathBuf>,
    deploy_config_file_names: Option<Vec<String>>,
    deploy_max_config_size: Option<u64>,
    /// Unsigned so a negative depth is rejected while parsing
    deploy_clone_depth: Option<u32>,
}

/// Settings shared by every triggering event.
#[derive(Clone)]
pub struct Settings {
    /// Shared secret the webhook layer verifies signatures with
    pub webhook_secret: Option<String>,
    /// Port the webhook layer listens on
    pub port: u16,
    /// Directory isolation roots are created under
    pub workdir_root: PathBuf,
    /// Recognized configuration file names, first match wins
    pub config_file_names: Vec<String>,
    pub max_config_size: u64,
    /// Fetch depth; `0` fetches full history
    pub clone_depth: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            webhook_secret: None,
            port: DEFAULT_PORT,
            workdir_root: std::env::temp_dir(),
            config_file_names: DEFAULT_CONFIG_FILE_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            max_config_size: DEFAULT_MAX_CONFIG_SIZE,
            clone_depth: 1,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)));
        Self::from_vars(vars)
    }

    /// Read settings from `vars`, falling back to defaults for unset or
    /// empty variables.
    pub fn from_vars<I>(vars: I) -> Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let vars = vars
            .into_iter()
            .filter(|(_, value)| !value.trim().is_empty());
        let env: EnvSettings = envy::from_iter(vars).map_err(|e| Error::Settings {
            message: e.to_string(),
        })?;
        Self::from_env_settings(env)
    }

    fn from_env_settings(env: EnvSettings) -> Result<Self> {
        let mut settings = Self {
            webhook_secret: env.webhook_secret,
            ..Self::default()
        };

        if let Some(port) = env.port {
            settings.port = port;
        }
        if let Some(workdir) = env.deploy_workdir {
            settings.workdir_root = workdir;
        }
        if let Some(max) = env.deploy_max_config_size {
            settings.max_config_size = max;
        }
        if let Some(depth) = env.deploy_clone_depth {
            settings.clone_depth = i32::try_from(depth).map_err(|_| Error::Settings {
                message: format!("DEPLOY_CLONE_DEPTH={depth} is out of range"),
            })?;
        }
        if let Some(names) = env.deploy_config_file_names {
            let names: Vec<String> = names
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(String::from)
                .collect();
            if names.is_empty() {
                return Err(Error::Settings {
                    message: "DEPLOY_CONFIG_FILE_NAMES names no file".into(),
                });
            }
            settings.config_file_names = names;
        }

        Ok(settings)
    }
}

impl std::fmt::Debug for Settings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Settings")
            .field("webhook_secret", &self.webhook_secret.as_ref().map(|_| "***"))
            .field("port", &self.port)
            .field("workdir_root", &self.workdir_root)
            .field("config_file_names", &self.config_file_names)
            .field("max_config_size", &self.max_config_size)
            .field("clone_depth", &self.clone_depth)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from(vars: &[(&str, &str)]) -> Result<Settings> {
        Settings::from_vars(vars.iter().map(|(k, v)| (k.to_string(), v.to_string())))
    }

    #[test]
    fn test_defaults_when_unset() {
        let settings = from(&[]).unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.webhook_secret, None);
        assert_eq!(settings.clone_depth, 1);
        assert_eq!(
            settings.config_file_names,
            vec![".compose-deploy.yaml", ".compose-deploy.yml"]
        );
    }

    #[test]
    fn test_reads_variables() {
        let settings = from(&[
            ("WEBHOOK_SECRET", "hunter2"),
            ("PORT", "9000"),
            ("DEPLOY_WORKDIR", "/var/lib/deploy"),
            ("DEPLOY_CONFIG_FILE_NAMES", "deploy.yaml, .deploy.yml"),
            ("DEPLOY_MAX_CONFIG_SIZE", "4096"),
            ("HOME", "/root"),
        ])
        .unwrap();
        assert_eq!(settings.webhook_secret.as_deref(), Some("hunter2"));
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.workdir_root, PathBuf::from("/var/lib/deploy"));
        assert_eq!(settings.config_file_names, vec!["deploy.yaml", ".deploy.yml"]);
        assert_eq!(settings.max_config_size, 4096);
    }

    #[test]
    fn test_empty_values_count_as_unset() {
        let settings = from(&[("PORT", ""), ("DEPLOY_WORKDIR", "  ")]).unwrap();
        assert_eq!(settings.port, 8080);
        assert_eq!(settings.workdir_root, std::env::temp_dir());
    }

    #[test]
    fn test_invalid_port() {
        let err = from(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
        assert!(err.to_string().to_lowercase().contains("port"));
    }

    #[test]
    fn test_clone_depth() {
        assert_eq!(from(&[("DEPLOY_CLONE_DEPTH", "0")]).unwrap().clone_depth, 0);
        assert!(from(&[("DEPLOY_CLONE_DEPTH", "-3")]).is_err());
    }

    #[test]
    fn test_empty_file_name_list() {
        let err = from(&[("DEPLOY_CONFIG_FILE_NAMES", " , ")]).unwrap_err();
        assert!(matches!(err, Error::Settings { .. }));
    }

    #[test]
    fn test_debug_hides_secret() {
        let settings = from(&[("WEBHOOK_SECRET", "hunter2")]).unwrap();
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
