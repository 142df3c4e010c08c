//! Error types for deploy-config

use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Filesystem error: {0}")]
    Fs(#[from] deploy_fs::Error),

    #[error("Configuration file not found in {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Failed to decode configuration: {message}")]
    Decode { message: String },

    #[error("Required key not found: {key}")]
    KeyNotFound { key: String },

    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },

    #[error("Config file too large: {path} exceeds {max} bytes")]
    ConfigTooLarge { path: PathBuf, max: u64 },

    #[error("Invalid configuration at {path}: {source}")]
    InvalidConfig {
        path: PathBuf,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    pub fn invalid(path: impl Into<PathBuf>, source: Error) -> Self {
        Self::InvalidConfig {
            path: path.into(),
            source: Box::new(source),
        }
    }

    pub fn key_not_found(key: impl Into<String>) -> Self {
        Self::KeyNotFound { key: key.into() }
    }

    /// The required key whose absence caused this error, if any.
    pub fn missing_key(&self) -> Option<&str> {
        match self {
            Self::KeyNotFound { key } => Some(key),
            Self::InvalidConfig { source, .. } => source.missing_key(),
            _ => None,
        }
    }

    /// The key whose absent or rejected value caused this error, if any.
    pub fn offending_key(&self) -> Option<&str> {
        match self {
            Self::KeyNotFound { key } | Self::InvalidValue { key, .. } => Some(key),
            Self::InvalidConfig { source, .. } => source.offending_key(),
            _ => None,
        }
    }

    /// Whether this error means the repository declares no configuration.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ConfigNotFound { .. })
    }
}
