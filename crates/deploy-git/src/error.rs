//! Error types for deploy-git

use std::path::PathBuf;

/// Result type for deploy-git operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while acquiring a repository.
///
/// URLs carried by these errors are always credential-redacted.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid clone URL '{url}': {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("Invalid stack name: '{name}'")]
    InvalidStackName { name: String },

    #[error("Invalid git reference: '{reference}'")]
    InvalidReference { reference: String },

    #[error("Failed to clone {url} at {reference}: {source}")]
    CloneFailed {
        url: String,
        reference: String,
        #[source]
        source: git2::Error,
    },

    #[error("Clone of {url} was canceled")]
    Canceled { url: String },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled { .. })
    }
}
