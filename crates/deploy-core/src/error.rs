//! Error types for deploy-core

use deploy_git::WorkingCopy;

/// Result type for deploy-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while assembling a deployment request
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Repository acquisition failed: {0}")]
    Acquire(#[from] deploy_git::Error),

    /// The repository was acquired but its configuration was rejected.
    ///
    /// The working copy is kept in the error so the caller decides whether
    /// to inspect it; dropping the error removes it.
    #[error("Configuration resolution failed for '{stack}': {source}")]
    Resolve {
        stack: String,
        #[source]
        source: deploy_config::Error,
        working_copy: Box<WorkingCopy>,
    },

    #[error("Invalid settings: {message}")]
    Settings { message: String },

    #[error("Worker failed: {message}")]
    Worker { message: String },
}

impl Error {
    /// Take the working copy out of a resolution failure.
    pub fn into_working_copy(self) -> Option<WorkingCopy> {
        match self {
            Self::Resolve { working_copy, .. } => Some(*working_copy),
            _ => None,
        }
    }

    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Acquire(e) if e.is_canceled())
    }

    /// HTTP status code reported to the trigger's caller.
    pub fn status_code(&self) -> u16 {
        use deploy_git::Error as GitError;

        match self {
            Self::Acquire(GitError::Canceled { .. }) => 499,
            Self::Acquire(
                GitError::InvalidUrl { .. }
                | GitError::InvalidReference { .. }
                | GitError::InvalidStackName { .. },
            ) => 400,
            Self::Acquire(GitError::CloneFailed { .. }) => 502,
            Self::Acquire(GitError::Io { .. }) => 500,
            Self::Resolve {
                source: deploy_config::Error::InvalidConfig { .. },
                ..
            } => 422,
            Self::Resolve { .. } | Self::Settings { .. } | Self::Worker { .. } => 500,
        }
    }
}
