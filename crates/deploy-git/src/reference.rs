//! Git reference normalization and fetch refspecs

use crate::{Error, Result};

/// A fully qualified git reference to acquire.
///
/// Short names are taken as branches: `main` -> `refs/heads/main`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitReference {
    full: String,
}

impl GitReference {
    /// Parse and validate a reference.
    pub fn parse(reference: &str) -> Result<Self> {
        let trimmed = reference.trim();
        let full = if trimmed.starts_with("refs/") {
            trimmed.to_string()
        } else {
            format!("refs/heads/{trimmed}")
        };

        if trimmed.is_empty() || !git2::Reference::is_valid_name(&full) {
            return Err(Error::InvalidReference {
                reference: reference.to_string(),
            });
        }
        Ok(Self { full })
    }

    pub fn as_str(&self) -> &str {
        &self.full
    }

    /// The branch name if this reference is a branch.
    pub fn branch_name(&self) -> Option<&str> {
        self.full.strip_prefix("refs/heads/")
    }

    /// Local reference the fetched commit is stored under.
    ///
    /// Branches map to `refs/remotes/origin/<branch>`; tags and any other
    /// reference keep their own name.
    pub fn local_ref(&self) -> String {
        match self.branch_name() {
            Some(branch) => format!("refs/remotes/origin/{branch}"),
            None => self.full.clone(),
        }
    }

    /// The single refspec fetched for this reference.
    pub fn refspec(&self) -> String {
        format!("+{}:{}", self.full, self.local_ref())
    }
}

impl std::fmt::Display for GitReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.full)
    }
}
