//! Acquired working copies and their cleanup

use std::path::{Path, PathBuf};

use deploy_fs::NormalizedPath;
use tempfile::TempDir;

use crate::{Error, Result};

/// An isolated directory tree holding one acquired checkout.
///
/// The working copy owns its temporary isolation root and removes it when
/// dropped, on every exit path. Call [`WorkingCopy::keep`] to hand the tree
/// off to a consumer that takes over its cleanup.
#[derive(Debug)]
pub struct WorkingCopy {
    root: Option<TempDir>,
    root_path: PathBuf,
    path: PathBuf,
    commit: String,
    reference: String,
}

impl WorkingCopy {
    /// Wrap a checkout at `path`, which must live inside `root`.
    pub fn new(
        root: TempDir,
        path: PathBuf,
        commit: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            root_path: root.path().to_path_buf(),
            root: Some(root),
            path,
            commit: commit.into(),
            reference: reference.into(),
        }
    }

    /// Path of the checkout itself.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn normalized(&self) -> NormalizedPath {
        NormalizedPath::new(&self.path)
    }

    /// Path of the isolation root containing the checkout.
    pub fn root(&self) -> &Path {
        &self.root_path
    }

    /// Commit id the checkout is pinned to.
    pub fn commit(&self) -> &str {
        &self.commit
    }

    pub fn reference(&self) -> &str {
        &self.reference
    }

    /// Disable automatic removal and return the checkout path.
    ///
    /// The caller becomes responsible for removing [`WorkingCopy::root`].
    pub fn keep(mut self) -> PathBuf {
        if let Some(root) = self.root.take() {
            #[allow(deprecated)]
            let _ = root.into_path();
        }
        self.path.clone()
    }

    /// Remove the working copy now, reporting failures instead of ignoring
    /// them as drop does.
    pub fn close(mut self) -> Result<()> {
        match self.root.take() {
            Some(root) => root.close().map_err(|e| Error::io(&self.root_path, e)),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn working_copy() -> WorkingCopy {
        let root = tempfile::Builder::new().prefix("deploy-").tempdir().unwrap();
        let path = root.path().join("demo");
        std::fs::create_dir(&path).unwrap();
        WorkingCopy::new(root, path, "abc123", "refs/heads/main")
    }

    #[test]
    fn test_drop_removes_root() {
        let copy = working_copy();
        let root = copy.root().to_path_buf();
        assert!(copy.path().starts_with(&root));
        drop(copy);
        assert!(!root.exists());
    }

    #[test]
    fn test_close_removes_root() {
        let copy = working_copy();
        let root = copy.root().to_path_buf();
        copy.close().unwrap();
        assert!(!root.exists());
    }

    #[test]
    fn test_keep_survives_drop() {
        let copy = working_copy();
        let root = copy.root().to_path_buf();
        let path = copy.keep();
        assert!(path.exists());
        std::fs::remove_dir_all(root).unwrap();
    }
}
