//! Configuration discovery inside a repository working copy
//!
//! The `ConfigResolver` scans the top level of a working copy for the
//! recognized configuration file names, in order, and loads the first one
//! that exists as a regular file. A repository without any recognized file
//! deploys with [`DeployConfig::default_for`]; a repository whose file is
//! present but broken fails.

use std::io::Read;

use deploy_fs::{DiskFs, FileSystem, NormalizedPath};

use crate::{DeployConfig, Error, Result, codec, validate};

/// Configuration file names recognized by default, first match wins.
pub const DEFAULT_CONFIG_FILE_NAMES: [&str; 2] = [".compose-deploy.yaml", ".compose-deploy.yml"];

/// Largest configuration file accepted, in bytes.
pub const DEFAULT_MAX_CONFIG_SIZE: u64 = 1024 * 1024;

/// Resolves the deployment configuration of a working copy.
///
/// Generic over the [`FileSystem`] so tests can resolve against an
/// in-memory tree.
#[derive(Debug, Clone)]
pub struct ConfigResolver<F = DiskFs> {
    fs: F,
    file_names: Vec<String>,
    max_size: u64,
}

impl ConfigResolver<DiskFs> {
    /// Create a resolver reading from the host disk.
    pub fn on_disk() -> Self {
        Self::new(DiskFs)
    }
}

impl<F: FileSystem> ConfigResolver<F> {
    pub fn new(fs: F) -> Self {
        Self {
            fs,
            file_names: DEFAULT_CONFIG_FILE_NAMES
                .iter()
                .map(|name| name.to_string())
                .collect(),
            max_size: DEFAULT_MAX_CONFIG_SIZE,
        }
    }

    /// Replace the ordered list of recognized file names.
    pub fn with_file_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.file_names = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_max_size(mut self, max_size: u64) -> Self {
        self.max_size = max_size;
        self
    }

    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    /// Find the configuration file of the working copy at `root`.
    ///
    /// Only entries directly inside `root` are considered, and only regular
    /// files match; directories and symlinks with a recognized name are
    /// skipped.
    pub fn locate(&self, root: &NormalizedPath) -> Result<Option<NormalizedPath>> {
        let entries = self.fs.list_dir(root)?;

        for candidate in &self.file_names {
            if entries
                .iter()
                .any(|entry| entry.is_file() && entry.name == *candidate)
            {
                return Ok(Some(root.join(candidate)));
            }
        }
        Ok(None)
    }

    /// Load and validate the configuration the repository declares.
    ///
    /// # Errors
    ///
    /// - [`Error::ConfigNotFound`] if no recognized file is present
    /// - [`Error::InvalidConfig`] if the file is too large, fails to decode
    ///   or misses a required key
    pub fn load_declared(&self, root: &NormalizedPath) -> Result<DeployConfig> {
        let path = self.locate(root)?.ok_or_else(|| Error::ConfigNotFound {
            path: root.to_native(),
        })?;
        tracing::debug!(%path, "Loading deployment configuration");

        let raw = self.read_limited(&path)?;
        let config = codec::decode(&raw).map_err(|e| Error::invalid(path.to_native(), e))?;
        validate(&config).map_err(|e| Error::invalid(path.to_native(), e))?;

        Ok(config)
    }

    /// Resolve the configuration of the working copy at `root`.
    ///
    /// Falls back to [`DeployConfig::default_for`]`(display_name)` when the
    /// repository declares no configuration. Every other failure propagates.
    pub fn resolve(&self, root: &NormalizedPath, display_name: &str) -> Result<DeployConfig> {
        match self.load_declared(root) {
            Err(Error::ConfigNotFound { path }) => {
                tracing::info!(
                    path = %path.display(),
                    names = ?self.file_names,
                    "No deployment configuration found, using defaults"
                );
                Ok(DeployConfig::default_for(display_name))
            }
            result => result,
        }
    }

    fn read_limited(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        let reader = self.fs.open(path)?;
        let mut raw = Vec::new();
        reader
            .take(self.max_size.saturating_add(1))
            .read_to_end(&mut raw)
            .map_err(|e| deploy_fs::Error::io(path.to_native(), e))?;

        if raw.len() as u64 > self.max_size {
            return Err(Error::invalid(
                path.to_native(),
                Error::ConfigTooLarge {
                    path: path.to_native(),
                    max: self.max_size,
                },
            ));
        }
        Ok(raw)
    }
}
