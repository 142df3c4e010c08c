//! Shallow, revision-pinned repository acquisition

use std::path::{Path, PathBuf};
use std::sync::Arc;

use git2::build::CheckoutBuilder;
use git2::{AutotagOption, CertificateCheckStatus, FetchOptions, Oid, RemoteCallbacks, Repository};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

use crate::{
    CancelToken, Credential, Error, GitReference, Result, WorkingCopy, auth_url, redact_url,
    stack_dir_name,
};

/// Prefix of every isolation root created under the work directory.
pub const ISOLATION_PREFIX: &str = "deploy-";

/// Everything needed to acquire one working copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcquireRequest {
    /// Stack name, used for the checkout directory inside the isolation root
    pub stack_name: String,
    pub clone_url: String,
    pub reference: String,
    #[serde(default)]
    pub credential: Option<Credential>,
    /// Skip TLS certificate verification (self-hosted servers with private CAs)
    #[serde(default)]
    pub tls_insecure: bool,
}

/// Trait for producing working copies.
///
/// Implementations must give every call its own directory so concurrent
/// acquisitions never share state. A failed or canceled acquisition must
/// leave nothing behind: any directory it created is removed before the
/// error is returned.
pub trait Acquirer: Send + Sync {
    /// Acquire a working copy for `request`.
    ///
    /// Fails fast with [`Error::Canceled`] once `cancel` is triggered.
    fn acquire(&self, request: &AcquireRequest, cancel: &CancelToken) -> Result<WorkingCopy>;
}

/// Progress reported while a working copy is fetched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Progress {
    /// Objects received from the remote so far
    Transfer { received: usize, total: usize },
    /// Text sent by the remote
    Remote(String),
    /// The fetch completed; checkout follows
    Fetched,
}

/// Observer invoked for every [`Progress`] event of an acquisition.
pub type ProgressHook = Arc<dyn Fn(&Progress) + Send + Sync>;

/// Acquires working copies with a depth-1, single-reference git fetch.
#[derive(Clone)]
pub struct GitAcquirer {
    workdir_root: PathBuf,
    depth: i32,
    progress: Option<ProgressHook>,
}

impl std::fmt::Debug for GitAcquirer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitAcquirer")
            .field("workdir_root", &self.workdir_root)
            .field("depth", &self.depth)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl Default for GitAcquirer {
    fn default() -> Self {
        Self::new(std::env::temp_dir())
    }
}

impl GitAcquirer {
    /// Create an acquirer placing isolation roots under `workdir_root`.
    pub fn new(workdir_root: impl Into<PathBuf>) -> Self {
        Self {
            workdir_root: workdir_root.into(),
            depth: 1,
            progress: None,
        }
    }

    /// Override the fetch depth. `0` fetches the full history.
    ///
    /// Needed for local clone sources, whose transport cannot fetch
    /// shallow.
    pub fn with_depth(mut self, depth: i32) -> Self {
        self.depth = depth;
        self
    }

    /// Observe fetch progress. The hook runs on the acquiring thread,
    /// before the cancellation flag is checked for that event.
    pub fn with_progress(mut self, hook: impl Fn(&Progress) + Send + Sync + 'static) -> Self {
        self.progress = Some(Arc::new(hook));
        self
    }

    pub fn workdir_root(&self) -> &Path {
        &self.workdir_root
    }

    /// Allocate a fresh isolation root and the stack directory inside it.
    ///
    /// The root name is unique per call, including under concurrent calls
    /// for the same stack.
    pub fn isolate(&self, stack_name: &str) -> Result<(TempDir, PathBuf)> {
        let dir_name = stack_dir_name(stack_name)?;

        std::fs::create_dir_all(&self.workdir_root)
            .map_err(|e| Error::io(&self.workdir_root, e))?;
        let root = tempfile::Builder::new()
            .prefix(ISOLATION_PREFIX)
            .tempdir_in(&self.workdir_root)
            .map_err(|e| Error::io(&self.workdir_root, e))?;

        let path = root.path().join(dir_name);
        std::fs::create_dir(&path).map_err(|e| Error::io(&path, e))?;
        Ok((root, path))
    }

    fn fetch_and_checkout(
        &self,
        path: &Path,
        url: &str,
        public_url: &str,
        reference: &GitReference,
        tls_insecure: bool,
        cancel: &CancelToken,
    ) -> std::result::Result<Oid, git2::Error> {
        let repo = Repository::init(path)?;

        let report = |event: Progress| {
            if let Some(hook) = &self.progress {
                hook(&event);
            }
        };

        // Returning false from a progress callback aborts the fetch
        let mut callbacks = RemoteCallbacks::new();
        callbacks.transfer_progress(|stats| {
            report(Progress::Transfer {
                received: stats.received_objects(),
                total: stats.total_objects(),
            });
            !cancel.is_canceled()
        });
        callbacks.sideband_progress(|text| {
            report(Progress::Remote(String::from_utf8_lossy(text).into_owned()));
            !cancel.is_canceled()
        });
        if tls_insecure {
            callbacks.certificate_check(|_cert, host| {
                tracing::warn!(host, "Skipping TLS certificate verification");
                Ok(CertificateCheckStatus::CertificateOk)
            });
        }

        let mut fetch_opts = FetchOptions::new();
        fetch_opts
            .remote_callbacks(callbacks)
            .download_tags(AutotagOption::None)
            .update_fetchhead(true);
        if self.depth > 0 {
            fetch_opts.depth(self.depth);
        }

        // Anonymous remote: the credential-bearing URL is never written to
        // the working copy's git config
        let refspec = reference.refspec();
        let mut remote = repo.remote_anonymous(url)?;
        remote.fetch(&[refspec.as_str()], Some(&mut fetch_opts), None)?;

        report(Progress::Fetched);
        if cancel.is_canceled() {
            return Err(git2::Error::from_str("fetch canceled"));
        }

        let commit = match repo.find_reference(&reference.local_ref()) {
            Ok(local) => local.peel_to_commit()?,
            Err(_) => repo.find_reference("FETCH_HEAD")?.peel_to_commit()?,
        };

        repo.checkout_tree(commit.as_object(), Some(CheckoutBuilder::new().force()))?;
        match reference.branch_name() {
            Some(branch) => {
                repo.branch(branch, &commit, true)?;
                repo.set_head(reference.as_str())?;
            }
            None => repo.set_head_detached(commit.id())?,
        }

        repo.remote("origin", public_url)?;
        Ok(commit.id())
    }
}

impl Acquirer for GitAcquirer {
    fn acquire(&self, request: &AcquireRequest, cancel: &CancelToken) -> Result<WorkingCopy> {
        let public_url = redact_url(&request.clone_url);
        if cancel.is_canceled() {
            return Err(Error::Canceled { url: public_url });
        }

        let reference = GitReference::parse(&request.reference)?;
        let effective_url = auth_url(&request.clone_url, request.credential.as_ref())?;
        let (root, path) = self.isolate(&request.stack_name)?;

        tracing::info!(
            stack = %request.stack_name,
            url = %public_url,
            reference = %reference,
            path = %path.display(),
            depth = self.depth,
            tls_insecure = request.tls_insecure,
            "Cloning repository"
        );

        // On failure `root` drops here and the partial checkout is removed
        let commit = self
            .fetch_and_checkout(
                &path,
                &effective_url,
                &public_url,
                &reference,
                request.tls_insecure,
                cancel,
            )
            .map_err(|source| {
                if cancel.is_canceled() {
                    Error::Canceled {
                        url: public_url.clone(),
                    }
                } else {
                    Error::CloneFailed {
                        url: public_url.clone(),
                        reference: reference.to_string(),
                        source,
                    }
                }
            })?;

        tracing::debug!(stack = %request.stack_name, %commit, "Repository cloned");
        Ok(WorkingCopy::new(
            root,
            path,
            commit.to_string(),
            reference.as_str(),
        ))
    }
}
