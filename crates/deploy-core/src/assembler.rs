//! One triggering event in, one deployment request out

use std::sync::Arc;

use deploy_config::ConfigResolver;
use deploy_fs::{DiskFs, FileSystem};
use deploy_git::{Acquirer, CancelToken, GitAcquirer};

use crate::{DeploymentRequest, Error, Result, Settings, TriggerEvent};

/// Orchestrates acquisition then resolution for a single event.
///
/// Holds no per-event state, so one assembler can be shared by any number
/// of concurrent workers.
pub struct Assembler<A = GitAcquirer, F = DiskFs> {
    acquirer: A,
    resolver: ConfigResolver<F>,
}

impl Assembler<GitAcquirer, DiskFs> {
    pub fn new(settings: &Settings) -> Self {
        let acquirer = GitAcquirer::new(&settings.workdir_root).with_depth(settings.clone_depth);
        let resolver = ConfigResolver::on_disk()
            .with_file_names(settings.config_file_names.iter().cloned())
            .with_max_size(settings.max_config_size);
        Self { acquirer, resolver }
    }
}

impl<A: Acquirer, F: FileSystem> Assembler<A, F> {
    pub fn with_parts(acquirer: A, resolver: ConfigResolver<F>) -> Self {
        Self { acquirer, resolver }
    }

    pub fn acquirer(&self) -> &A {
        &self.acquirer
    }

    pub fn resolver(&self) -> &ConfigResolver<F> {
        &self.resolver
    }

    /// Acquire the event's repository and resolve its configuration.
    ///
    /// Acquisition errors return before the resolver runs. A resolution
    /// error carries the acquired working copy in [`Error::Resolve`].
    pub fn assemble(&self, event: &TriggerEvent, cancel: &CancelToken) -> Result<DeploymentRequest> {
        let request = event.acquire_request();
        let working_copy = self.acquirer.acquire(&request, cancel).map_err(|e| {
            tracing::warn!(
                repository = %event.repository_name,
                error = %e,
                "Repository acquisition failed"
            );
            Error::Acquire(e)
        })?;

        if cancel.is_canceled() {
            return Err(Error::Acquire(deploy_git::Error::Canceled {
                url: deploy_git::redact_url(&event.clone_url),
            }));
        }

        let config = match self
            .resolver
            .resolve(&working_copy.normalized(), &event.repository_name)
        {
            Ok(config) => config,
            Err(source) => {
                tracing::warn!(
                    repository = %event.repository_name,
                    path = %working_copy.path().display(),
                    error = %source,
                    "Configuration rejected"
                );
                return Err(Error::Resolve {
                    stack: event.repository_name.clone(),
                    source,
                    working_copy: Box::new(working_copy),
                });
            }
        };

        let request = DeploymentRequest::new(config, working_copy);
        tracing::info!(
            job_id = %request.job_id(),
            stack = %request.config().name,
            commit = %request.working_copy().commit(),
            path = %request.working_copy_path().display(),
            "Deployment request assembled"
        );
        Ok(request)
    }
}

impl<A, F> Assembler<A, F>
where
    A: Acquirer + 'static,
    F: FileSystem + 'static,
{
    /// Run [`Assembler::assemble`] on tokio's blocking pool.
    pub async fn assemble_async(
        self: Arc<Self>,
        event: TriggerEvent,
        cancel: CancelToken,
    ) -> Result<DeploymentRequest> {
        tokio::task::spawn_blocking(move || self.assemble(&event, &cancel))
            .await
            .map_err(|e| Error::Worker {
                message: e.to_string(),
            })?
    }
}
