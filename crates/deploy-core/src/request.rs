//! Deployment requests handed to the external executor

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use deploy_config::{DeployConfig, is_contained};
use deploy_git::{GitReference, WorkingCopy};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A resolved configuration paired with the working copy it describes.
///
/// Created once per triggering event. Owns the working copy: dropping the
/// request removes it, [`DeploymentRequest::handoff`] transfers it.
#[derive(Debug)]
pub struct DeploymentRequest {
    job_id: Uuid,
    created_at: DateTime<Utc>,
    config: DeployConfig,
    working_copy: WorkingCopy,
}

impl DeploymentRequest {
    pub fn new(config: DeployConfig, working_copy: WorkingCopy) -> Self {
        Self {
            job_id: Uuid::new_v4(),
            created_at: Utc::now(),
            config,
            working_copy,
        }
    }

    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn config(&self) -> &DeployConfig {
        &self.config
    }

    pub fn working_copy(&self) -> &WorkingCopy {
        &self.working_copy
    }

    pub fn working_copy_path(&self) -> &Path {
        self.working_copy.path()
    }

    /// Directory the executor runs compose in: the working copy joined with
    /// the configured working directory.
    ///
    /// `None` if the working directory would leave the working copy.
    pub fn deployment_root(&self) -> Option<PathBuf> {
        if !is_contained(&self.config.working_directory) {
            return None;
        }
        Some(
            self.working_copy
                .normalized()
                .join(&self.config.working_directory)
                .to_native(),
        )
    }

    /// Whether the acquired reference is the one the configuration deploys.
    ///
    /// Short names in the configuration are taken as branches, as they are
    /// for triggers.
    pub fn matches_reference(&self) -> bool {
        GitReference::parse(&self.config.reference)
            .is_ok_and(|reference| reference.as_str() == self.working_copy.reference())
    }

    pub fn into_parts(self) -> (DeployConfig, WorkingCopy) {
        (self.config, self.working_copy)
    }

    /// Hand the request to an executor running outside this process.
    ///
    /// The working copy is no longer removed automatically; the executor
    /// owns it from here on.
    pub fn handoff(self) -> Handoff {
        let commit = self.working_copy.commit().to_string();
        Handoff {
            job_id: self.job_id,
            created_at: self.created_at,
            config: self.config,
            commit,
            working_copy_path: self.working_copy.keep(),
        }
    }
}

/// Serializable form of a [`DeploymentRequest`] for an external executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Handoff {
    pub job_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub config: DeployConfig,
    pub commit: String,
    pub working_copy_path: PathBuf,
}
