//! JSON response schema returned to the trigger's caller

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{DeploymentRequest, Error};

/// `Content-Type` of every response body.
pub const CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// Header preventing clients from sniffing another content type.
pub const NOSNIFF_HEADER: (&str, &str) = ("X-Content-Type-Options", "nosniff");

/// Response body: `{ code, job_id?, details?, error? }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub code: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Response {
    pub fn new(code: u16) -> Self {
        Self {
            code,
            job_id: None,
            details: None,
            error: None,
        }
    }

    /// A trigger accepted for deployment.
    pub fn accepted(request: &DeploymentRequest) -> Self {
        Self::new(202)
            .with_job_id(request.job_id())
            .with_details(format!(
                "deploying stack '{}' from {} at {}",
                request.config().name,
                request.working_copy().reference(),
                request.working_copy().commit()
            ))
    }

    /// A failed trigger. `details` carries the innermost cause.
    pub fn from_error(err: &Error) -> Self {
        let mut response = Self::new(err.status_code());
        response.error = Some(err.to_string());
        response.details = root_cause(err);
        response
    }

    pub fn with_job_id(mut self, job_id: Uuid) -> Self {
        self.job_id = Some(job_id.to_string());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.code)
    }

    /// Headers to send alongside the body.
    pub fn headers() -> [(&'static str, &'static str); 2] {
        [("Content-Type", CONTENT_TYPE), NOSNIFF_HEADER]
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

fn root_cause(err: &Error) -> Option<String> {
    let mut source = std::error::Error::source(err)?;
    while let Some(next) = source.source() {
        source = next;
    }
    Some(source.to_string())
}
