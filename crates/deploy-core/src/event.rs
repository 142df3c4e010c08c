//! Triggering events delivered by the webhook layer

use deploy_git::{AcquireRequest, Credential};
use serde::{Deserialize, Serialize};

/// An inbound notification that a repository should be (re)deployed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerEvent {
    /// Repository name; doubles as stack name and default config name
    pub repository_name: String,
    pub clone_url: String,
    /// Reference that was pushed, e.g. `refs/heads/main`
    pub reference: String,
    #[serde(default)]
    pub credential: Option<Credential>,
    #[serde(default)]
    pub tls_insecure: bool,
}

impl TriggerEvent {
    pub fn new(
        repository_name: impl Into<String>,
        clone_url: impl Into<String>,
        reference: impl Into<String>,
    ) -> Self {
        Self {
            repository_name: repository_name.into(),
            clone_url: clone_url.into(),
            reference: reference.into(),
            credential: None,
            tls_insecure: false,
        }
    }

    pub fn with_credential(mut self, credential: Credential) -> Self {
        self.credential = Some(credential);
        self
    }

    pub fn with_tls_insecure(mut self, tls_insecure: bool) -> Self {
        self.tls_insecure = tls_insecure;
        self
    }

    pub fn acquire_request(&self) -> AcquireRequest {
        AcquireRequest {
            stack_name: self.repository_name.clone(),
            clone_url: self.clone_url.clone(),
            reference: self.reference.clone(),
            credential: self.credential.clone(),
            tls_insecure: self.tls_insecure,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_event() {
        let event: TriggerEvent = serde_json::from_str(
            r#"{"repository_name":"demo","clone_url":"https://git.internal/demo.git","reference":"refs/heads/main"}"#,
        )
        .unwrap();
        assert_eq!(
            event,
            TriggerEvent::new("demo", "https://git.internal/demo.git", "refs/heads/main")
        );
    }

    #[test]
    fn test_acquire_request_carries_everything() {
        let event = TriggerEvent::new("demo", "https://git.internal/demo.git", "main")
            .with_credential(Credential::new("oauth2", "t0k"))
            .with_tls_insecure(true);
        let request = event.acquire_request();
        assert_eq!(request.stack_name, "demo");
        assert_eq!(request.reference, "main");
        assert!(request.tls_insecure);
        assert_eq!(request.credential, Some(Credential::new("oauth2", "t0k")));
    }
}
