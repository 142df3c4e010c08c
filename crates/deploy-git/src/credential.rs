//! Access credentials and clone URL construction

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// URL schemes a credential can be injected into.
pub const SUPPORTED_SCHEMES: [&str; 3] = ["http", "https", "git"];

/// An access credential for a private repository.
///
/// `auth_type` is the user part of the injected userinfo (for example
/// `x-access-token` or `oauth2`), `token` the secret.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credential {
    pub auth_type: String,
    pub token: String,
}

impl Credential {
    pub fn new(auth_type: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            auth_type: auth_type.into(),
            token: token.into(),
        }
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("auth_type", &self.auth_type)
            .field("token", &"***")
            .finish()
    }
}

/// Build the effective clone URL.
///
/// With a credential, `scheme://host/path` becomes
/// `scheme://<auth_type>:<token>@host/path`. The scheme is kept as written.
/// Userinfo already present in the URL is replaced. Without a credential
/// the URL is returned unchanged.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] if a credential is given and the URL has
/// no host or a scheme other than `http`, `https` or `git`.
pub fn auth_url(url: &str, credential: Option<&Credential>) -> Result<String> {
    let Some(credential) = credential else {
        return Ok(url.to_string());
    };

    let invalid = |reason: &str| Error::InvalidUrl {
        url: redact_url(url),
        reason: reason.to_string(),
    };

    let (scheme, rest) = url
        .split_once("://")
        .ok_or_else(|| invalid("missing scheme"))?;
    if !SUPPORTED_SCHEMES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(scheme))
    {
        return Err(invalid("credentials require an http, https or git URL"));
    }

    let host_and_path = strip_userinfo(rest);
    if host_and_path.is_empty() || host_and_path.starts_with('/') {
        return Err(invalid("missing host"));
    }

    Ok(format!(
        "{scheme}://{}:{}@{host_and_path}",
        credential.auth_type, credential.token
    ))
}

/// Hide any userinfo in `url` so it can be logged.
pub fn redact_url(url: &str) -> String {
    match url.split_once("://") {
        Some((scheme, rest)) if strip_userinfo(rest).len() != rest.len() => {
            format!("{scheme}://***@{}", strip_userinfo(rest))
        }
        _ => url.to_string(),
    }
}

fn strip_userinfo(rest: &str) -> &str {
    let authority_end = rest.find('/').unwrap_or(rest.len());
    match rest[..authority_end].rfind('@') {
        Some(at) => &rest[at + 1..],
        None => rest,
    }
}
