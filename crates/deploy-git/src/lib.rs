//! Repository acquisition for compose-deploy
//!
//! Produces isolated, shallow, revision-pinned working copies of remote
//! repositories. Every acquisition gets its own uniquely named temporary
//! root, so concurrent triggers never share a directory.

pub mod acquirer;
pub mod cancel;
pub mod credential;
pub mod error;
pub mod naming;
pub mod reference;
pub mod working_copy;

pub use acquirer::{AcquireRequest, Acquirer, GitAcquirer, Progress, ProgressHook};
pub use cancel::CancelToken;
pub use credential::{Credential, auth_url, redact_url};
pub use error::{Error, Result};
pub use naming::stack_dir_name;
pub use reference::GitReference;
pub use working_copy::WorkingCopy;
