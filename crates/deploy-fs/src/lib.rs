//! Filesystem abstraction for compose-deploy
//!
//! Provides normalized path handling and a [`FileSystem`] capability that
//! can be backed by the real disk or an in-memory tree.

pub mod disk;
pub mod error;
pub mod memory;
pub mod path;
pub mod provider;

pub use disk::DiskFs;
pub use error::{Error, Result};
pub use memory::MemoryFs;
pub use path::NormalizedPath;
pub use provider::{DirEntry, EntryKind, FileSystem};
