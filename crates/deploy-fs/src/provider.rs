//! Filesystem capability trait

use std::io::Read;

use crate::{Error, NormalizedPath, Result};

/// Kind of a directory entry.
///
/// Symlinks are reported as their own kind and never resolved, so a
/// listing cannot be used to reach files outside the listed tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Dir,
    Symlink,
}

/// A single entry directly inside a listed directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// File name without any leading path
    pub name: String,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn new(name: impl Into<String>, kind: EntryKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    pub fn is_file(&self) -> bool {
        self.kind == EntryKind::File
    }
}

/// Read-only access to a directory tree.
///
/// Implementations handle the specifics of the backing store
/// (real disk, in-memory fixture).
pub trait FileSystem: Send + Sync {
    /// List the entries directly inside `dir` (non-recursive).
    ///
    /// Entries are returned sorted by name.
    fn list_dir(&self, dir: &NormalizedPath) -> Result<Vec<DirEntry>>;

    /// Open a regular file for reading.
    fn open(&self, path: &NormalizedPath) -> Result<Box<dyn Read + '_>>;

    /// Read a whole file into memory.
    fn read_all(&self, path: &NormalizedPath) -> Result<Vec<u8>> {
        let mut reader = self.open(path)?;
        let mut buf = Vec::new();
        reader
            .read_to_end(&mut buf)
            .map_err(|e| Error::io(path.to_native(), e))?;
        Ok(buf)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn list_dir(&self, dir: &NormalizedPath) -> Result<Vec<DirEntry>> {
        (**self).list_dir(dir)
    }

    fn open(&self, path: &NormalizedPath) -> Result<Box<dyn Read + '_>> {
        (**self).open(path)
    }
}

impl<T: FileSystem + ?Sized> FileSystem for std::sync::Arc<T> {
    fn list_dir(&self, dir: &NormalizedPath) -> Result<Vec<DirEntry>> {
        (**self).list_dir(dir)
    }

    fn open(&self, path: &NormalizedPath) -> Result<Box<dyn Read + '_>> {
        (**self).open(path)
    }
}
