//! Real-disk implementation of [`FileSystem`]

use std::fs;
use std::io::Read;

use crate::{DirEntry, EntryKind, Error, FileSystem, NormalizedPath, Result};

/// Filesystem backed by the host disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl DiskFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for DiskFs {
    fn list_dir(&self, dir: &NormalizedPath) -> Result<Vec<DirEntry>> {
        let native = dir.to_native();
        let metadata = fs::metadata(&native).map_err(|e| Error::io(&native, e))?;
        if !metadata.is_dir() {
            return Err(Error::NotADirectory { path: native });
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(&native).map_err(|e| Error::io(&native, e))? {
            let entry = entry.map_err(|e| Error::io(&native, e))?;
            // DirEntry::file_type does not follow symlinks
            let file_type = entry.file_type().map_err(|e| Error::io(entry.path(), e))?;
            let kind = if file_type.is_symlink() {
                EntryKind::Symlink
            } else if file_type.is_dir() {
                EntryKind::Dir
            } else {
                EntryKind::File
            };
            entries.push(DirEntry::new(
                entry.file_name().to_string_lossy().into_owned(),
                kind,
            ));
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));

        tracing::trace!(dir = %dir, count = entries.len(), "Listed directory");
        Ok(entries)
    }

    fn open(&self, path: &NormalizedPath) -> Result<Box<dyn Read + '_>> {
        let native = path.to_native();
        let metadata = fs::symlink_metadata(&native).map_err(|e| Error::io(&native, e))?;
        if !metadata.is_file() {
            return Err(Error::NotAFile { path: native });
        }
        let file = fs::File::open(&native).map_err(|e| Error::io(&native, e))?;
        Ok(Box::new(file))
    }
}
