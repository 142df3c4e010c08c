//! In-memory implementation of [`FileSystem`] for tests and fixtures

use std::collections::BTreeMap;
use std::io::{Cursor, Read};

use crate::{DirEntry, EntryKind, Error, FileSystem, NormalizedPath, Result};

#[derive(Debug, Clone)]
enum Node {
    File(Vec<u8>),
    Dir,
    Symlink,
}

/// An immutable-after-construction in-memory directory tree.
///
/// Parent directories are created implicitly when files are added.
///
/// ```
/// use deploy_fs::{FileSystem, MemoryFs, NormalizedPath};
///
/// let fs = MemoryFs::new().with_file("repo/.compose-deploy.yaml", "name: demo\n");
/// let entries = fs.list_dir(&NormalizedPath::new("repo")).unwrap();
/// assert_eq!(entries[0].name, ".compose-deploy.yaml");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    nodes: BTreeMap<NormalizedPath, Node>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file, creating its parent directories.
    pub fn with_file(mut self, path: impl Into<NormalizedPath>, content: impl AsRef<[u8]>) -> Self {
        let path = path.into();
        self.insert_parents(&path);
        self.nodes.insert(path, Node::File(content.as_ref().to_vec()));
        self
    }

    /// Add an (empty) directory, creating its parents.
    pub fn with_dir(mut self, path: impl Into<NormalizedPath>) -> Self {
        let path = path.into();
        self.insert_parents(&path);
        self.nodes.insert(path, Node::Dir);
        self
    }

    /// Add a symlink entry. Its target is never resolved.
    pub fn with_symlink(mut self, path: impl Into<NormalizedPath>) -> Self {
        let path = path.into();
        self.insert_parents(&path);
        self.nodes.insert(path, Node::Symlink);
        self
    }

    fn insert_parents(&mut self, path: &NormalizedPath) {
        let mut current = path.parent();
        while let Some(dir) = current {
            current = dir.parent();
            self.nodes.entry(dir).or_insert(Node::Dir);
        }
    }
}

impl FileSystem for MemoryFs {
    fn list_dir(&self, dir: &NormalizedPath) -> Result<Vec<DirEntry>> {
        match self.nodes.get(dir) {
            Some(Node::Dir) => {}
            Some(_) => {
                return Err(Error::NotADirectory {
                    path: dir.to_native(),
                });
            }
            None => return Err(Error::NotFound { path: dir.to_native() }),
        }

        let entries = self
            .nodes
            .iter()
            .filter(|(path, _)| path.parent().as_ref() == Some(dir))
            .filter_map(|(path, node)| {
                let kind = match node {
                    Node::File(_) => EntryKind::File,
                    Node::Dir => EntryKind::Dir,
                    Node::Symlink => EntryKind::Symlink,
                };
                path.file_name().map(|name| DirEntry::new(name, kind))
            })
            .collect();
        Ok(entries)
    }

    fn open(&self, path: &NormalizedPath) -> Result<Box<dyn Read + '_>> {
        match self.nodes.get(path) {
            Some(Node::File(content)) => Ok(Box::new(Cursor::new(content.as_slice()))),
            Some(_) => Err(Error::NotAFile {
                path: path.to_native(),
            }),
            None => Err(Error::NotFound {
                path: path.to_native(),
            }),
        }
    }
}
