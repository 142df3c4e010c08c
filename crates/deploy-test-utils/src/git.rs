//! Local git repositories used as clone sources.

use std::fs;
use std::path::Path;

use git2::{IndexAddOption, Repository, RepositoryInitOptions, Signature};

/// Initialises a repository on branch `main` with one commit holding `files`.
///
/// Realism level: **REAL WITH HISTORY**, built with `git2`, no `git` CLI
/// or user configuration needed.
///
/// # Panics
/// Panics if any git or filesystem operation fails.
pub fn repo_with_files(path: &Path, files: &[(&str, &str)]) -> Repository {
    let mut opts = RepositoryInitOptions::new();
    opts.initial_head("main");
    let repo = Repository::init_opts(path, &opts)
        .unwrap_or_else(|e| panic!("repo_with_files: failed to init {}: {e}", path.display()));

    for (name, content) in files {
        let full_path = path.join(name);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&full_path, content).unwrap();
    }

    commit_all(&repo, "Initial commit");
    repo
}

/// Stage everything in the working directory and commit it on HEAD.
///
/// # Panics
/// Panics if any git operation fails.
pub fn commit_all(repo: &Repository, message: &str) -> git2::Oid {
    let mut index = repo.index().unwrap();
    index
        .add_all(["*"].iter(), IndexAddOption::DEFAULT, None)
        .unwrap();
    index.write().unwrap();

    let tree = repo.find_tree(index.write_tree().unwrap()).unwrap();
    let sig = Signature::now("Test User", "test@example.com").unwrap();
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit<'_>> = parent.iter().collect();

    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .unwrap()
}

/// Create a lightweight tag pointing at HEAD.
pub fn tag_head(repo: &Repository, name: &str) {
    let head = repo.head().unwrap().peel(git2::ObjectType::Commit).unwrap();
    repo.tag_lightweight(name, &head, false).unwrap();
}
