//! Resolve and validate commands

use std::path::Path;

use colored::Colorize;
use deploy_config::{ConfigResolver, codec};
use deploy_fs::NormalizedPath;

use crate::error::{CliError, Result};

/// Print the configuration `dir` deploys with, defaults included.
pub fn run_resolve(dir: &Path, name: Option<&str>) -> Result<()> {
    let root = NormalizedPath::new(dir);
    let name = match name {
        Some(name) => name.to_string(),
        None => dir_name(dir)?,
    };

    let config = ConfigResolver::on_disk().resolve(&root, &name)?;
    print!("{}", codec::encode(&config)?);
    Ok(())
}

/// Fail unless `dir` declares a configuration that decodes and validates.
pub fn run_validate(dir: &Path) -> Result<()> {
    let root = NormalizedPath::new(dir);
    let resolver = ConfigResolver::on_disk();

    let Some(path) = resolver.locate(&root)? else {
        return Err(CliError::user(format!(
            "no configuration file in {} (looked for {})",
            dir.display(),
            resolver.file_names().join(", ")
        )));
    };
    let config = resolver.load_declared(&root)?;

    println!(
        "{} {} (stack '{}')",
        "valid".green().bold(),
        path,
        config.name.cyan()
    );
    Ok(())
}

fn dir_name(dir: &Path) -> Result<String> {
    let canonical = dir.canonicalize()?;
    canonical
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| CliError::user(format!("cannot derive a stack name from {}", dir.display())))
}
