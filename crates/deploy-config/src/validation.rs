//! Required-key validation for declared configurations

use crate::{DeployConfig, Error, Result};

/// Check that the required keys of a declared configuration are set.
///
/// Keys are checked in a fixed order (`name`, `reference`, `working_dir`,
/// `compose_files`) and the first missing one is reported as
/// [`Error::KeyNotFound`]. A value made only of whitespace counts as missing.
///
/// `working_dir` must then stay inside the repository: an absolute path or
/// any `..` component is reported as [`Error::InvalidValue`].
pub fn validate(config: &DeployConfig) -> Result<()> {
    let required = [
        ("name", is_blank(&config.name)),
        ("reference", is_blank(&config.reference)),
        ("working_dir", is_blank(&config.working_directory)),
        ("compose_files", config.compose_files.is_empty()),
    ];

    if let Some((key, _)) = required.iter().find(|(_, missing)| *missing) {
        return Err(Error::key_not_found(*key));
    }

    if !is_contained(&config.working_directory) {
        return Err(Error::InvalidValue {
            key: "working_dir".into(),
            reason: format!(
                "'{}' must be a relative path inside the repository",
                config.working_directory
            ),
        });
    }
    Ok(())
}

/// Whether `path`, joined onto a directory, stays inside that directory.
///
/// Checked lexically: absolute paths, drive prefixes and `..` components
/// are rejected, whatever follows them.
pub fn is_contained(path: &str) -> bool {
    let path = path.trim().replace('\\', "/");
    let bytes = path.as_bytes();
    let has_drive = bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':';

    !path.starts_with('/') && !has_drive && !path.split('/').any(|component| component == "..")
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
