//! Stack name to directory name mapping

use crate::{Error, Result};

/// Convert a stack name to a single safe directory name.
///
/// Slashes, dots and other unsafe characters become dashes, runs of dashes
/// collapse and leading/trailing dashes are dropped, so the result can never
/// escape the isolation root.
/// `acme/web.app` -> `acme-web-app`
///
/// # Errors
///
/// Returns [`Error::InvalidStackName`] if nothing usable remains.
pub fn stack_dir_name(stack_name: &str) -> Result<String> {
    let slug = slugify(stack_name);
    if slug.is_empty() {
        return Err(Error::InvalidStackName {
            name: stack_name.to_string(),
        });
    }
    Ok(slug)
}

fn slugify(name: &str) -> String {
    let mut result = String::with_capacity(name.len());
    let mut last_was_dash = true; // Start true to skip leading dashes

    for c in name.chars() {
        if c.is_alphanumeric() || c == '_' {
            result.push(c);
            last_was_dash = false;
        } else if !last_was_dash {
            result.push('-');
            last_was_dash = true;
        }
    }

    if result.ends_with('-') {
        result.pop();
    }

    result
}
