//! YAML codec for [`DeployConfig`]
//!
//! Decoding starts from the defaults and overlays the keys present in the
//! document, so absent keys keep their default value. Unknown keys are
//! ignored.

use crate::{DeployConfig, Error, Result};

/// Decode a configuration document.
///
/// An empty document (or one holding only comments) decodes to the defaults.
///
/// # Errors
///
/// Returns [`Error::Decode`] if the input is not UTF-8, is not valid YAML,
/// or a key holds a value of the wrong type.
pub fn decode(raw: &[u8]) -> Result<DeployConfig> {
    let text = std::str::from_utf8(raw).map_err(|e| Error::Decode {
        message: format!("document is not valid UTF-8: {e}"),
    })?;

    if is_blank(text) {
        return Ok(DeployConfig::default());
    }

    let value: serde_yaml::Value = serde_yaml::from_str(text).map_err(decode_error)?;
    if value.is_null() {
        return Ok(DeployConfig::default());
    }
    serde_yaml::from_value(value).map_err(decode_error)
}

/// Encode a configuration as a YAML document.
pub fn encode(config: &DeployConfig) -> Result<String> {
    serde_yaml::to_string(config).map_err(|e| Error::Decode {
        message: format!("failed to encode configuration: {e}"),
    })
}

fn is_blank(text: &str) -> bool {
    text.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#') || line == "---"
    })
}

fn decode_error(e: serde_yaml::Error) -> Error {
    Error::Decode {
        message: e.to_string(),
    }
}
