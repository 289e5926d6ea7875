//! Extraction of the generated server configuration from a container.
//!
//! The images under test write the options their server was started with
//! to a key-value text artifact. The extractor reads that artifact out of
//! the running container and parses it into a [`ConfigMapping`]; options
//! the server was not started with are simply absent from the mapping.

use shipshape_common::error::{Result, ShipshapeError};
use shipshape_common::fixtures::CONFIG_ARTIFACT_PATH;
use shipshape_common::types::{ConfigMapping, ConfigValue};
use shipshape_runtime::container::ContainerHandle;

/// Parses the configuration artifact text into a mapping.
///
/// One option per line, key and value separated by whitespace; a key on a
/// line of its own is a bare flag and maps to an empty string value.
/// Blank lines and `#` comments are skipped.
#[must_use]
pub fn parse_artifact(text: &str) -> ConfigMapping {
    let mut mapping = ConfigMapping::new();
    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        if let Some((key, value)) = line.split_once(char::is_whitespace) {
            let _ = mapping.insert(key.to_string(), ConfigValue::parse(value.trim()));
        } else {
            let _ = mapping.insert(line.to_string(), ConfigValue::Str(String::new()));
        }
    }
    mapping
}

/// Reads and parses the configuration artifact from a running container.
///
/// # Errors
///
/// Returns an error if the exec fails or the artifact does not exist in
/// the container.
pub async fn extract(handle: &ContainerHandle) -> Result<ConfigMapping> {
    let output = handle.exec(&["cat", CONFIG_ARTIFACT_PATH]).await?;
    if output.exit_code != 0 {
        return Err(ShipshapeError::NotFound {
            kind: "server configuration artifact",
            id: CONFIG_ARTIFACT_PATH.to_string(),
        });
    }
    let mapping = parse_artifact(&output.stdout);
    tracing::debug!(
        container = handle.name(),
        options = mapping.len(),
        "server configuration extracted"
    );
    Ok(mapping)
}
