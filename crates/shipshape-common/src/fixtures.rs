//! Process-wide constants and expected fixtures.
//!
//! These literals define the pass/fail criteria for every verification the
//! harness performs: the expected HTTP body, the expected server
//! configuration per build stage, and the fixed paths inside the images
//! under test.

use serde_json::{Value, json};

use crate::types::{ConfigMapping, ConfigValue};

/// Port the application server listens on inside the container.
pub const CONTAINER_PORT: u16 = 80;

/// Host port used when no dynamic allocation is requested.
pub const DEFAULT_HOST_PORT: u16 = 8000;

/// Prefix for dynamically allocated container names.
pub const CONTAINER_NAME_PREFIX: &str = "shipshape-test";

/// Fixed container name used by single-case runs.
pub const DEFAULT_CONTAINER_NAME: &str = "shipshape-test-container";

/// Repository name of the base server image.
pub const BASE_IMAGE_REPOSITORY: &str = "uvicorn-gunicorn-poetry";

/// Repository name of the multi-stage application image.
pub const APP_IMAGE_REPOSITORY: &str = "fastapi-multistage";

/// Working directory of the application inside the image.
pub const APPLICATION_ROOT: &str = "/application_root";

/// Source file watched by the development-stage reloader.
pub const WATCHED_SOURCE_FILE: &str = "/application_root/app/main.py";

/// Path of the generated server configuration artifact inside the container.
pub const CONFIG_ARTIFACT_PATH: &str = "/application_root/uvicorn_configuration";

/// Log line emitted by the reloader when the watched source file changes.
pub const RELOAD_LOG_MARKER: &str =
    "WARNING:  StatReload detected file change in 'app/main.py'. Reloading...";

/// Severity expected on the structured startup log line.
pub const EXPECTED_STARTUP_LOG_LEVEL: &str = "INFO";

/// Document the root endpoint must return, on first run and after restart.
#[must_use]
pub fn hello_world_body() -> Value {
    json!({ "Hello": "World" })
}

/// Expected server configuration for the JSON-logging production stage.
///
/// The `reload` option is deliberately absent: production images must not
/// watch source files, and the tests assert the key is missing.
#[must_use]
pub fn json_logging_config() -> ConfigMapping {
    let mut expected = ConfigMapping::new();
    let _ = expected.insert("workers".into(), ConfigValue::Num(2));
    let _ = expected.insert("host".into(), ConfigValue::Str("0.0.0.0".into()));
    let _ = expected.insert("port".into(), ConfigValue::Num(i64::from(CONTAINER_PORT)));
    let _ = expected.insert("log-level".into(), ConfigValue::Str("info".into()));
    let _ = expected.insert(
        "log-config".into(),
        ConfigValue::Str("/application_root/logging_configuration.json".into()),
    );
    expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_world_body_is_the_fixed_document() {
        assert_eq!(hello_world_body(), json!({ "Hello": "World" }));
    }

    #[test]
    fn json_logging_config_has_the_asserted_keys() {
        let expected = json_logging_config();
        for key in ["workers", "host", "port", "log-level", "log-config"] {
            assert!(expected.contains_key(key), "missing fixture key {key}");
        }
    }

    #[test]
    fn json_logging_config_never_sets_reload() {
        assert!(json_logging_config().get("reload").is_none());
    }

    #[test]
    fn in_container_paths_live_under_the_application_root() {
        assert!(WATCHED_SOURCE_FILE.starts_with(APPLICATION_ROOT));
        assert!(CONFIG_ARTIFACT_PATH.starts_with(APPLICATION_ROOT));
    }

    #[test]
    fn default_resources_follow_the_naming_scheme() {
        assert!(DEFAULT_CONTAINER_NAME.starts_with(CONTAINER_NAME_PREFIX));
        assert_ne!(DEFAULT_HOST_PORT, CONTAINER_PORT);
    }

    #[test]
    fn container_port_matches_the_fixture_value() {
        assert_eq!(
            json_logging_config().get("port"),
            Some(&ConfigValue::Num(80))
        );
    }
}
