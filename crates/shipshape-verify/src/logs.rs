//! Log assertions over a container's accumulated output.
//!
//! Two shapes of check: parse a specific line as a structured JSON record
//! and compare one of its fields, or search the whole text for a literal
//! substring. Both operate on the log text as retrieved, so they are pure
//! and cheap to re-run while polling.

use serde_json::Value;
use shipshape_common::error::{Result, ShipshapeError};
use shipshape_runtime::container::ContainerHandle;
use shipshape_runtime::readiness::{ReadinessPolicy, delay_for_attempt};

/// Parses the log line at a zero-based index as a structured JSON record.
///
/// # Errors
///
/// Returns an error if the line does not exist or is not valid JSON.
pub fn structured_line(logs: &str, index: usize) -> Result<Value> {
    let line = logs
        .lines()
        .nth(index)
        .ok_or_else(|| ShipshapeError::NotFound {
            kind: "log line",
            id: format!("index {index}"),
        })?;
    Ok(serde_json::from_str(line)?)
}

/// Checks that a field of a structured log line equals the expected string.
///
/// # Errors
///
/// Returns an error if the line is missing or unparseable, the field is
/// absent, or the value differs.
pub fn check_structured_field(
    logs: &str,
    index: usize,
    field: &str,
    expected: &str,
) -> Result<()> {
    let record = structured_line(logs, index)?;
    let actual = record
        .get(field)
        .and_then(Value::as_str)
        .ok_or_else(|| ShipshapeError::NotFound {
            kind: "structured log field",
            id: field.to_string(),
        })?;
    if actual == expected {
        Ok(())
    } else {
        Err(ShipshapeError::Verification {
            check: "structured log field",
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}

/// Checks that the log text contains the literal substring.
///
/// # Errors
///
/// Returns a verification error if the substring is absent.
pub fn check_contains(logs: &str, needle: &str) -> Result<()> {
    if logs.contains(needle) {
        Ok(())
    } else {
        Err(ShipshapeError::Verification {
            check: "log content",
            expected: format!("substring {needle:?}"),
            actual: format!("no match in {} log lines", logs.lines().count()),
        })
    }
}

/// Counts non-overlapping occurrences of a literal substring.
#[must_use]
pub fn count_occurrences(logs: &str, needle: &str) -> usize {
    logs.matches(needle).count()
}

/// Polls a container's logs until the substring has appeared at least
/// `min_count` times, using the same bounded backoff as the readiness
/// probe.
///
/// # Errors
///
/// Returns a verification error carrying the last observed count if the
/// retry budget runs out, or a daemon error if logs cannot be retrieved.
pub async fn wait_for_log_count(
    handle: &ContainerHandle,
    needle: &str,
    min_count: usize,
    policy: &ReadinessPolicy,
) -> Result<()> {
    let mut last_count = 0;
    for attempt in 0..policy.max_attempts {
        let logs = handle.logs().await?;
        last_count = count_occurrences(&logs, needle);
        if last_count >= min_count {
            tracing::debug!(needle, count = last_count, "log marker observed");
            return Ok(());
        }
        tokio::time::sleep(delay_for_attempt(policy, attempt)).await;
    }
    Err(ShipshapeError::Verification {
        check: "log content",
        expected: format!("at least {min_count} occurrence(s) of {needle:?}"),
        actual: format!("{last_count} occurrence(s)"),
    })
}
