//! HTTP verification against the container's exposed endpoint.

use serde_json::Value;
use shipshape_common::error::{Result, ShipshapeError};

/// Fetches a URL and parses the response body as JSON.
///
/// # Errors
///
/// Returns an error if the request fails or the body is not valid JSON.
pub async fn fetch_json(url: &str) -> Result<Value> {
    let response = reqwest::get(url).await.map_err(|e| ShipshapeError::Http {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    response.json().await.map_err(|e| ShipshapeError::Http {
        url: url.to_string(),
        message: e.to_string(),
    })
}

/// Checks that the URL returns exactly the expected JSON document.
///
/// Comparison is deep equality over the parsed values, so formatting and
/// key order in the raw body do not matter.
///
/// # Errors
///
/// Returns a verification error carrying both documents on mismatch.
pub async fn check_http_body(url: &str, expected: &Value) -> Result<()> {
    let actual = fetch_json(url).await?;
    if actual == *expected {
        tracing::debug!(url, "HTTP body matches expected document");
        Ok(())
    } else {
        Err(ShipshapeError::Verification {
            check: "HTTP body",
            expected: expected.to_string(),
            actual: actual.to_string(),
        })
    }
}
