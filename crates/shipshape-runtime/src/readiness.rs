//! Readiness probing with bounded retries and exponential backoff.
//!
//! A freshly started container needs a moment before its server accepts
//! connections. Instead of a fixed sleep, the probe issues GET requests
//! against the exposed endpoint until one gets any HTTP response, backing
//! off exponentially between attempts up to a cap. Exhausting the attempt
//! budget is a terminal timeout error.

use std::time::Duration;

use shipshape_common::error::{Result, ShipshapeError};

/// Retry budget and backoff shape of a readiness probe.
#[derive(Debug, Clone)]
pub struct ReadinessPolicy {
    /// Maximum number of probe attempts before giving up.
    pub max_attempts: u32,
    /// Delay after the first failed attempt; doubles per attempt.
    pub initial_delay: Duration,
    /// Upper bound on the per-attempt delay.
    pub max_delay: Duration,
}

impl Default for ReadinessPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 8,
            initial_delay: Duration::from_millis(250),
            max_delay: Duration::from_secs(5),
        }
    }
}

/// Returns the backoff delay after the given zero-based attempt.
#[must_use]
pub fn delay_for_attempt(policy: &ReadinessPolicy, attempt: u32) -> Duration {
    let factor = 2u32.saturating_pow(attempt);
    policy.initial_delay.saturating_mul(factor).min(policy.max_delay)
}

/// Probes the URL until the server responds or the policy is exhausted.
///
/// Any HTTP response counts as ready, whatever its status: the checks that
/// follow the probe assert on response content themselves.
///
/// # Errors
///
/// Returns [`ShipshapeError::Timeout`] if no attempt got a response.
pub async fn wait_until_ready(url: &str, policy: &ReadinessPolicy) -> Result<()> {
    let client = reqwest::Client::new();
    for attempt in 0..policy.max_attempts {
        match client.get(url).send().await {
            Ok(response) => {
                tracing::debug!(url, attempt, status = %response.status(), "endpoint ready");
                return Ok(());
            }
            Err(e) => {
                tracing::trace!(url, attempt, error = %e, "endpoint not ready yet");
            }
        }
        tokio::time::sleep(delay_for_attempt(policy, attempt)).await;
    }
    Err(ShipshapeError::Timeout {
        url: url.to_string(),
        attempts: policy.max_attempts,
    })
}
