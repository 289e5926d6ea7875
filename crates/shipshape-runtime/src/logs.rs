//! Container log retrieval.
//!
//! The harness only ever needs the full accumulated stdout/stderr text of
//! a container; splitting, JSON parsing, and substring checks happen in
//! the verification layer.

use bollard::Docker;
use bollard::container::{LogOutput, LogsOptions};
use futures_util::StreamExt;
use shipshape_common::error::{Result, ShipshapeError};

/// Collects the full stdout and stderr of a container since it started.
///
/// # Errors
///
/// Returns an error if the daemon cannot deliver the log stream.
pub async fn collect_logs(docker: &Docker, container: &str) -> Result<String> {
    let options = LogsOptions::<String> {
        stdout: true,
        stderr: true,
        tail: "all".to_string(),
        ..Default::default()
    };

    let mut stream = docker.logs(container, Some(options));
    let mut collected = String::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| ShipshapeError::Daemon {
            operation: "log retrieval",
            message: e.to_string(),
        })?;
        match chunk {
            LogOutput::StdOut { message }
            | LogOutput::StdErr { message }
            | LogOutput::Console { message } => {
                collected.push_str(&String::from_utf8_lossy(&message));
            }
            LogOutput::StdIn { .. } => {}
        }
    }

    tracing::debug!(container, bytes = collected.len(), "logs collected");
    Ok(collected)
}
