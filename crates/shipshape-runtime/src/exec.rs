//! One-shot command execution inside a running container.

use bollard::Docker;
use bollard::container::LogOutput;
use bollard::exec::{CreateExecOptions, StartExecResults};
use futures_util::StreamExt;
use shipshape_common::error::{Result, ShipshapeError};

/// Output from an exec command.
#[derive(Debug, Clone)]
pub struct ExecOutput {
    /// Standard output from the command.
    pub stdout: String,
    /// Standard error from the command.
    pub stderr: String,
    /// Exit code returned by the command.
    pub exit_code: i64,
}

/// Runs a command inside a running container and waits for its result.
///
/// # Errors
///
/// Returns an error if the command is empty or any daemon call fails.
/// A non-zero exit code is not an error here; it is reported in the
/// returned [`ExecOutput`] for the caller to assert on.
pub async fn exec_in_container(
    docker: &Docker,
    container: &str,
    command: &[&str],
) -> Result<ExecOutput> {
    if command.is_empty() {
        return Err(ShipshapeError::Config {
            message: "exec command is empty".into(),
        });
    }
    tracing::info!(container, cmd = ?command, "exec into container");

    let exec = docker
        .create_exec(
            container,
            CreateExecOptions {
                attach_stdout: Some(true),
                attach_stderr: Some(true),
                cmd: Some(command.iter().map(ToString::to_string).collect()),
                ..Default::default()
            },
        )
        .await
        .map_err(|e| ShipshapeError::Daemon {
            operation: "exec create",
            message: e.to_string(),
        })?;

    let mut stdout = String::new();
    let mut stderr = String::new();
    let results = docker
        .start_exec(&exec.id, None)
        .await
        .map_err(|e| ShipshapeError::Daemon {
            operation: "exec start",
            message: e.to_string(),
        })?;
    if let StartExecResults::Attached { mut output, .. } = results {
        while let Some(chunk) = output.next().await {
            let chunk = chunk.map_err(|e| ShipshapeError::Daemon {
                operation: "exec output",
                message: e.to_string(),
            })?;
            match chunk {
                LogOutput::StdOut { message } => {
                    stdout.push_str(&String::from_utf8_lossy(&message));
                }
                LogOutput::StdErr { message } => {
                    stderr.push_str(&String::from_utf8_lossy(&message));
                }
                LogOutput::StdIn { .. } | LogOutput::Console { .. } => {}
            }
        }
    }

    let inspect = docker
        .inspect_exec(&exec.id)
        .await
        .map_err(|e| ShipshapeError::Daemon {
            operation: "exec inspect",
            message: e.to_string(),
        })?;
    let exit_code = inspect.exit_code.unwrap_or(-1);
    tracing::debug!(container, exit_code, "exec finished");

    Ok(ExecOutput {
        stdout,
        stderr,
        exit_code,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn empty_command_is_rejected_before_any_daemon_call() {
        let docker = Docker::connect_with_local_defaults().expect("client");
        let err = exec_in_container(&docker, "whatever", &[])
            .await
            .expect_err("empty command should fail");
        assert!(matches!(err, ShipshapeError::Config { .. }));
    }
}
