//! Handle for a live container and its lifecycle operations.

use bollard::Docker;
use bollard::container::{
    InspectContainerOptions, RemoveContainerOptions, StartContainerOptions, StopContainerOptions,
};
use bollard::models::ContainerStateStatusEnum;
use shipshape_common::error::{Result, ShipshapeError};
use shipshape_common::types::{ContainerId, ContainerState};

use crate::exec::{self, ExecOutput};
use crate::logs;

/// Grace period the daemon gives the main process before a kill.
const STOP_TIMEOUT_SECS: i64 = 10;

/// Live reference to a container created by the engine.
///
/// The handle is the exclusive owner of the daemon-side container: exactly
/// one handle exists per `run`, and [`ContainerHandle::remove`] consumes it
/// when the flow is done. Dropping a handle without removing it leaves the
/// container behind and logs a warning, because the leaked name and port
/// would collide with a later run that reuses them.
pub struct ContainerHandle {
    docker: Docker,
    id: ContainerId,
    name: String,
    host_port: u16,
    removed: bool,
}

impl ContainerHandle {
    pub(crate) fn new(
        docker: Docker,
        id: ContainerId,
        name: String,
        host_port: u16,
    ) -> Self {
        Self {
            docker,
            id,
            name,
            host_port,
            removed: false,
        }
    }

    /// Returns the daemon-assigned container ID.
    #[must_use]
    pub const fn id(&self) -> &ContainerId {
        &self.id
    }

    /// Returns the container name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the loopback host port the container port is published on.
    #[must_use]
    pub const fn host_port(&self) -> u16 {
        self.host_port
    }

    /// Returns the base URL of the container's exposed HTTP surface.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.host_port)
    }

    /// Stops the running container.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon cannot stop the container.
    pub async fn stop(&self) -> Result<()> {
        self.docker
            .stop_container(
                &self.name,
                Some(StopContainerOptions {
                    t: STOP_TIMEOUT_SECS,
                }),
            )
            .await
            .map_err(|e| ShipshapeError::Daemon {
                operation: "container stop",
                message: e.to_string(),
            })?;
        tracing::info!(name = %self.name, "container stopped");
        Ok(())
    }

    /// Starts a stopped container again.
    ///
    /// Name, identity, and configuration are preserved across a
    /// stop/start cycle.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon cannot start the container.
    pub async fn start(&self) -> Result<()> {
        self.docker
            .start_container(&self.name, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| ShipshapeError::Daemon {
                operation: "container start",
                message: e.to_string(),
            })?;
        tracing::info!(name = %self.name, "container started");
        Ok(())
    }

    /// Returns the container's current lifecycle state.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon cannot inspect the container.
    pub async fn state(&self) -> Result<ContainerState> {
        let info = self
            .docker
            .inspect_container(&self.name, None::<InspectContainerOptions>)
            .await
            .map_err(|e| ShipshapeError::Daemon {
                operation: "container inspect",
                message: e.to_string(),
            })?;
        Ok(map_status(info.state.and_then(|s| s.status)))
    }

    /// Runs a one-shot command inside the running container.
    ///
    /// # Errors
    ///
    /// Returns an error if the container is not running or the exec
    /// plumbing fails; the command's own exit code is returned in the
    /// output for the caller to assert on.
    pub async fn exec(&self, command: &[&str]) -> Result<ExecOutput> {
        exec::exec_in_container(&self.docker, &self.name, command).await
    }

    /// Returns the accumulated stdout/stderr text of the container.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon cannot deliver the log stream.
    pub async fn logs(&self) -> Result<String> {
        logs::collect_logs(&self.docker, &self.name).await
    }

    /// Force-removes the container, consuming the handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon cannot remove the container; the
    /// handle is dropped either way and the drop-time warning fires only
    /// when removal did not go through.
    pub async fn remove(mut self) -> Result<()> {
        self.docker
            .remove_container(
                &self.name,
                Some(RemoveContainerOptions {
                    force: true,
                    ..Default::default()
                }),
            )
            .await
            .map_err(|e| ShipshapeError::Daemon {
                operation: "container remove",
                message: e.to_string(),
            })?;
        self.removed = true;
        tracing::info!(name = %self.name, "container removed");
        Ok(())
    }
}

impl Drop for ContainerHandle {
    fn drop(&mut self) {
        if !self.removed {
            tracing::warn!(
                name = %self.name,
                "container handle dropped without removal; name and port stay occupied"
            );
        }
    }
}

/// Maps the daemon's inspect status onto the harness lifecycle state.
fn map_status(status: Option<ContainerStateStatusEnum>) -> ContainerState {
    match status {
        Some(ContainerStateStatusEnum::CREATED) => ContainerState::Created,
        Some(ContainerStateStatusEnum::RUNNING | ContainerStateStatusEnum::RESTARTING) => {
            ContainerState::Running
        }
        Some(
            ContainerStateStatusEnum::PAUSED
            | ContainerStateStatusEnum::EXITED
            | ContainerStateStatusEnum::REMOVING,
        ) => ContainerState::Stopped,
        Some(ContainerStateStatusEnum::DEAD | ContainerStateStatusEnum::EMPTY) | None => {
            ContainerState::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn running_and_restarting_map_to_running() {
        assert_eq!(
            map_status(Some(ContainerStateStatusEnum::RUNNING)),
            ContainerState::Running
        );
        assert_eq!(
            map_status(Some(ContainerStateStatusEnum::RESTARTING)),
            ContainerState::Running
        );
    }

    #[test]
    fn exited_maps_to_stopped() {
        assert_eq!(
            map_status(Some(ContainerStateStatusEnum::EXITED)),
            ContainerState::Stopped
        );
    }

    #[test]
    fn unknown_status_maps_to_failed() {
        assert_eq!(map_status(None), ContainerState::Failed);
        assert_eq!(
            map_status(Some(ContainerStateStatusEnum::DEAD)),
            ContainerState::Failed
        );
    }

    #[test]
    fn base_url_targets_loopback_host_port() {
        let handle = ContainerHandle::new(
            Docker::connect_with_local_defaults().expect("client"),
            ContainerId::new("abc123"),
            "shipshape-test-deadbeef".to_string(),
            8000,
        );
        assert_eq!(handle.base_url(), "http://127.0.0.1:8000");
        assert_eq!(handle.host_port(), 8000);
        assert_eq!(handle.id().as_str(), "abc123");
    }
}
