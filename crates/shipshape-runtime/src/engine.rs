//! Runtime engine that connects to the daemon and launches containers.

use std::collections::HashMap;

use bollard::Docker;
use bollard::container::{Config, CreateContainerOptions, StartContainerOptions};
use bollard::models::{HostConfig, PortBinding};
use shipshape_common::error::{Result, ShipshapeError};
use shipshape_common::types::{ContainerId, ImageReference};

use crate::container::ContainerHandle;

/// A single container-port to host-port binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PortMapping {
    /// Port the server listens on inside the container.
    pub container_port: u16,
    /// Host port the container port is published on.
    pub host_port: u16,
}

impl PortMapping {
    /// Creates a port mapping.
    #[must_use]
    pub const fn new(container_port: u16, host_port: u16) -> Self {
        Self {
            container_port,
            host_port,
        }
    }
}

/// Entry point for all daemon interaction.
///
/// Holds the daemon client; image builds borrow it via [`Engine::docker`],
/// lifecycle operations go through [`Engine::run`] and the returned
/// [`ContainerHandle`].
#[derive(Clone)]
pub struct Engine {
    docker: Docker,
}

impl Engine {
    /// Connects to the local container-runtime daemon.
    ///
    /// # Errors
    ///
    /// Returns an error if no daemon socket can be resolved from the
    /// environment.
    pub fn connect() -> Result<Self> {
        let docker = Docker::connect_with_local_defaults().map_err(|e| ShipshapeError::Daemon {
            operation: "connect",
            message: e.to_string(),
        })?;
        Ok(Self { docker })
    }

    /// Verifies the daemon is reachable.
    ///
    /// # Errors
    ///
    /// Returns an error if the daemon does not answer the ping.
    pub async fn ping(&self) -> Result<()> {
        let _ = self
            .docker
            .ping()
            .await
            .map_err(|e| ShipshapeError::Daemon {
                operation: "ping",
                message: e.to_string(),
            })?;
        Ok(())
    }

    /// Returns the underlying daemon client.
    #[must_use]
    pub const fn docker(&self) -> &Docker {
        &self.docker
    }

    /// Creates and starts a detached, named container from a built image,
    /// publishing the container port on the loopback host port.
    ///
    /// # Errors
    ///
    /// Returns an error if a container with the same name already exists,
    /// the host port is already bound, or any daemon call fails. All of
    /// these are terminal; there is no retry.
    pub async fn run(
        &self,
        image: &ImageReference,
        name: &str,
        ports: PortMapping,
    ) -> Result<ContainerHandle> {
        tracing::info!(
            image = %image,
            name,
            container_port = ports.container_port,
            host_port = ports.host_port,
            "running container"
        );

        let exposed_port = format!("{}/tcp", ports.container_port);
        let mut port_bindings = HashMap::new();
        let _ = port_bindings.insert(
            exposed_port.clone(),
            Some(vec![PortBinding {
                host_ip: Some("127.0.0.1".to_string()),
                host_port: Some(ports.host_port.to_string()),
            }]),
        );
        let mut exposed_ports = HashMap::new();
        let _ = exposed_ports.insert(exposed_port, HashMap::new());

        let config = Config {
            image: Some(image.as_str().to_string()),
            exposed_ports: Some(exposed_ports),
            host_config: Some(HostConfig {
                port_bindings: Some(port_bindings),
                ..Default::default()
            }),
            ..Default::default()
        };
        let options = CreateContainerOptions {
            name: name.to_string(),
            platform: None,
        };

        let created = self
            .docker
            .create_container(Some(options), config)
            .await
            .map_err(|e| ShipshapeError::Daemon {
                operation: "container create",
                message: e.to_string(),
            })?;
        for warning in &created.warnings {
            tracing::warn!(name, warning, "daemon warning on create");
        }

        self.docker
            .start_container(name, None::<StartContainerOptions<String>>)
            .await
            .map_err(|e| ShipshapeError::Daemon {
                operation: "container start",
                message: e.to_string(),
            })?;
        tracing::info!(id = %created.id, name, "container started");

        Ok(ContainerHandle::new(
            self.docker.clone(),
            ContainerId::new(created.id),
            name.to_string(),
            ports.host_port,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_mapping_stores_both_sides() {
        let mapping = PortMapping::new(80, 8000);
        assert_eq!(mapping.container_port, 80);
        assert_eq!(mapping.host_port, 8000);
    }

    #[test]
    fn connect_resolves_a_daemon_socket() {
        // Connection is lazy; this only verifies socket resolution.
        let engine = Engine::connect();
        assert!(engine.is_ok());
    }
}
