//! Scoped allocation of per-test container names and host ports.
//!
//! The container name and the published host port are exclusive resources:
//! two flows holding the same pair cannot run at once. Allocating a unique
//! name and a free ephemeral port per flow lets parametrized cases run
//! concurrently without colliding on the fixed defaults.

use std::net::TcpListener;

use shipshape_common::error::{Result, ShipshapeError};
use shipshape_common::fixtures::CONTAINER_NAME_PREFIX;

/// The exclusive per-flow resources: a container name and a host port.
#[derive(Debug, Clone)]
pub struct TestResources {
    /// Unique container name for this flow.
    pub container_name: String,
    /// Free loopback port to publish the container port on.
    pub host_port: u16,
}

impl TestResources {
    /// Allocates a unique container name and a free host port.
    ///
    /// # Errors
    ///
    /// Returns an error if no ephemeral port can be bound.
    pub fn allocate() -> Result<Self> {
        Self::allocate_with_prefix(CONTAINER_NAME_PREFIX)
    }

    /// Allocates with a custom container-name prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if no ephemeral port can be bound.
    pub fn allocate_with_prefix(prefix: &str) -> Result<Self> {
        let container_name = unique_name(prefix);
        let host_port = free_host_port()?;
        tracing::debug!(container_name, host_port, "test resources allocated");
        Ok(Self {
            container_name,
            host_port,
        })
    }
}

/// Generates a container name unique to this flow.
#[must_use]
pub fn unique_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("{prefix}-{}", &id[..12])
}

/// Finds a free loopback port by binding an ephemeral one and releasing it.
///
/// The port is only reserved while the listener is held, so a small race
/// window with other processes remains; a lost race surfaces as a port
/// conflict when the container starts.
///
/// # Errors
///
/// Returns an error if binding the ephemeral port fails.
pub fn free_host_port() -> Result<u16> {
    let listener =
        TcpListener::bind(("127.0.0.1", 0)).map_err(|e| ShipshapeError::Io {
            path: "127.0.0.1:0".into(),
            source: e,
        })?;
    let port = listener
        .local_addr()
        .map_err(|e| ShipshapeError::Io {
            path: "127.0.0.1:0".into(),
            source: e,
        })?
        .port();
    Ok(port)
}
