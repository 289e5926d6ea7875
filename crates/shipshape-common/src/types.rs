//! Domain primitive types used across the shipshape workspace.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// CPU/platform variant selector for a multi-arch image build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetArchitecture {
    /// 64-bit x86 (`linux/amd64`).
    Amd64,
    /// 64-bit ARM v8 (`linux/arm64/v8`).
    Arm64V8,
}

impl TargetArchitecture {
    /// All architectures the harness parametrizes over.
    pub const ALL: &'static [Self] = &[Self::Amd64, Self::Arm64V8];

    /// Returns the platform string understood by the image builder.
    #[must_use]
    pub const fn platform(self) -> &'static str {
        match self {
            Self::Amd64 => "linux/amd64",
            Self::Arm64V8 => "linux/arm64/v8",
        }
    }

    /// Returns a short slug suitable for use inside an image tag.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Amd64 => "amd64",
            Self::Arm64V8 => "arm64v8",
        }
    }
}

impl fmt::Display for TargetArchitecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.platform())
    }
}

impl FromStr for TargetArchitecture {
    type Err = crate::error::ShipshapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "linux/amd64" | "amd64" => Ok(Self::Amd64),
            "linux/arm64/v8" | "arm64v8" => Ok(Self::Arm64V8),
            other => Err(crate::error::ShipshapeError::Config {
                message: format!("unsupported target architecture: {other}"),
            }),
        }
    }
}

/// Multi-stage build target of the application image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildStage {
    /// Development stage: source watching and worker reload enabled.
    DevelopmentImage,
    /// Production stage with JSON-structured logging.
    ProductionImageJsonLogging,
}

impl BuildStage {
    /// Returns the stage name as passed to the image builder.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DevelopmentImage => "development-image",
            Self::ProductionImageJsonLogging => "production-image-json-logging",
        }
    }
}

impl fmt::Display for BuildStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Tag string identifying a built image.
///
/// Produced by the builder adapter, consumed when running containers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageReference(String);

impl ImageReference {
    /// Creates an image reference from a tag string.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    /// Returns the inner tag string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for a container instance, assigned by the daemon.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Lifecycle state of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContainerState {
    /// Container has been created but not yet started.
    Created,
    /// Container is actively running.
    Running,
    /// Container has been stopped.
    Stopped,
    /// Container encountered a fatal error.
    Failed,
}

impl fmt::Display for ContainerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Running => write!(f, "running"),
            Self::Stopped => write!(f, "stopped"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A single value extracted from the server configuration artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// An integer option value.
    Num(i64),
    /// Any value that does not parse as an integer.
    Str(String),
}

impl ConfigValue {
    /// Parses a raw artifact token, preferring the numeric form.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        raw.parse::<i64>()
            .map_or_else(|_| Self::Str(raw.to_string()), Self::Num)
    }
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Str(s) => write!(f, "{s}"),
        }
    }
}

/// Read-only snapshot of the server configuration inside a container.
///
/// Options the server was not started with are simply absent; absence is a
/// valid "not set" state, not an error.
pub type ConfigMapping = BTreeMap<String, ConfigValue>;
