//! Unified error types for the shipshape workspace.
//!
//! Every failure in the harness is terminal for the flow that hit it: there
//! is no retry or recovery beyond the bounded readiness probe, so the
//! variants here carry enough context to diagnose the failure from the
//! test report alone.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum ShipshapeError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value or input is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// A required resource was not found.
    #[error("{kind} not found: {id}")]
    NotFound {
        /// Type of the missing resource.
        kind: &'static str,
        /// Identifier of the missing resource.
        id: String,
    },

    /// A container-runtime daemon call failed.
    #[error("container runtime {operation} failed: {message}")]
    Daemon {
        /// The daemon operation that failed.
        operation: &'static str,
        /// Error message reported by the daemon client.
        message: String,
    },

    /// The daemon reported an image build failure.
    #[error("image build failed: {message}")]
    Build {
        /// Error message from the build output stream.
        message: String,
    },

    /// An HTTP request against the container's exposed port failed.
    #[error("HTTP request to {url} failed: {message}")]
    Http {
        /// URL of the failed request.
        url: String,
        /// Underlying client error message.
        message: String,
    },

    /// An observed value did not match its expected fixture.
    #[error("{check} mismatch: expected {expected}, got {actual}")]
    Verification {
        /// Name of the check that failed.
        check: &'static str,
        /// Expected value, rendered for the failure report.
        expected: String,
        /// Observed value, rendered for the failure report.
        actual: String,
    },

    /// The readiness probe exhausted its attempts without a response.
    #[error("no response from {url} after {attempts} attempts")]
    Timeout {
        /// URL that was probed.
        url: String,
        /// Number of attempts made before giving up.
        attempts: u32,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, ShipshapeError>;
