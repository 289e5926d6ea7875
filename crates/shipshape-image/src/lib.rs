//! # shipshape-image
//!
//! Image builder adapter for the shipshape harness.
//!
//! Handles:
//! - **Context**: packing a build-context directory into a gzipped tar
//!   stream for the daemon's build endpoint.
//! - **Builder**: configuring and running a multi-stage, multi-arch build
//!   and returning the resulting tagged image reference.
//!
//! Build failures are terminal: any error reported on the daemon's build
//! stream is surfaced to the caller unchanged, with no local recovery.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod builder;
pub mod context;
