//! Container lifecycle control for the shipshape harness.
//!
//! Wraps the container-runtime daemon behind a small lifecycle API:
//! run a named container with a port mapping, toggle it stopped/started,
//! exec one-shot commands, retrieve accumulated logs, and tear it down.
//!
//! Two redesigns over the sleep-and-hope style of readiness handling live
//! here as well: a bounded exponential-backoff readiness probe
//! ([`readiness`]) and scoped allocation of unique container names and
//! free host ports ([`resources`]).

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod container;
pub mod engine;
pub mod exec;
pub mod logs;
pub mod readiness;
pub mod resources;
