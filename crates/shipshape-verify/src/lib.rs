//! # shipshape-verify
//!
//! Verification routines for the shipshape harness.
//!
//! Handles:
//! - **HTTP**: fetching the exposed endpoint and comparing the JSON body
//!   against the expected fixture document.
//! - **Server config**: extracting the generated configuration artifact
//!   from inside a running container and parsing it into a mapping.
//! - **Logs**: structured (JSON) log-line field checks and literal
//!   substring checks over the accumulated log text.
//!
//! Every check is all-or-nothing: a mismatch produces an error carrying
//! both the expected and the observed value, and the flow that hit it
//! aborts. The daemon-backed end-to-end flows live under `tests/`.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod http;
pub mod logs;
pub mod server_config;
