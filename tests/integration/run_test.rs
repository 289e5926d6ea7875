//! Integration tests for container lifecycle and verification.
//!
//! These tests are implemented in:
//! `crates/shipshape-verify/tests/json_logging_test.rs` and
//! `crates/shipshape-verify/tests/worker_reload_test.rs`.
//!
//! Covered scenarios:
//! - `default_configuration_survives_restart`: HTTP body, extracted server
//!   config (including the absent `reload` key), stop/start idempotence,
//!   and the structured startup log line
//! - `worker_reloads_on_source_change`: Three touches of the watched source
//!   file, each producing a reload warning in the logs
//! - `probe_succeeds_once_the_server_answers` / `probe_times_out_when_nothing_listens`:
//!   Readiness probe behavior without a daemon
