//! Integration tests for the image build pipeline.
//!
//! These tests are implemented in:
//! `crates/shipshape-image/src/{context,builder}.rs` (unit level) and
//! `crates/shipshape-verify/tests/json_logging_test.rs` (daemon-backed).
//!
//! Covered scenarios:
//! - `pack_context_produces_gzip_stream`: Context directory packs to a gzip tar
//! - `packed_archive_contains_top_level_dockerfile`: Dockerfile lands at the archive root
//! - `tag_carries_stage_and_architecture_slug`: Tag scheme per stage/architecture
//! - `build_with_missing_context_fails_before_daemon_call`: Fail-fast on a bad context
//! - `default_configuration_survives_restart`: Full build of base + application images
