//! # shipshape-common
//!
//! Shared types, error definitions, and expected fixtures used across the
//! entire shipshape workspace.
//!
//! This crate is the leaf of the dependency graph: it depends on no other
//! internal crate and provides the foundational primitives that all other
//! crates build upon.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod error;
pub mod fixtures;
pub mod types;
