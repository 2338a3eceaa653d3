//! dirmirror integration testing support
//!
//! This crate hosts the end-to-end tests for the mirror engine together with
//! the fixtures they share: declarative tree specs, tree snapshots and
//! filesystem wrappers that reorder listings or inject failures.

#![warn(missing_docs)]
#![warn(clippy::all)]

/// Unified test utilities
///
/// Builders and inspectors for on-disk directory trees used across the
/// integration tests.
pub mod test_utils;
