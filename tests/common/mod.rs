//! Common test utilities and helpers
//!
//! This module provides shared functionality for integration tests:
//! - A configured `oobee` command pointed at a temporary project
//! - Fixture helpers that record scans through the CLI
//!
//! # Usage
//!
//! ```rust,no_run
//! mod common;
//! use common::fixtures::TestProject;
//!
//! fn test_compare() {
//!     let project = TestProject::new();
//!     project.add_snapshot("jan", 8, 12, 15, 67);
//!     project.cmd().args(["snapshot", "list"]).assert().success();
//! }
//! ```

pub mod fixtures;

/// Check if running in CI environment
#[allow(dead_code)]
pub fn is_ci() -> bool {
    std::env::var("CI").is_ok() || std::env::var("GITHUB_ACTIONS").is_ok()
}
