//! Integration test suite for promptctl
//!
//! End-to-end tests that run the `promptctl` binary against templates written
//! to temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **parse**: `parse` command output in text and JSON
//! - **render**: value layering, toggles, stdin and output files
//! - **controls**: distinct controls across templates and globs
//! - **check**: lint diagnostics and `--strict`
//! - **config**: global configuration management
//! - **error_scenarios**: user-facing errors and exit codes

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod check;
mod config;
mod error_scenarios;
mod parse;
mod render;
