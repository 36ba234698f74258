//! Buildmatrix - build/deploy matrix generator for multi-app release pipelines
//!
//! This library resolves each application's version from a JSON or TOML
//! manifest, normalizes partially specified application descriptors, and
//! assembles the matrices and release flags consumed by CI workflows.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`cli`] - Command-line interface parsing and diagnostics
//! - [`core`] - Resolution and assembly logic
//! - [`infra`] - Infrastructure layer (file reads, output sink)
//! - [`config`] - Configuration constants
//! - [`error`] - Error types and handling

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod infra;

#[cfg(test)]
pub mod test_utils;
