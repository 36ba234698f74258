//! Core business logic module
//!
//! This module contains the resolution and assembly logic. File reads go
//! through [`crate::infra`]; nothing here writes output.
//!
//! # Submodules
//!
//! - [`document`] - JSON/TOML document model
//! - [`version`] - Version resolution from structured files
//! - [`descriptor`] - Application descriptor parsing and normalization
//! - [`matrix`] - Build matrix assembly
//! - [`pipeline`] - Pipeline inputs and the end-to-end pass

pub mod descriptor;
pub mod document;
pub mod matrix;
pub mod pipeline;
pub mod version;
