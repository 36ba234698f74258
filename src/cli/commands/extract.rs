//! Extract command implementation
//!
//! Implements `buildmatrix extract` to print a single version value.

use anyhow::{Context, Result};
use std::path::Path;

use crate::core::version;

/// Execute the extract command
pub fn execute(file: &Path, key: Option<&str>) -> Result<()> {
    tracing::info!("Extracting version from {}", file.display());

    let version = version::resolve(file, key).context("Failed to locate version value")?;
    println!("{version}");
    Ok(())
}
