//! Apps command implementation
//!
//! Implements `buildmatrix apps`: validates raw app input and re-emits it
//! with null fields removed, without resolving versions, for workflows that
//! only need the app list.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::PathBuf;

use crate::core::descriptor;
use crate::infra::output::OutputSink;

/// Execute the apps command
pub fn execute(raw: Option<&str>, output: Option<PathBuf>) -> Result<()> {
    let entries = descriptor::passthrough_entries(descriptor::parse_values(raw))
        .context("Invalid app list")?;
    let names: Vec<&Value> = entries.iter().filter_map(|e| e.get("name")).collect();
    tracing::info!("Parsed {} app entries", entries.len());

    let pairs = vec![
        ("app_names".to_string(), serde_json::to_string(&names)?),
        ("app_matrix".to_string(), serde_json::to_string(&entries)?),
    ];

    OutputSink::from_path(output)
        .write(&pairs)
        .context("Failed to write outputs")
}
