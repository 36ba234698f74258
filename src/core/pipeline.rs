//! End-to-end matrix pipeline
//!
//! [`PipelineInputs`] carries every value the pipeline reads from its
//! environment. It is built once at the CLI boundary and passed into
//! [`run`], which performs the whole resolution pass without touching the
//! environment itself.

use std::path::PathBuf;

use crate::config::defaults::{DEFAULT_VERSION_FILE, DEFAULT_WORKSPACE};
use crate::core::descriptor::{self, VersionDefaults};
use crate::core::matrix::{self, Assembly, DuplicatePolicy};
use crate::error::{BuildMatrixError, MatrixError};

/// Inputs for one pipeline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineInputs {
    /// Root that version file paths are relative to
    pub workspace: PathBuf,
    /// JSON list of app entries (takes precedence over `app_names`)
    pub app_matrix: Option<String>,
    /// JSON list of bare app names
    pub app_names: Option<String>,
    /// JSON list or scalar of init units
    pub init_units: Option<String>,
    /// Fallbacks for version resolution
    pub defaults: VersionDefaults,
    /// Duplicate name handling
    pub duplicates: DuplicatePolicy,
}

impl Default for PipelineInputs {
    fn default() -> Self {
        Self {
            workspace: PathBuf::from(DEFAULT_WORKSPACE),
            app_matrix: None,
            app_names: None,
            init_units: None,
            defaults: VersionDefaults::default(),
            duplicates: DuplicatePolicy::default(),
        }
    }
}

impl PipelineInputs {
    /// Set the default version file; blank values fall back to `./package.json`
    pub fn with_default_version_file(mut self, file: Option<&str>) -> Self {
        self.defaults.version_file = file
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(DEFAULT_VERSION_FILE)
            .to_string();
        self
    }

    /// Set the default version key; blank values mean "no key"
    pub fn with_default_version_key(mut self, key: Option<&str>) -> Self {
        self.defaults.version_key = key
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string);
        self
    }

    /// Raw app input to use: `app_matrix` if set, else `app_names`
    pub fn raw_apps(&self) -> Option<&str> {
        non_blank(self.app_matrix.as_deref()).or_else(|| non_blank(self.app_names.as_deref()))
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

/// Run one full resolution pass
///
/// Parses the app list, fails if it is empty, resolves every version, then
/// assembles the matrix. Nothing is written; callers emit
/// [`Assembly::outputs`] only after this succeeds.
pub fn run(inputs: &PipelineInputs) -> Result<Assembly, BuildMatrixError> {
    let entries = descriptor::parse_entries(inputs.raw_apps())?;
    if entries.is_empty() {
        return Err(MatrixError::NoApplications.into());
    }
    tracing::info!(
        "Resolving versions for {} apps in {}",
        entries.len(),
        inputs.workspace.display()
    );

    let apps = descriptor::normalize(entries, &inputs.defaults, &inputs.workspace)?;
    let init_units = matrix::load_init_units(inputs.init_units.as_deref());

    Ok(matrix::assemble(apps, init_units, inputs.duplicates)?)
}
