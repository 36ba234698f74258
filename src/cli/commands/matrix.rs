//! Matrix command implementation
//!
//! Implements `buildmatrix matrix`, the full pipeline pass. Every input can
//! come from a flag or from the environment variable the workflow sets.

use anyhow::{Context, Result};
use clap::builder::FalseyValueParser;
use clap::Args;
use std::path::PathBuf;

use crate::cli::output::status;
use crate::config::defaults::DEFAULT_WORKSPACE;
use crate::core::matrix::DuplicatePolicy;
use crate::core::pipeline::{self, PipelineInputs};
use crate::infra::output::OutputSink;

/// Arguments for `buildmatrix matrix`
#[derive(Args, Debug, Clone, Default)]
pub struct MatrixArgs {
    /// Workspace root that version file paths are relative to
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = DEFAULT_WORKSPACE)]
    pub workspace: PathBuf,

    /// JSON list of app entries (takes precedence over --app-names)
    #[arg(long, env = "APP_MATRIX")]
    pub app_matrix: Option<String>,

    /// JSON list of app names
    #[arg(long, env = "RAW_APP_NAMES")]
    pub app_names: Option<String>,

    /// JSON list (or single value) of init pods
    #[arg(long, env = "INIT_PODS")]
    pub init_pods: Option<String>,

    /// Version file used when an app sets none
    #[arg(long, env = "DEFAULT_VERSION_FILE")]
    pub default_version_file: Option<String>,

    /// Dotted key path used when an app sets none
    #[arg(long, env = "DEFAULT_VERSION_KEY")]
    pub default_version_key: Option<String>,

    /// Output file (stdout if not set)
    #[arg(short, long, env = "GITHUB_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Fail on repeated app names instead of letting the last one win
    #[arg(long, env = "STRICT_APP_NAMES", value_parser = FalseyValueParser::new())]
    pub strict: bool,
}

impl MatrixArgs {
    /// Build pipeline inputs from the parsed arguments
    pub fn to_inputs(&self) -> PipelineInputs {
        PipelineInputs {
            workspace: self.workspace.clone(),
            app_matrix: self.app_matrix.clone(),
            app_names: self.app_names.clone(),
            init_units: self.init_pods.clone(),
            duplicates: if self.strict {
                DuplicatePolicy::Reject
            } else {
                DuplicatePolicy::LastWins
            },
            ..PipelineInputs::default()
        }
        .with_default_version_file(self.default_version_file.as_deref())
        .with_default_version_key(self.default_version_key.as_deref())
    }
}

/// Execute the matrix command
pub fn execute(args: MatrixArgs) -> Result<()> {
    let inputs = args.to_inputs();
    let assembly = pipeline::run(&inputs).context("Failed to build matrix")?;
    let pairs = assembly.outputs()?;

    let sink = OutputSink::from_path(args.output);
    sink.write(&pairs).context("Failed to write outputs")?;

    if let OutputSink::File(path) = &sink {
        println!(
            "{} Wrote matrix for {} apps to {} (tag: {})",
            status::SUCCESS,
            assembly.apps.len(),
            path.display(),
            assembly.should_tag
        );
    }
    Ok(())
}
