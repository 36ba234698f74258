//! CLI command implementations
//!
//! Each command is implemented in its own submodule.

pub mod apps;
pub mod extract;
pub mod matrix;

use std::path::PathBuf;

use anyhow::Result;
use clap::Subcommand;

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolve versions and write the build matrix outputs
    Matrix(matrix::MatrixArgs),

    /// Print the version stored in a JSON or TOML file
    Extract {
        /// Path to the file containing the version value
        #[arg(short, long)]
        file: PathBuf,

        /// Dot-delimited path to the version entry
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Normalize app entries and write app_names/app_matrix outputs
    Apps {
        /// App entries: JSON list of mappings or names, or a single name
        #[arg(long, env = "APP_NAMES")]
        apps: Option<String>,

        /// Output file (stdout if not set)
        #[arg(short, long, env = "GITHUB_OUTPUT")]
        output: Option<PathBuf>,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        match self {
            Self::Matrix(args) => matrix::execute(args),
            Self::Extract { file, key } => extract::execute(&file, key.as_deref()),
            Self::Apps { apps, output } => apps::execute(apps.as_deref(), output),
        }
    }
}
