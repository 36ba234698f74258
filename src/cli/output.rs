//! Diagnostics and log setup
//!
//! Step outputs are written through [`crate::infra::output`]; this module
//! only handles what the operator sees on stderr.

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Status message prefixes
pub mod status {
    /// Success prefix (green checkmark)
    pub const SUCCESS: &str = "✓";

    /// Error prefix (red X)
    pub const ERROR: &str = "✗";
}

/// Log level for the given verbosity flags
pub fn log_level(verbose: u8, quiet: bool) -> Level {
    if quiet {
        return Level::ERROR;
    }
    match verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    }
}

/// Log filter: `RUST_LOG` if set, otherwise derived from the flags
pub fn log_filter(verbose: u8, quiet: bool) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_level(verbose, quiet).as_str()))
}

/// Print an error and its causes to stderr
pub fn display_error(error: &anyhow::Error) {
    eprintln!("{} Error: {error}", status::ERROR);
    for cause in error.chain().skip(1) {
        eprintln!("  caused by: {cause}");
    }
}
