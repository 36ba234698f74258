//! Buildmatrix CLI
//!
//! Entry point for the buildmatrix command-line application.

use clap::Parser;

use buildmatrix::cli::output::{display_error, log_filter};
use buildmatrix::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(cli.verbose, cli.quiet))
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli.run() {
        display_error(&e);
        std::process::exit(1);
    }
}
