//! Library side of the `mapstamp` command-line tool
//!
//! The binary parses a [`Cli`], sets up logging and hands over to [`run`].
//! Command results go to the given writer; diagnostics go through `tracing`
//! to stderr.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use config::{Cli, Commands, LogLevel};
pub use error::CliError;
pub use output::OutputFormat;

use std::io::Write;
use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber
///
/// `RUST_LOG` overrides `level` when set.
pub fn init_logging(level: LogLevel) {
    let default = tracing::Level::from(level).to_string().to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Run the selected command, writing results to `out`
pub fn run<W: Write>(cli: &Cli, out: &mut W) -> anyhow::Result<()> {
    commands::dispatch(&cli.command, cli.format, out)
}
