//! Command-line configuration.
//!
//! Options can be given as arguments or through environment variables:
//!
//! - `--format` / `MAPSTAMP_FORMAT`
//! - `--log-level` / `MAPSTAMP_LOG` (`RUST_LOG` takes precedence when set)

use crate::output::OutputFormat;
use clap::{Parser, Subcommand, ValueEnum};
use mapstamp_checksum::MapId;
use std::path::PathBuf;
use tracing::Level;

/// Header length written by mkgmap
pub const DEFAULT_HEADER_LENGTH: u8 = 188;

/// Top-level command line.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "mapstamp",
    about = "Inspect, renumber and restamp Garmin IMG map containers",
    version,
    long_about = "Rewrites the map id of compiled Garmin .img containers in place, \
                  together with the map values checksum and the subfile names in the FAT."
)]
pub struct Cli {
    /// Output format
    #[arg(
        short = 'o',
        long,
        value_enum,
        global = true,
        env = "MAPSTAMP_FORMAT",
        default_value = "text"
    )]
    pub format: OutputFormat,

    /// Logging level
    #[arg(
        short,
        long,
        value_enum,
        global = true,
        env = "MAPSTAMP_LOG",
        default_value = "info"
    )]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Parse configuration from command-line arguments.
    #[must_use]
    pub fn from_args() -> Self {
        Self::parse()
    }
}

/// Subcommands.
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Show map id, map values and FAT entries of containers
    Show {
        /// Container files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Rename all subfiles to a map id and update the TRE header to match
    Rename {
        /// Container file
        file: PathBuf,
        /// New map id (up to 8 decimal digits)
        map_id: MapId,
    },

    /// Write a map id and its map values into the TRE header only
    SetId {
        /// Container file
        file: PathBuf,
        /// New map id (up to 8 decimal digits)
        map_id: MapId,
    },

    /// Move tile files named <slot:4><tile:4>.img into another slot
    Restamp {
        /// Target slot (0-9999)
        #[arg(short, long)]
        slot: u32,
        /// Tile files; files not following the naming scheme are skipped
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Compute the map values for a map id
    Checksum {
        /// Map id (up to 8 decimal digits)
        map_id: MapId,
        /// TRE header length
        #[arg(long, default_value_t = DEFAULT_HEADER_LENGTH)]
        header_length: u8,
    },

    /// Content fingerprint of a directory tree
    Fingerprint {
        /// Directory to fingerprint
        dir: PathBuf,
    },
}

/// Logging verbosity.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogLevel {
    /// Everything
    Trace,
    /// Patch details
    Debug,
    /// One line per change
    Info,
    /// Problems only
    Warn,
    /// Failures only
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}
