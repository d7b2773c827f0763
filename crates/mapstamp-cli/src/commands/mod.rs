//! Command implementations

pub mod checksum;
pub mod fingerprint;
pub mod patch;
pub mod restamp;
pub mod show;

use crate::config::Commands;
use crate::output::OutputFormat;
use std::io::Write;

/// Run one subcommand
pub fn dispatch<W: Write>(command: &Commands, format: OutputFormat, out: &mut W) -> anyhow::Result<()> {
    match command {
        Commands::Show { files } => show::handle(files, format, out),
        Commands::Rename { file, map_id } => patch::rename(file, *map_id, format, out),
        Commands::SetId { file, map_id } => patch::set_id(file, *map_id, format, out),
        Commands::Restamp { slot, files } => restamp::handle(*slot, files, format, out),
        Commands::Checksum {
            map_id,
            header_length,
        } => checksum::handle(*map_id, *header_length, format, out),
        Commands::Fingerprint { dir } => fingerprint::handle(dir, format, out),
    }
}
