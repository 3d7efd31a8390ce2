//! Command-line argument definitions.

use std::path::PathBuf;

use clap::Parser;

/// Computer club day replay.
///
/// Reads a club log (header plus one event per line), narrates how the club
/// handled every event and prints per-table revenue and occupied time.
#[derive(Debug, Parser)]
#[command(name = "club", version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose diagnostics on stderr.
    #[arg(short, long)]
    pub verbose: bool,

    /// Path to the club log.
    pub input: PathBuf,
}
