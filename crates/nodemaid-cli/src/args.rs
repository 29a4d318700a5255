//! Command-line argument definitions for the Nodemaid CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the scene snapshot, the output path and
//! format, the configuration file, and logging verbosity.

use clap::Parser;

use nodemaid_core::format::ExportFormat;

/// Command-line arguments for the Nodemaid exporter
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the scene snapshot (JSON)
    #[arg(help = "Path to the scene snapshot")]
    pub input: String,

    /// Path of the exported file; the format's extension is appended if missing
    #[arg(short, long, default_value = "graph")]
    pub output: String,

    /// Output format (md, html); defaults to the configured format
    #[arg(short, long)]
    pub format: Option<ExportFormat>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
