//! Command line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Location-based reminders in the terminal.
#[derive(Debug, Default, Parser)]
#[command(name = "waypost", version, about)]
pub struct Args {
    /// Base URL of the place/user API (overrides the settings file).
    #[arg(long, value_name = "URL")]
    pub server_url: Option<String>,

    /// File holding the current position as `lat,lon`, re-read continuously.
    #[arg(long, value_name = "FILE")]
    pub coords_file: Option<PathBuf>,

    /// Session store path (defaults to the config directory).
    #[arg(long, value_name = "FILE")]
    pub session_file: Option<PathBuf>,
}
