use std::path::PathBuf;

use clap::Parser;

/// Video player with a custom control overlay.
#[derive(Debug, Parser)]
#[command(name = "overplay", version)]
pub struct Args {
    /// Media file to open. Falls back to a file picker when omitted.
    pub media: Option<PathBuf>,

    /// Initial volume in [0, 1].
    #[arg(long, default_value_t = 1.0)]
    pub volume: f64,
}
