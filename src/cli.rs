use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "fxpipe",
    version,
    about = "Applies named effects to an audio or video file through ffmpeg.",
    long_about = None
)]
pub struct Args {
    /// Input media file.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Effect directive string, e.g. "speed=1.5,contrast=2,hflip".
    /// Directives separate on ',' (or '|' when no comma is present).
    pub directives: String,

    /// Output file.
    pub output: PathBuf,

    /// Show composed commands and raw engine output.
    #[arg(short, long)]
    pub verbose: bool,

    /// Directory holding sound-effect samples for the sfx directive.
    #[arg(long, default_value = "sfx")]
    pub sfx_library: PathBuf,

    /// Keep intermediate files after the run (debugging aid).
    #[arg(long)]
    pub keep_temp: bool,
}
