use clap::Parser;
use std::path::PathBuf;

use recoda_core::AudioFormat;

#[derive(Parser)]
#[command(name = "recoda")]
#[command(author, version, about = "Convert audio files with FFmpeg")]
pub struct Cli {
    /// Input audio file to convert
    #[arg(required = true)]
    pub input: PathBuf,

    /// Target output format (mp3, wav, aac, ogg, flac)
    #[arg(short, long, default_value = "mp3")]
    pub format: AudioFormat,

    /// Target bitrate in kbit/s (non-numeric values fall back to 192)
    #[arg(short, long, default_value = "192")]
    pub bitrate: String,

    /// Directory for the converted file (defaults to the input's directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Path to the ffmpeg binary
    #[arg(long)]
    pub encoder: Option<PathBuf>,
}
