use std::path::PathBuf;

use audiobatch_core::AudioFormat;
use clap::Parser;

/// Convert a batch of audio files with ffmpeg, one after another.
#[derive(Debug, Parser)]
#[command(name = "audiobatch", version, about)]
pub struct Args {
    /// Audio files to convert, processed in the given order
    pub files: Vec<PathBuf>,

    /// Folder receiving the converted files (created if missing)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Target format: mp3, wav, ogg, flac or m4a
    #[arg(short, long)]
    pub format: Option<AudioFormat>,

    /// Configuration file (TOML)
    #[arg(short, long, env = "AUDIOBATCH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the ffmpeg executable, overriding the configuration
    #[arg(long)]
    pub ffmpeg: Option<PathBuf>,
}
