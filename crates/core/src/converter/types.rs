//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Target audio format for a conversion batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudioFormat {
    /// MPEG Audio Layer III
    #[default]
    Mp3,
    /// WAVE (uncompressed PCM)
    Wav,
    /// Ogg Vorbis
    Ogg,
    /// Free Lossless Audio Codec
    Flac,
    /// AAC in an MPEG-4 audio container
    M4a,
}

impl AudioFormat {
    /// Every format a batch can target, in menu order.
    pub const ALL: [AudioFormat; 5] = [
        AudioFormat::Mp3,
        AudioFormat::Wav,
        AudioFormat::Ogg,
        AudioFormat::Flac,
        AudioFormat::M4a,
    ];

    /// Returns the identifier of this format, which is also its file extension.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            Self::M4a => "m4a",
        }
    }

    /// Returns the file extension for this format.
    pub fn extension(&self) -> &'static str {
        self.as_str()
    }

    /// Returns the ffmpeg muxer name for this format.
    pub fn ffmpeg_muxer(&self) -> &'static str {
        match self {
            Self::Mp3 => "mp3",
            Self::Wav => "wav",
            Self::Ogg => "ogg",
            Self::Flac => "flac",
            // ffmpeg has no "m4a" muxer; "ipod" writes .m4a files
            Self::M4a => "ipod",
        }
    }

    /// Returns the ffmpeg codec name for this format.
    pub fn ffmpeg_codec(&self) -> &'static str {
        match self {
            Self::Mp3 => "libmp3lame",
            Self::Wav => "pcm_s16le",
            Self::Ogg => "libvorbis",
            Self::Flac => "flac",
            Self::M4a => "aac",
        }
    }

    /// Whether this format is lossless.
    pub fn is_lossless(&self) -> bool {
        matches!(self, Self::Wav | Self::Flac)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown format identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unsupported audio format: {0} (expected one of mp3, wav, ogg, flac, m4a)")]
pub struct UnknownFormat(pub String);

impl FromStr for AudioFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().trim_start_matches('.').to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == normalized)
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Audio bitrate in kbps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bitrate(u32);

impl Bitrate {
    /// Bitrate applied to every file in a batch unless configured otherwise.
    pub const DEFAULT: Bitrate = Bitrate(192);

    /// Creates a bitrate from a kbps value.
    pub const fn from_kbps(kbps: u32) -> Self {
        Self(kbps)
    }

    /// Returns the bitrate in kbps.
    pub fn kbps(&self) -> u32 {
        self.0
    }
}

impl Default for Bitrate {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for Bitrate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}k", self.0)
    }
}

/// A single transcoder invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path. Overwritten if it already exists.
    pub output_path: PathBuf,
    /// Target format.
    pub format: AudioFormat,
    /// Target bitrate (ignored by lossless formats).
    pub bitrate: Bitrate,
}
