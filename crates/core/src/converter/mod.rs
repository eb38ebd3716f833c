//! Converter module wrapping the external audio transcoder.
//!
//! This module provides the `Converter` trait and an FFmpeg implementation that
//! converts one audio file per call. All signal processing is delegated to the
//! external executable.
//!
//! # Example
//!
//! ```ignore
//! use audiobatch_core::converter::{AudioFormat, Bitrate, ConversionJob, Converter, FfmpegConverter};
//!
//! let converter = FfmpegConverter::with_defaults();
//!
//! // Validate ffmpeg is available
//! converter.validate().await?;
//!
//! let job = ConversionJob {
//!     input_path: PathBuf::from("/music/track.wav"),
//!     output_path: PathBuf::from("/converted/track.mp3"),
//!     format: AudioFormat::Mp3,
//!     bitrate: Bitrate::DEFAULT,
//! };
//!
//! let written = converter.convert(job).await?;
//! ```

mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use config::ConverterConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use traits::Converter;
pub use types::{AudioFormat, Bitrate, ConversionJob, UnknownFormat};
