//! Bulk conversion of a list of audio files.
//!
//! A [`ConversionRequest`] is built from the caller's selections and handed to
//! [`BulkConverter::run`], which converts each file in order, reports progress
//! through a callback and returns a [`ConversionReport`].
//!
//! # Example
//!
//! ```ignore
//! use audiobatch_core::batch::{BulkConverter, ConversionRequest};
//! use audiobatch_core::converter::{AudioFormat, FfmpegConverter};
//!
//! let driver = BulkConverter::new(FfmpegConverter::with_defaults());
//! let request = ConversionRequest::new(
//!     ["/music/a.wav", "/music/b.wav"],
//!     Some(PathBuf::from("/converted")),
//!     AudioFormat::Mp3,
//! );
//!
//! let report = driver
//!     .run(request, |update| println!("{:.0}%", update.fraction() * 100.0))
//!     .await;
//! println!("{}", report);
//! ```

mod runner;
mod types;

pub use runner::{output_path_for, BulkConverter, NO_OUTPUT_DIR};
pub use types::{ConversionOutcome, ConversionReport, ConversionRequest, ProgressUpdate};
