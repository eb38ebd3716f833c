//! Testing utilities and mock implementations.
//!
//! This module provides a mock transcoder so the bulk conversion driver can be
//! exercised without an ffmpeg installation.
//!
//! # Example
//!
//! ```rust,ignore
//! use audiobatch_core::testing::{fixtures, MockConverter};
//!
//! let converter = MockConverter::new();
//! converter.fail_all_with("bad codec").await;
//!
//! let dir = tempfile::TempDir::new()?;
//! let inputs = fixtures::audio_files(dir.path(), &["a.wav", "b.wav"]);
//! ```

mod mock_converter;

pub use mock_converter::{MockConverter, RecordedConversion};

/// Test fixtures and helper functions.
pub mod fixtures {
    use std::path::{Path, PathBuf};

    /// Minimal RIFF/WAVE header, enough for an existence check.
    pub const WAV_HEADER: &[u8] = b"RIFF\x24\x00\x00\x00WAVEfmt ";

    /// Create an input audio file with placeholder contents.
    pub fn audio_file(dir: &Path, name: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
        }
        std::fs::write(&path, WAV_HEADER).expect("Failed to write fixture file");
        path
    }

    /// Create several input audio files, returned in the given order.
    pub fn audio_files(dir: &Path, names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|name| audio_file(dir, name)).collect()
    }
}
