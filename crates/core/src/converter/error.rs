//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during conversion.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// Conversion process failed.
    #[error("Conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ConverterError {
    /// Creates a new conversion failed error with stderr output.
    pub fn conversion_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Human-readable diagnostic for this error.
    ///
    /// The transcoder's own stderr is returned verbatim when it was captured;
    /// its layout depends on the transcoder version and is not parsed.
    pub fn diagnostic(&self) -> String {
        match self {
            Self::ConversionFailed {
                stderr: Some(stderr),
                ..
            } => stderr.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_prefers_stderr() {
        let err = ConverterError::conversion_failed(
            "FFmpeg exited with code: Some(1)",
            Some("Unknown encoder 'libfoo'".to_string()),
        );
        assert_eq!(err.diagnostic(), "Unknown encoder 'libfoo'");
    }

    #[test]
    fn test_diagnostic_falls_back_to_display() {
        let err = ConverterError::conversion_failed("FFmpeg exited with code: Some(1)", None);
        assert_eq!(
            err.diagnostic(),
            "Conversion failed: FFmpeg exited with code: Some(1)"
        );

        let err = ConverterError::FfmpegNotFound {
            path: PathBuf::from("/opt/ffmpeg"),
        };
        assert_eq!(err.diagnostic(), "FFmpeg not found at path: /opt/ffmpeg");
    }
}
