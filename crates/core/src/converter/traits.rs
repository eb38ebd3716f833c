//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::PathBuf;

use super::error::ConverterError;
use super::types::{AudioFormat, ConversionJob};

/// An external transcoder that converts one audio file per call.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Converts the job's input file, overwriting any existing output.
    ///
    /// Returns the path that was written.
    async fn convert(&self, job: ConversionJob) -> Result<PathBuf, ConverterError>;

    /// Validates that the converter is properly configured and ready.
    async fn validate(&self) -> Result<(), ConverterError>;

    /// Returns the supported output formats.
    fn supported_output_formats(&self) -> &[AudioFormat] {
        &AudioFormat::ALL
    }
}
