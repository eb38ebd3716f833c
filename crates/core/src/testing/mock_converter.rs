//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::converter::{ConversionJob, Converter, ConverterError};

/// A recorded conversion job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the conversion succeeded.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Track conversion jobs for assertions
/// - Fail the next job, every job, or jobs for specific inputs
/// - Panic on specific inputs
/// - Optionally write the output file so overwrites can be observed
///
/// # Example
///
/// ```rust,ignore
/// use audiobatch_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
/// converter.fail_all_with("bad codec").await;
///
/// let result = converter.convert(job).await;
/// assert!(result.is_err());
///
/// let conversions = converter.recorded_conversions().await;
/// assert_eq!(conversions.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockConverter {
    /// Recorded conversions.
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// If set, the next conversion will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    /// If set, every conversion fails with this diagnostic.
    fail_all: Arc<RwLock<Option<String>>>,
    /// Diagnostics for inputs that should fail.
    failing_inputs: Arc<RwLock<HashMap<PathBuf, String>>>,
    /// Inputs whose conversion panics.
    panicking_inputs: Arc<RwLock<HashSet<PathBuf>>>,
    /// Simulated conversion duration in milliseconds.
    conversion_duration_ms: Arc<RwLock<u64>>,
    /// Whether successful conversions write the output file.
    write_outputs: Arc<RwLock<bool>>,
    /// Whether validation should report a missing binary.
    missing_binary: Arc<RwLock<bool>>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            conversions: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            fail_all: Arc::new(RwLock::new(None)),
            failing_inputs: Arc::new(RwLock::new(HashMap::new())),
            panicking_inputs: Arc::new(RwLock::new(HashSet::new())),
            conversion_duration_ms: Arc::new(RwLock::new(0)),
            write_outputs: Arc::new(RwLock::new(false)),
            missing_binary: Arc::new(RwLock::new(false)),
        }
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Clear recorded conversions.
    pub async fn clear_recorded(&self) {
        self.conversions.write().await.clear();
    }

    /// Get the number of conversions attempted.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Configure the next conversion to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every conversion fail with the given transcoder diagnostic.
    pub async fn fail_all_with(&self, diagnostic: impl Into<String>) {
        *self.fail_all.write().await = Some(diagnostic.into());
    }

    /// Make conversions of one input fail with the given diagnostic.
    pub async fn fail_input(&self, path: impl AsRef<Path>, diagnostic: impl Into<String>) {
        self.failing_inputs
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), diagnostic.into());
    }

    /// Make conversions of one input panic.
    pub async fn set_panic_on(&self, path: impl AsRef<Path>) {
        self.panicking_inputs
            .write()
            .await
            .insert(path.as_ref().to_path_buf());
    }

    /// Set the simulated conversion duration.
    pub async fn set_conversion_duration(&self, duration: Duration) {
        *self.conversion_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Write the input's bytes to the output path on success.
    pub async fn set_write_outputs(&self, write: bool) {
        *self.write_outputs.write().await = write;
    }

    /// Make `validate` report the binary as missing.
    pub async fn set_missing_binary(&self, missing: bool) {
        *self.missing_binary.write().await = missing;
    }

    /// Clear any pending or persistent failure.
    pub async fn clear_failures(&self) {
        *self.next_error.write().await = None;
        *self.fail_all.write().await = None;
        self.failing_inputs.write().await.clear();
        self.panicking_inputs.write().await.clear();
    }

    async fn record(&self, job: &ConversionJob, success: bool) {
        self.conversions.write().await.push(RecordedConversion {
            job: job.clone(),
            success,
        });
    }

    async fn failure_for(&self, job: &ConversionJob) -> Option<ConverterError> {
        if let Some(err) = self.next_error.write().await.take() {
            return Some(err);
        }

        let diagnostic = match self.failing_inputs.read().await.get(&job.input_path) {
            Some(diagnostic) => Some(diagnostic.clone()),
            None => self.fail_all.read().await.clone(),
        };

        diagnostic.map(|d| {
            ConverterError::conversion_failed("FFmpeg exited with code: Some(1)", Some(d))
        })
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn convert(&self, job: ConversionJob) -> Result<PathBuf, ConverterError> {
        let should_panic = self.panicking_inputs.read().await.contains(&job.input_path);
        if should_panic {
            self.record(&job, false).await;
            panic!("mock converter panicked on {}", job.input_path.display());
        }

        if let Some(err) = self.failure_for(&job).await {
            self.record(&job, false).await;
            return Err(err);
        }

        self.record(&job, true).await;

        // Simulate conversion time
        let duration_ms = *self.conversion_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        let write_outputs = *self.write_outputs.read().await;
        if write_outputs {
            let bytes = tokio::fs::read(&job.input_path).await?;
            tokio::fs::write(&job.output_path, bytes).await?;
        }

        Ok(job.output_path)
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        if *self.missing_binary.read().await {
            return Err(ConverterError::FfmpegNotFound {
                path: PathBuf::from("mock-ffmpeg"),
            });
        }
        Ok(())
    }
}
