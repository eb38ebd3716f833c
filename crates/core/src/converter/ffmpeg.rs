//! FFmpeg-based converter implementation.

use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Instant;
use tokio::process::Command;
use tracing::debug;

use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;
use super::types::{AudioFormat, Bitrate, ConversionJob};

/// FFmpeg-based converter implementation.
pub struct FfmpegConverter {
    config: ConverterConfig,
}

impl FfmpegConverter {
    /// Creates a new FFmpeg converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Builds ffmpeg arguments for an audio conversion.
    ///
    /// Paths are passed through as `OsStr` so names that are not valid UTF-8
    /// reach ffmpeg unchanged.
    fn build_args(
        &self,
        input_path: &Path,
        output_path: &Path,
        format: AudioFormat,
        bitrate: Bitrate,
    ) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "-hide_banner".into(),
            "-nostdin".into(),
            "-y".into(), // Overwrite output
            "-i".into(),
            input_path.as_os_str().to_os_string(),
        ];

        args.extend([OsString::from("-c:a"), OsString::from(format.ffmpeg_codec())]);

        // Bitrate (for lossy formats)
        if !format.is_lossless() {
            args.extend([OsString::from("-b:a"), OsString::from(bitrate.to_string())]);
        }

        args.extend([OsString::from("-f"), OsString::from(format.ffmpeg_muxer())]);

        args.extend([
            OsString::from("-loglevel"),
            OsString::from(&self.config.ffmpeg_log_level),
        ]);

        args.extend(self.config.extra_ffmpeg_args.iter().map(OsString::from));

        args.push(output_path.as_os_str().to_os_string());

        args
    }

    fn map_spawn_error(&self, e: std::io::Error) -> ConverterError {
        if e.kind() == std::io::ErrorKind::NotFound {
            ConverterError::FfmpegNotFound {
                path: self.config.ffmpeg_path.clone(),
            }
        } else {
            ConverterError::Io(e)
        }
    }
}

/// Trims captured stderr, treating blank output as absent.
fn stderr_text(stderr: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(stderr).trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

#[async_trait]
impl Converter for FfmpegConverter {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn convert(&self, job: ConversionJob) -> Result<PathBuf, ConverterError> {
        let start = Instant::now();
        let args = self.build_args(&job.input_path, &job.output_path, job.format, job.bitrate);
        debug!(ffmpeg = ?self.config.ffmpeg_path, ?args, "Running ffmpeg");

        // Only stderr is kept; it becomes the diagnostic on failure
        let output = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| self.map_spawn_error(e))?;

        if !output.status.success() {
            return Err(ConverterError::conversion_failed(
                format!("FFmpeg exited with code: {:?}", output.status.code()),
                stderr_text(&output.stderr),
            ));
        }

        tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| ConverterError::conversion_failed("Output file not created", None))?;

        debug!(
            output = %job.output_path.display(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "ffmpeg finished"
        );

        Ok(job.output_path)
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        let output = Command::new(&self.config.ffmpeg_path)
            .arg("-version")
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| self.map_spawn_error(e))?;

        if !output.status.success() {
            return Err(ConverterError::conversion_failed(
                format!(
                    "{} -version exited with code: {:?}",
                    self.config.ffmpeg_path.display(),
                    output.status.code()
                ),
                stderr_text(&output.stderr),
            ));
        }

        Ok(())
    }
}
