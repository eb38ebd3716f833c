//! Bulk conversion driver.

use futures::FutureExt;
use std::any::Any;
use std::collections::HashSet;
use std::ffi::OsString;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::converter::{AudioFormat, Bitrate, ConversionJob, Converter};

use super::types::{ConversionOutcome, ConversionReport, ConversionRequest, ProgressUpdate};

/// Reason recorded when a request has no output directory.
pub const NO_OUTPUT_DIR: &str = "No output folder selected.";

/// Converts every file of a request, one at a time, through a [`Converter`].
pub struct BulkConverter<C: Converter> {
    converter: Arc<C>,
}

impl<C: Converter> Clone for BulkConverter<C> {
    fn clone(&self) -> Self {
        Self {
            converter: Arc::clone(&self.converter),
        }
    }
}

impl<C: Converter> BulkConverter<C> {
    /// Creates a driver around the given converter.
    pub fn new(converter: C) -> Self {
        Self {
            converter: Arc::new(converter),
        }
    }

    /// Returns the underlying converter.
    pub fn converter(&self) -> &C {
        &self.converter
    }

    /// Runs the whole request and returns its report.
    ///
    /// Files are processed sequentially in request order. `on_progress` is
    /// called with [`ProgressUpdate::FileStarted`] before each file and
    /// [`ProgressUpdate::FileFinished`] after it. A failing file is recorded
    /// and the batch moves on; only a missing or uncreatable output directory
    /// stops the run, before any file is touched.
    pub async fn run<F>(&self, request: ConversionRequest, mut on_progress: F) -> ConversionReport
    where
        F: FnMut(ProgressUpdate) + Send,
    {
        let total = request.inputs.len();

        let Some(output_dir) = request.output_dir.as_deref() else {
            warn!(total, "Conversion requested without an output folder");
            let mut report = ConversionReport::new(total);
            report.push(ConversionOutcome::request_failure(NO_OUTPUT_DIR));
            return report;
        };

        if total == 0 {
            info!("No input files, nothing to convert");
            return ConversionReport::new(0);
        }

        if let Err(e) = tokio::fs::create_dir_all(output_dir).await {
            warn!(output_dir = %output_dir.display(), error = %e, "Failed to create output folder");
            let mut report = ConversionReport::new(total);
            report.push(ConversionOutcome::request_failure(format!(
                "Could not create output folder {}: {}",
                output_dir.display(),
                e
            )));
            return report;
        }

        info!(
            total,
            format = %request.format,
            bitrate = %request.bitrate,
            output_dir = %output_dir.display(),
            converter = self.converter.name(),
            "Starting bulk conversion"
        );

        let mut report = ConversionReport::new(total);
        let mut written = HashSet::new();

        for (index, input) in request.inputs.iter().enumerate() {
            on_progress(ProgressUpdate::FileStarted {
                index,
                total,
                file_name: display_name(input),
            });

            let outcome = match self
                .convert_one(input, output_dir, request.format, request.bitrate, &mut written)
                .await
            {
                Ok(output_path) => ConversionOutcome::Success {
                    input_path: input.clone(),
                    output_path,
                },
                Err(reason) => {
                    warn!(input = %input.display(), %reason, "File conversion failed");
                    ConversionOutcome::failure(input.clone(), reason)
                }
            };
            report.push(outcome);

            on_progress(ProgressUpdate::FileFinished {
                completed: index + 1,
                total,
            });
        }

        info!(
            total,
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "Bulk conversion finished"
        );

        report
    }

    /// Converts one input. The error is the human-readable failure reason.
    async fn convert_one(
        &self,
        input: &Path,
        output_dir: &Path,
        format: AudioFormat,
        bitrate: Bitrate,
        written: &mut HashSet<PathBuf>,
    ) -> Result<PathBuf, String> {
        if !is_regular_file(input).await {
            return Err(format!("File not found: {}", input.display()));
        }

        let output_path = output_path_for(output_dir, input, format);
        if !written.insert(output_path.clone()) {
            warn!(
                input = %input.display(),
                output = %output_path.display(),
                "Output path already written in this batch, overwriting"
            );
        }

        let job = ConversionJob {
            input_path: input.to_path_buf(),
            output_path,
            format,
            bitrate,
        };
        debug!(?job, "Converting file");

        match AssertUnwindSafe(self.converter.convert(job))
            .catch_unwind()
            .await
        {
            Ok(Ok(output_path)) => Ok(output_path),
            Ok(Err(e)) => Err(format!(
                "Error converting {}: {}",
                input.display(),
                e.diagnostic()
            )),
            Err(panic) => Err(format!(
                "Error converting {}: {}",
                input.display(),
                panic_message(&*panic)
            )),
        }
    }
}

/// Computes `<output_dir>/<input stem>.<format extension>`.
///
/// Inputs sharing a stem map to the same path; the later conversion wins.
pub fn output_path_for(output_dir: &Path, input: &Path, format: AudioFormat) -> PathBuf {
    let mut name: OsString = input
        .file_stem()
        .map(|s| s.to_os_string())
        .unwrap_or_else(|| OsString::from("output"));
    name.push(".");
    name.push(format.extension());
    output_dir.join(name)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

async fn is_regular_file(path: &Path) -> bool {
    tokio::fs::metadata(path)
        .await
        .map(|m| m.is_file())
        .unwrap_or(false)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("unexpected error: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("unexpected error: {}", s)
    } else {
        "unexpected error".to_string()
    }
}
