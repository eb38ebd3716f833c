//! Types for the batch module.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::converter::{AudioFormat, Bitrate};

/// One bulk conversion run, built from the caller's current selections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    /// Input files, converted in this order.
    pub inputs: Vec<PathBuf>,
    /// Output directory. `None` fails the whole request.
    pub output_dir: Option<PathBuf>,
    /// Format applied to every file in the batch.
    pub format: AudioFormat,
    /// Bitrate applied to every file in the batch.
    pub bitrate: Bitrate,
}

impl ConversionRequest {
    /// Creates a request using the default bitrate.
    pub fn new(
        inputs: impl IntoIterator<Item = impl Into<PathBuf>>,
        output_dir: Option<PathBuf>,
        format: AudioFormat,
    ) -> Self {
        Self {
            inputs: inputs.into_iter().map(Into::into).collect(),
            output_dir,
            format,
            bitrate: Bitrate::DEFAULT,
        }
    }

    /// Overrides the bitrate.
    pub fn with_bitrate(mut self, bitrate: Bitrate) -> Self {
        self.bitrate = bitrate;
        self
    }
}

/// Result of processing a single input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionOutcome {
    /// The transcoder wrote the output file.
    Success {
        input_path: PathBuf,
        output_path: PathBuf,
    },
    /// The input could not be converted.
    ///
    /// `input_path` is `None` when the whole request failed before any file
    /// was touched.
    Failure {
        input_path: Option<PathBuf>,
        reason: String,
    },
}

impl ConversionOutcome {
    /// Creates a per-file failure.
    pub fn failure(input_path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::Failure {
            input_path: Some(input_path.into()),
            reason: reason.into(),
        }
    }

    /// Creates a failure that applies to the whole request.
    pub fn request_failure(reason: impl Into<String>) -> Self {
        Self::Failure {
            input_path: None,
            reason: reason.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Input file this outcome belongs to, if any.
    pub fn input_path(&self) -> Option<&Path> {
        match self {
            Self::Success { input_path, .. } => Some(input_path),
            Self::Failure { input_path, .. } => input_path.as_deref(),
        }
    }
}

impl fmt::Display for ConversionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success {
                input_path,
                output_path,
            } => write!(
                f,
                "Converted: {} -> {}",
                input_path.display(),
                output_path.display()
            ),
            Self::Failure { reason, .. } => f.write_str(reason),
        }
    }
}

/// Outcome of a whole run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionReport {
    /// Number of input files in the request.
    pub total: usize,
    outcomes: Vec<ConversionOutcome>,
}

impl ConversionReport {
    pub(crate) fn new(total: usize) -> Self {
        Self {
            total,
            outcomes: Vec::with_capacity(total),
        }
    }

    pub(crate) fn push(&mut self, outcome: ConversionOutcome) {
        self.outcomes.push(outcome);
    }

    /// All outcomes, in the order they were recorded.
    pub fn outcomes(&self) -> &[ConversionOutcome] {
        &self.outcomes
    }

    pub fn successes(&self) -> impl Iterator<Item = &ConversionOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failures(&self) -> impl Iterator<Item = &ConversionOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }

    pub fn success_count(&self) -> usize {
        self.successes().count()
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }

    /// Whether the run recorded no failures.
    pub fn is_clean(&self) -> bool {
        self.failure_count() == 0
    }
}

/// Summary text shown to the user once the run finishes.
impl fmt::Display for ConversionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Files: {}", self.total)?;
        writeln!(f, "Success: {}", self.success_count())?;
        writeln!(f, "Errors: {}", self.failure_count())?;
        writeln!(f)?;
        writeln!(f, "Successes:")?;
        for outcome in self.successes() {
            writeln!(f, "{}", outcome)?;
        }
        writeln!(f)?;
        write!(f, "Errors:")?;
        for outcome in self.failures() {
            write!(f, "\n{}", outcome)?;
        }
        Ok(())
    }
}

/// Progress notification emitted by the driver.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressUpdate {
    /// A file is about to be processed.
    FileStarted {
        /// Zero-based position in the request.
        index: usize,
        total: usize,
        /// Base name of the input file.
        file_name: String,
    },
    /// A file has been processed, successfully or not.
    FileFinished { completed: usize, total: usize },
}

impl ProgressUpdate {
    /// Fraction of the batch that is complete, in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        let (done, total) = match self {
            Self::FileStarted { index, total, .. } => (*index, *total),
            Self::FileFinished { completed, total } => (*completed, *total),
        };
        if total == 0 {
            return 0.0;
        }
        done as f64 / total as f64
    }
}
