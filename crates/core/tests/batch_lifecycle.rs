//! Bulk conversion lifecycle integration tests.
//!
//! These tests drive the bulk converter with the mock transcoder:
//! - One outcome per input, in input order
//! - Whole-request failure without an output folder
//! - Missing inputs never reach the transcoder
//! - Progress fractions and empty batches
//! - Output path mapping and basename collisions

use std::path::{Path, PathBuf};
use std::time::Duration;

use tempfile::TempDir;
use tokio::sync::mpsc;

use audiobatch_core::{
    batch::{BulkConverter, ConversionOutcome, ConversionRequest, ProgressUpdate, NO_OUTPUT_DIR},
    converter::{AudioFormat, Bitrate},
    testing::{fixtures, MockConverter},
};

/// Test helper bundling the driver, its mock and scratch directories.
struct TestHarness {
    driver: BulkConverter<MockConverter>,
    converter: MockConverter,
    input_dir: TempDir,
    output_root: TempDir,
}

impl TestHarness {
    fn new() -> Self {
        let converter = MockConverter::new();
        Self {
            driver: BulkConverter::new(converter.clone()),
            converter,
            input_dir: TempDir::new().expect("Failed to create input dir"),
            output_root: TempDir::new().expect("Failed to create output dir"),
        }
    }

    fn inputs(&self, names: &[&str]) -> Vec<PathBuf> {
        fixtures::audio_files(self.input_dir.path(), names)
    }

    fn output_dir(&self) -> PathBuf {
        self.output_root.path().join("converted")
    }

    fn request(&self, inputs: Vec<PathBuf>, format: AudioFormat) -> ConversionRequest {
        ConversionRequest::new(inputs, Some(self.output_dir()), format)
    }
}

fn expect_success(outcome: &ConversionOutcome) -> (&Path, &Path) {
    match outcome {
        ConversionOutcome::Success {
            input_path,
            output_path,
        } => (input_path.as_path(), output_path.as_path()),
        other => panic!("Expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_one_outcome_per_input_in_order() {
    let harness = TestHarness::new();
    let mut inputs = harness.inputs(&["one.wav", "two.wav", "three.wav"]);
    inputs.insert(1, harness.input_dir.path().join("missing.wav"));

    let report = harness
        .driver
        .run(harness.request(inputs.clone(), AudioFormat::Mp3), |_| {})
        .await;

    assert_eq!(report.total, 4);
    assert_eq!(report.outcomes().len(), 4);
    for (outcome, input) in report.outcomes().iter().zip(&inputs) {
        assert_eq!(outcome.input_path(), Some(input.as_path()));
    }
    assert_eq!(report.success_count(), 3);
    assert_eq!(report.failure_count(), 1);

    let converted: Vec<_> = report
        .successes()
        .map(|o| expect_success(o).0.to_path_buf())
        .collect();
    assert_eq!(converted, vec![inputs[0].clone(), inputs[2].clone(), inputs[3].clone()]);
}

#[tokio::test]
async fn test_missing_output_dir_yields_single_failure() {
    let harness = TestHarness::new();
    let inputs = harness.inputs(&["a.wav", "b.wav", "c.wav"]);

    let request = ConversionRequest::new(inputs, None, AudioFormat::Ogg);
    let report = harness.driver.run(request, |_| {}).await;

    assert_eq!(report.success_count(), 0);
    assert_eq!(report.failure_count(), 1);
    match &report.outcomes()[0] {
        ConversionOutcome::Failure { input_path, reason } => {
            assert!(input_path.is_none());
            assert_eq!(reason, NO_OUTPUT_DIR);
        }
        other => panic!("Expected failure, got {:?}", other),
    }
    assert_eq!(harness.converter.conversion_count().await, 0);
}

#[tokio::test]
async fn test_missing_input_skips_transcoder() {
    let harness = TestHarness::new();
    let missing = harness.input_dir.path().join("ghost.wav");
    let mut inputs = vec![missing.clone()];
    inputs.extend(harness.inputs(&["real.wav"]));

    let report = harness
        .driver
        .run(harness.request(inputs, AudioFormat::Mp3), |_| {})
        .await;

    let failure = report.failures().next().expect("Expected a failure");
    assert_eq!(
        failure.to_string(),
        format!("File not found: {}", missing.display())
    );
    assert!(failure.to_string().contains(&missing.display().to_string()));

    let recorded = harness.converter.recorded_conversions().await;
    assert_eq!(recorded.len(), 1);
    assert!(recorded.iter().all(|r| r.job.input_path != missing));
}

#[tokio::test]
async fn test_directory_input_is_not_a_file() {
    let harness = TestHarness::new();
    let dir_input = harness.input_dir.path().join("album.wav");
    std::fs::create_dir(&dir_input).unwrap();

    let report = harness
        .driver
        .run(harness.request(vec![dir_input], AudioFormat::Mp3), |_| {})
        .await;

    assert_eq!(report.failure_count(), 1);
    assert!(report.outcomes()[0].to_string().starts_with("File not found:"));
    assert_eq!(harness.converter.conversion_count().await, 0);
}

#[tokio::test]
async fn test_progress_fractions_reach_one() {
    let harness = TestHarness::new();
    let inputs = harness.inputs(&["a.wav", "b.wav", "c.wav", "d.wav", "e.wav"]);
    let total = inputs.len();

    let mut fractions = Vec::new();
    let mut started = Vec::new();
    harness
        .driver
        .run(harness.request(inputs, AudioFormat::Wav), |update| match update {
            ProgressUpdate::FileStarted {
                index, file_name, ..
            } => started.push((index, file_name)),
            finished @ ProgressUpdate::FileFinished { .. } => fractions.push(finished.fraction()),
        })
        .await;

    assert_eq!(fractions.len(), total);
    for (i, fraction) in fractions.iter().enumerate() {
        assert_eq!(*fraction, (i + 1) as f64 / total as f64);
    }
    assert!(fractions.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*fractions.last().unwrap(), 1.0);

    let indices: Vec<usize> = started.iter().map(|(i, _)| *i).collect();
    assert_eq!(indices, vec![0, 1, 2, 3, 4]);
    assert_eq!(started[2].1, "c.wav");
}

#[tokio::test]
async fn test_expected_output_paths() {
    let harness = TestHarness::new();
    let inputs = harness.inputs(&["a.wav", "b.wav"]);

    let report = harness
        .driver
        .run(harness.request(inputs, AudioFormat::Mp3), |_| {})
        .await;

    let outputs: Vec<PathBuf> = report
        .successes()
        .map(|o| expect_success(o).1.to_path_buf())
        .collect();
    assert_eq!(
        outputs,
        vec![
            harness.output_dir().join("a.mp3"),
            harness.output_dir().join("b.mp3"),
        ]
    );

    let recorded = harness.converter.recorded_conversions().await;
    assert!(recorded
        .iter()
        .all(|r| r.job.format == AudioFormat::Mp3 && r.job.bitrate == Bitrate::DEFAULT));
}

#[tokio::test]
async fn test_same_basename_collides_silently() {
    let harness = TestHarness::new();
    harness.converter.set_write_outputs(true).await;

    let first = fixtures::audio_file(harness.input_dir.path(), "in1/a.wav");
    let second = harness.input_dir.path().join("in2/a.wav");
    std::fs::create_dir_all(second.parent().unwrap()).unwrap();
    std::fs::write(&second, b"second take").unwrap();

    let report = harness
        .driver
        .run(
            harness.request(vec![first, second.clone()], AudioFormat::Mp3),
            |_| {},
        )
        .await;

    assert!(report.is_clean());
    assert_eq!(report.success_count(), 2);

    let target = harness.output_dir().join("a.mp3");
    for outcome in report.outcomes() {
        assert_eq!(expect_success(outcome).1, target.as_path());
    }
    assert_eq!(report.outcomes()[1].input_path(), Some(second.as_path()));

    // Second conversion overwrote the first one's output
    assert_eq!(std::fs::read(&target).unwrap(), b"second take");
}

#[tokio::test]
async fn test_always_failing_transcoder() {
    let harness = TestHarness::new();
    harness.converter.fail_all_with("bad codec").await;
    let inputs = harness.inputs(&["a.wav", "b.wav", "c.wav"]);

    let report = harness
        .driver
        .run(harness.request(inputs.clone(), AudioFormat::Flac), |_| {})
        .await;

    assert_eq!(report.success_count(), 0);
    assert_eq!(report.failure_count(), 3);
    for (outcome, input) in report.failures().zip(&inputs) {
        let line = outcome.to_string();
        assert!(line.contains("bad codec"));
        assert!(line.starts_with(&format!("Error converting {}", input.display())));
    }
    assert_eq!(harness.converter.conversion_count().await, 3);
}

#[tokio::test]
async fn test_single_failure_does_not_abort_batch() {
    let harness = TestHarness::new();
    let inputs = harness.inputs(&["a.wav", "b.wav", "c.wav"]);
    harness
        .converter
        .fail_input(&inputs[1], "Invalid data found when processing input")
        .await;

    let report = harness
        .driver
        .run(harness.request(inputs, AudioFormat::Ogg), |_| {})
        .await;

    assert_eq!(report.success_count(), 2);
    assert_eq!(report.failure_count(), 1);
    assert!(report.outcomes()[0].is_success());
    assert!(!report.outcomes()[1].is_success());
    assert!(report.outcomes()[2].is_success());
}

#[tokio::test]
async fn test_empty_input_list() {
    let harness = TestHarness::new();

    let mut callbacks = 0;
    let report = harness
        .driver
        .run(harness.request(Vec::new(), AudioFormat::Mp3), |_| callbacks += 1)
        .await;

    assert_eq!(report.total, 0);
    assert_eq!(report.success_count(), 0);
    assert_eq!(report.failure_count(), 0);
    assert_eq!(callbacks, 0);
    assert!(!harness.output_dir().exists());
}

#[tokio::test]
async fn test_output_dir_created_with_parents() {
    let harness = TestHarness::new();
    let inputs = harness.inputs(&["a.wav"]);
    let nested = harness.output_root.path().join("x/y/z");

    let request = ConversionRequest::new(inputs, Some(nested.clone()), AudioFormat::M4a);
    let report = harness.driver.run(request, |_| {}).await;

    assert!(nested.is_dir());
    assert!(report.is_clean());

    // Existing directory is fine on a second run
    let request = ConversionRequest::new(harness.inputs(&["b.wav"]), Some(nested), AudioFormat::M4a);
    assert!(harness.driver.run(request, |_| {}).await.is_clean());
}

#[tokio::test]
async fn test_background_task_with_progress_channel() {
    let harness = TestHarness::new();
    harness
        .converter
        .set_conversion_duration(Duration::from_millis(5))
        .await;
    let inputs = harness.inputs(&["a.wav", "b.wav"]);
    let request = harness.request(inputs, AudioFormat::Mp3);
    let driver = harness.driver.clone();

    let (tx, mut rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(async move {
        driver
            .run(request, move |update| {
                let _ = tx.send(update);
            })
            .await
    });

    let mut received = Vec::new();
    while let Some(update) = rx.recv().await {
        received.push(update);
    }
    let report = worker.await.expect("Worker panicked");

    assert_eq!(received.len(), 4);
    assert_eq!(received.last().map(ProgressUpdate::fraction), Some(1.0));
    assert_eq!(report.success_count(), 2);
}
