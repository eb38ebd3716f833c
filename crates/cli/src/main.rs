mod args;
mod progress;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audiobatch_core::{
    load_config, load_default_config, validate_config, BulkConverter, Config, ConversionRequest,
    Converter, FfmpegConverter,
};

use args::Args;
use progress::ProgressView;

/// Configuration file picked up from the working directory when present
const DEFAULT_CONFIG_FILE: &str = "audiobatch.toml";

/// Exit status when the batch finished with at least one failure
const EXIT_BATCH_FAILURES: i32 = 2;

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(EXIT_BATCH_FAILURES),
        Err(e) => {
            error!("Fatal error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Returns whether every file converted successfully.
async fn run() -> Result<bool> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let mut config = resolve_config(args.config.as_deref())?;
    if let Some(ffmpeg) = args.ffmpeg {
        config.converter.ffmpeg_path = ffmpeg;
    }
    validate_config(&config).context("Configuration validation failed")?;

    if args.files.is_empty() {
        bail!("No input files selected. Select files and output folder first!");
    }

    let converter = FfmpegConverter::new(config.converter.clone());
    converter.validate().await.with_context(|| {
        format!(
            "FFmpeg is not usable at {:?}; install FFmpeg or set converter.ffmpeg_path",
            config.converter.ffmpeg_path
        )
    })?;
    info!("Using converter: {}", converter.name());

    let request = ConversionRequest::new(
        args.files,
        args.output_dir.or(config.conversion.output_dir.clone()),
        args.format.unwrap_or(config.conversion.format),
    )
    .with_bitrate(config.conversion.bitrate());

    // The driver runs on its own task; progress comes back over the channel
    let driver = BulkConverter::new(converter);
    let (progress_tx, mut progress_rx) = mpsc::unbounded_channel();
    let worker = tokio::spawn(async move {
        driver
            .run(request, move |update| {
                // Receiver is held until the worker finishes
                let _ = progress_tx.send(update);
            })
            .await
    });

    // A failed write must not return before the worker finishes its current file
    let mut view = ProgressView::new(std::io::stdout().lock());
    let rendered = view.follow(&mut progress_rx).await;

    let report = worker.await.context("Conversion worker stopped unexpectedly")?;
    rendered.context("Failed to write progress")?;
    view.finish(&report).context("Failed to write summary")?;

    Ok(report.is_clean())
}

/// Loads the explicit config file, else `audiobatch.toml` if present, else defaults.
fn resolve_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => {
            let fallback = PathBuf::from(DEFAULT_CONFIG_FILE);
            if !fallback.exists() {
                info!("No configuration file, using defaults");
                return load_default_config().context("Failed to load default configuration");
            }
            fallback
        }
    };

    info!("Loading configuration from {:?}", path);
    load_config(&path).with_context(|| format!("Failed to load config from {:?}", path))
}
