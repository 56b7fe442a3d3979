mod dates;
mod ingest;
mod models;
mod pipeline;
mod samples;
mod submit;
mod validate;

use std::io::{BufWriter, Write, stderr, stdout};
use std::path::Path;
use std::process::exit;

use anyhow::{Context, Result};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{Layer, fmt};

use crate::ingest::FileFormat;
use crate::models::{Indicator, UploadResult, ValidationError};
use crate::pipeline::{ImportOutcome, ImportPipeline, LogObserver};
use crate::submit::HttpSyncApi;

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Two positional arguments and two environment variables do not warrant
    //      pulling in a full CLI parsing crate.
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 3 {
        eprintln!("Usage: bulk-sync [input-file] [indicator] [log_level:optional]");
        eprintln!("       bulk-sync sample [indicator]");
        eprintln!("Indicators: investment, withdrawal, payout, closure");
        eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
        eprintln!("Environment: SYNC_API_URL, SYNC_API_TOKEN");
        exit(1);
    }

    if args[1] == "sample" {
        return write_sample(&args[2]);
    }

    let path = Path::new(&args[1]);
    let indicator: Indicator = args[2].parse().map_err(anyhow::Error::msg)?;
    let log_level = args
        .get(3)
        .map(|value| parse_log_level(value))
        .unwrap_or(LevelFilter::ERROR);

    setup_logging(log_level);

    let format = FileFormat::from_path(path)
        .with_context(|| format!("Unable to infer the file format of {}; use .xlsx or .json", path.display()))?;
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Unable to read {}", path.display()))?;

    let base_url = std::env::var("SYNC_API_URL").context("SYNC_API_URL is not set")?;
    let token = std::env::var("SYNC_API_TOKEN").context("SYNC_API_TOKEN is not set")?;

    let pipeline = ImportPipeline::new(HttpSyncApi::new(base_url, token), indicator);
    let outcome = pipeline.run(&bytes, format, &LogObserver).await?;

    match outcome {
        ImportOutcome::Rejected(errors) => {
            write_validation_report(&errors)?;
            exit(1);
        }
        ImportOutcome::Submitted(result) => write_upload_report(&result),
    }
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: The operator report goes to stdout, so logging goes to stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry().with(terminal_log).init();
}

fn write_sample(indicator: &str) -> Result<()> {
    let indicator: Indicator = indicator.parse().map_err(anyhow::Error::msg)?;
    let bytes = samples::sample_file(indicator)?;

    let mut output = stdout().lock();
    output.write_all(&bytes)?;
    writeln!(output)?;

    Ok(())
}

fn write_validation_report(errors: &[ValidationError]) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "Upload rejected: {} validation error(s)", errors.len())?;
    for error in errors {
        writeln!(output, "{error}")?;
    }

    output.flush()?;

    Ok(())
}

fn write_upload_report(result: &UploadResult) -> Result<()> {
    let mut output = BufWriter::new(stdout().lock());

    writeln!(output, "Synced {} transaction(s)", result.success_count)?;
    for error in &result.errors {
        if error.row == 0 {
            writeln!(output, "Batch failed: {}", error.message)?;
        } else {
            writeln!(output, "Row {}: {}", error.row, error.message)?;
        }
    }

    output.flush()?;

    Ok(())
}
