//! Shared command-line plumbing for the Squaremill binaries.
//!
//! Both frontends (`squaremill` and `squaremill-wm`) parse their own
//! arguments and delegate here: output-directory resolution, logging setup,
//! and the batch run with its per-file progress lines.

use std::path::{Path, PathBuf};

use anyhow::Context;
use squaremill_core::batch::BatchEvent;
use squaremill_core::{run_batch, ConvertOptions, TargetSize, WatermarkSpec};
use tracing_subscriber::EnvFilter;

/// Initialize the tracing subscriber for diagnostic logging.
///
/// Progress and summary lines go to stdout separately; the logger is for
/// diagnostics and defaults to `warn` unless `RUST_LOG` overrides it.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .compact()
        .init();
}

/// Resolve the output directory, defaulting to `<input>/converted`.
pub fn resolve_output_dir(input_folder: &Path, output_folder: Option<PathBuf>) -> PathBuf {
    output_folder.unwrap_or_else(|| input_folder.join("converted"))
}

/// Run a batch conversion and print per-file progress plus a final summary.
///
/// Per-file failures are reported inline and do not fail the process; only
/// batch-fatal setup errors (unreadable input directory, uncreatable output
/// directory) surface as an error here.
pub fn run(
    input_folder: PathBuf,
    output_folder: Option<PathBuf>,
    size: u32,
    watermark: Option<WatermarkSpec>,
) -> anyhow::Result<()> {
    let output_dir = resolve_output_dir(&input_folder, output_folder);
    tracing::debug!(
        "converting {} into {} at {size}x{size}",
        input_folder.display(),
        output_dir.display()
    );

    let options = ConvertOptions {
        size: TargetSize::square(size),
        watermark,
    };

    let summary = run_batch(&input_folder, &output_dir, &options, |event| match event {
        BatchEvent::Scanned { candidates: 0 } => {
            println!("No JPG files found in {}", input_folder.display());
        }
        BatchEvent::Scanned { candidates } => {
            println!("Found {candidates} JPG files to process...");
        }
        BatchEvent::Processed(outcome) => match &outcome.result {
            Ok(output_name) => println!("Processed: {} → {output_name}", outcome.file_name()),
            Err(error) => println!("Error processing {}: {error}", outcome.path.display()),
        },
    })
    .with_context(|| format!("processing {}", input_folder.display()))?;

    if summary.candidates > 0 {
        println!(
            "Processing complete. {} of {} images converted successfully.",
            summary.succeeded, summary.candidates
        );
    }

    Ok(())
}
