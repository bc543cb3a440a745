//! Batch orchestration over an input directory.
//!
//! Enumerates candidate JPEG files, runs each through the per-image pipeline
//! sequentially, and aggregates a summary. Per-file failures are reported
//! and counted but never abort the batch; only output-directory setup and an
//! unreadable input directory are batch-fatal.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{info, warn};

use crate::pipeline::{process_image, PipelineError};
use crate::ConvertOptions;

/// Extensions recognized as batch candidates (matched case-insensitively).
const CANDIDATE_EXTENSIONS: &[&str] = &["jpg", "jpeg"];

/// Batch-fatal errors. Everything per-file is a [`PipelineError`] inside a
/// [`FileOutcome`] instead.
#[derive(Debug, Error)]
pub enum BatchError {
    /// The output directory could not be created
    #[error("Failed to create output directory {path}: {source}")]
    CreateOutputDir { path: PathBuf, source: io::Error },

    /// The input directory could not be listed
    #[error("Failed to read input directory {path}: {source}")]
    ReadInputDir { path: PathBuf, source: io::Error },
}

/// Outcome of one candidate file.
#[derive(Debug)]
pub struct FileOutcome {
    /// Path of the source file.
    pub path: PathBuf,
    /// Output file name on success, or the error that stopped this file.
    pub result: Result<String, PipelineError>,
}

impl FileOutcome {
    /// Whether this file converted successfully.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    /// Base name of the source file.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Aggregated result of a batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of candidate files found.
    pub candidates: usize,
    /// Number of candidates that converted successfully.
    pub succeeded: usize,
}

impl BatchSummary {
    /// Number of candidates that failed.
    pub fn failed(&self) -> usize {
        self.candidates - self.succeeded
    }
}

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// The input scan finished; `candidates` files will be processed.
    Scanned { candidates: usize },
    /// One candidate finished, successfully or not.
    Processed(&'a FileOutcome),
}

/// List the candidate files in `input_dir`, sorted by path.
///
/// Candidates are regular files whose extension matches `.jpg` or `.jpeg`
/// case-insensitively. Sorting makes the processing order deterministic:
/// directory listing order is platform-dependent, and on base-name
/// collisions (`img.jpg` + `img.jpeg`) the last file processed wins.
///
/// # Errors
///
/// Returns `BatchError::ReadInputDir` if the directory cannot be listed.
pub fn find_candidates(input_dir: &Path) -> Result<Vec<PathBuf>, BatchError> {
    let read_dir_error = |source| BatchError::ReadInputDir {
        path: input_dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(input_dir).map_err(read_dir_error)? {
        let path = entry.map_err(read_dir_error)?.path();
        if path.is_file() && has_candidate_extension(&path) {
            candidates.push(path);
        }
    }

    candidates.sort();
    Ok(candidates)
}

fn has_candidate_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            CANDIDATE_EXTENSIONS
                .iter()
                .any(|candidate| ext.eq_ignore_ascii_case(candidate))
        })
}

/// Run the batch: convert every candidate in `input_dir` into `output_dir`.
///
/// The output directory is created first (with parents, idempotently).
/// Candidates are then processed sequentially; each outcome is passed to
/// `on_event`, and per-file failures never abort the run.
///
/// # Arguments
///
/// * `input_dir` - Directory scanned for `.jpg`/`.jpeg` files
/// * `output_dir` - Directory PNG output is written into
/// * `options` - Shared immutable conversion configuration
/// * `on_event` - Called with [`BatchEvent`]s as the batch progresses
///
/// # Errors
///
/// Only setup problems are returned as errors: the output directory cannot
/// be created, or the input directory cannot be listed.
pub fn run_batch(
    input_dir: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
    mut on_event: impl FnMut(BatchEvent<'_>),
) -> Result<BatchSummary, BatchError> {
    fs::create_dir_all(output_dir).map_err(|source| BatchError::CreateOutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let candidates = find_candidates(input_dir)?;
    on_event(BatchEvent::Scanned {
        candidates: candidates.len(),
    });

    if candidates.is_empty() {
        info!("no candidate files in {}", input_dir.display());
        return Ok(BatchSummary::default());
    }

    let mut summary = BatchSummary {
        candidates: candidates.len(),
        succeeded: 0,
    };

    for path in &candidates {
        let result = process_image(path, output_dir, options);
        match &result {
            Ok(output_name) => {
                summary.succeeded += 1;
                info!("converted {} -> {output_name}", path.display());
            }
            Err(error) => warn!("failed to convert {}: {error}", path.display()),
        }

        let outcome = FileOutcome {
            path: path.clone(),
            result,
        };
        on_event(BatchEvent::Processed(&outcome));
    }

    Ok(summary)
}
