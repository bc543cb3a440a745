//! Per-image transform pipeline.
//!
//! Runs one source file through decode, crop, resize, optional watermark,
//! and PNG output. Every failure is captured as a [`PipelineError`] at this
//! boundary; nothing panics across it and no partial output is written for
//! failures before the final write.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::decode::{self, DecodeError};
use crate::encode::{self, EncodeError};
use crate::transform::{self, TransformError};
use crate::watermark::{self, WatermarkError};
use crate::ConvertOptions;

/// Errors for a single pipeline invocation. All are per-file and non-fatal
/// to a batch.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The source file could not be read
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source bytes could not be decoded
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Resizing was asked for unusable dimensions
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// Watermark compositing failed
    #[error(transparent)]
    Watermark(#[from] WatermarkError),

    /// PNG encoding failed
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The encoded output could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The source path has no usable file name
    #[error("Source file has no usable name: {path}")]
    InvalidFileName { path: PathBuf },
}

/// Process one image: decode, center-crop to a square, resize, optionally
/// watermark, and write the result as PNG into `output_dir`.
///
/// # Arguments
///
/// * `source_path` - Path to the source JPEG file
/// * `output_dir` - Directory the PNG is written into (must already exist)
/// * `options` - Target size and optional watermark
///
/// # Returns
///
/// The output file name (source base name with a `.png` extension).
pub fn process_image(
    source_path: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> Result<String, PipelineError> {
    let bytes = fs::read(source_path).map_err(|source| PipelineError::Read {
        path: source_path.to_path_buf(),
        source,
    })?;

    let image = decode::decode_jpeg(&bytes)?;

    let cropped = transform::crop_to_square(&image);
    let mut result = transform::resize_exact(&cropped, options.size)?;

    if let Some(spec) = &options.watermark {
        result = watermark::apply_watermark(&result, spec)?;
    }

    let output_name = output_file_name(source_path)?;
    let png = encode::encode_png(result.as_raw(), result.width(), result.height())?;

    let output_path = output_dir.join(&output_name);
    fs::write(&output_path, png).map_err(|source| PipelineError::Write {
        path: output_path.clone(),
        source,
    })?;

    Ok(output_name)
}

/// Derive the output file name: source base name with a `.png` extension.
pub fn output_file_name(source_path: &Path) -> Result<String, PipelineError> {
    let stem = source_path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| PipelineError::InvalidFileName {
            path: source_path.to_path_buf(),
        })?;

    Ok(format!("{stem}.png"))
}
