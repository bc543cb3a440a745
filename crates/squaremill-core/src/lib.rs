//! Squaremill Core - Batch image conversion library
//!
//! This crate provides the core functionality for Squaremill: decoding JPEG
//! sources, center-cropping to a square, resizing, watermark compositing,
//! PNG encoding, and the per-directory batch orchestration that ties the
//! steps together.

pub mod batch;
pub mod decode;
pub mod encode;
pub mod geometry;
pub mod pipeline;
pub mod transform;
pub mod watermark;

pub use batch::{find_candidates, run_batch, BatchError, BatchEvent, BatchSummary, FileOutcome};
pub use geometry::CropBox;
pub use pipeline::{process_image, PipelineError};
pub use watermark::{apply_watermark, WatermarkSpec};

/// Pixel dimensions of converted output images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TargetSize {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
}

impl TargetSize {
    /// Default edge length for square thumbnails.
    pub const DEFAULT_EDGE: u32 = 500;

    /// Create a new TargetSize with explicit dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Create a square TargetSize with the given edge length.
    pub fn square(edge: u32) -> Self {
        Self::new(edge, edge)
    }

    /// Check that both dimensions are usable (non-zero).
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

impl Default for TargetSize {
    fn default() -> Self {
        Self::square(Self::DEFAULT_EDGE)
    }
}

/// Immutable configuration for one conversion run.
///
/// Passed by reference into the batch orchestrator and the per-image
/// pipeline; nothing in the library mutates it.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ConvertOptions {
    /// Dimensions of the output images.
    pub size: TargetSize,
    /// Watermark to composite onto each image, if any.
    pub watermark: Option<WatermarkSpec>,
}

impl ConvertOptions {
    /// Create options for plain conversion at the given size.
    pub fn new(size: TargetSize) -> Self {
        Self {
            size,
            watermark: None,
        }
    }

    /// Create options that also apply the given watermark.
    pub fn with_watermark(size: TargetSize, watermark: WatermarkSpec) -> Self {
        Self {
            size,
            watermark: Some(watermark),
        }
    }
}
