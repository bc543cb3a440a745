//! Cropping and resizing operations.
//!
//! Both operations return new images without modifying their input. Resizing
//! uses Lanczos3 resampling, which keeps thumbnails free of the aliasing
//! that nearest-neighbor scaling would introduce.

use image::imageops::{self, FilterType};
use image::RgbImage;
use thiserror::Error;

use crate::geometry::CropBox;
use crate::TargetSize;

/// Errors for transform operations.
#[derive(Debug, Error)]
pub enum TransformError {
    /// Width or height of the requested output is zero.
    #[error("Invalid target dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },
}

/// Crop an image to its largest centered square.
///
/// The crop region is computed by [`CropBox::centered_square`] from the
/// image's own dimensions, so the result is always valid.
pub fn crop_to_square(image: &RgbImage) -> RgbImage {
    let crop = CropBox::centered_square(image.width(), image.height());

    // Fast path: already square
    if crop.width() == image.width() && crop.height() == image.height() {
        return image.clone();
    }

    imageops::crop_imm(image, crop.left, crop.top, crop.width(), crop.height()).to_image()
}

/// Resize an image to exact dimensions with Lanczos3 resampling.
///
/// # Errors
///
/// Returns `TransformError::InvalidDimensions` if either target dimension is
/// zero.
pub fn resize_exact(image: &RgbImage, size: TargetSize) -> Result<RgbImage, TransformError> {
    if !size.is_valid() {
        return Err(TransformError::InvalidDimensions {
            width: size.width,
            height: size.height,
        });
    }

    // Fast path: if dimensions match, just clone
    if image.dimensions() == (size.width, size.height) {
        return Ok(image.clone());
    }

    Ok(imageops::resize(
        image,
        size.width,
        size.height,
        FilterType::Lanczos3,
    ))
}
