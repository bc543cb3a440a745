//! JPEG decoding with EXIF orientation handling.
//!
//! Decoded images are normalized to 8-bit RGB regardless of the source color
//! mode (grayscale, palette, RGBA sources all collapse to RGB). EXIF
//! orientation is applied by default so that crops are computed on the image
//! as a viewer would see it; [`decode_jpeg_no_orientation`] exposes the
//! uncorrected path.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader, RgbImage};
use thiserror::Error;

/// Error types for image decoding operations.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format: {0}")]
    InvalidFormat(String),

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    /// Normal (no transformation needed).
    #[default]
    Normal = 1,
    /// Horizontal flip.
    FlipHorizontal = 2,
    /// Rotate 180 degrees.
    Rotate180 = 3,
    /// Vertical flip.
    FlipVertical = 4,
    /// Transpose (flip horizontal + rotate 270 CW).
    Transpose = 5,
    /// Rotate 90 degrees clockwise.
    Rotate90CW = 6,
    /// Transverse (flip horizontal + rotate 90 CW).
    Transverse = 7,
    /// Rotate 270 degrees clockwise (90 CCW).
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            1 => Orientation::Normal,
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Decode a JPEG image from bytes, applying EXIF orientation correction.
///
/// # Arguments
///
/// * `bytes` - Raw JPEG file bytes
///
/// # Returns
///
/// An [`RgbImage`] with correct orientation applied.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` if the container is not recognized.
/// Returns `DecodeError::CorruptedFile` if the image data cannot be decoded.
pub fn decode_jpeg(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    // Extract EXIF orientation before decoding; the decoder does not apply it
    let orientation = extract_orientation(bytes);

    let img = decode_to_dynamic(bytes)?;
    let oriented = apply_orientation(img, orientation);

    Ok(oriented.into_rgb8())
}

/// Decode a JPEG image from bytes without applying EXIF orientation.
///
/// Use this when the image is already correctly oriented or orientation is
/// handled separately.
pub fn decode_jpeg_no_orientation(bytes: &[u8]) -> Result<RgbImage, DecodeError> {
    Ok(decode_to_dynamic(bytes)?.into_rgb8())
}

/// Extract the EXIF orientation value from JPEG bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or the orientation
/// cannot be determined.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

fn decode_to_dynamic(bytes: &[u8]) -> Result<DynamicImage, DecodeError> {
    let cursor = Cursor::new(bytes);
    let reader = ImageReader::new(cursor)
        .with_guessed_format()
        .map_err(|e| DecodeError::InvalidFormat(e.to_string()))?;

    reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))
}

fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Some(value) = field.value.get_uint(0) {
                    return Orientation::from(value);
                }
            }
            Orientation::Normal
        }
        Err(_) => Orientation::Normal,
    }
}

/// Apply an EXIF orientation transformation to a decoded image.
fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
