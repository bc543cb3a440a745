//! Center-crop geometry.
//!
//! Computes the largest centered square inscribed in a source image. The
//! resulting box is expressed in pixel coordinates with the origin at the
//! top-left corner, matching the convention of the `image` crate.

use serde::{Deserialize, Serialize};

/// A square crop region within a source image.
///
/// Coordinates are half-open: `left..right` columns and `top..bottom` rows
/// belong to the region. For every box produced by [`CropBox::centered_square`],
/// `right - left == bottom - top` and the box lies fully within the source
/// bounds it was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropBox {
    /// Left edge (inclusive).
    pub left: u32,
    /// Top edge (inclusive).
    pub top: u32,
    /// Right edge (exclusive).
    pub right: u32,
    /// Bottom edge (exclusive).
    pub bottom: u32,
}

impl CropBox {
    /// Compute the largest centered square crop for a source of the given
    /// dimensions.
    ///
    /// For landscape sources the square spans the full height and is centered
    /// horizontally; for portrait (and square) sources it spans the full
    /// width and is centered vertically. Division truncates, so when the
    /// margin is odd the extra pixel ends up on the right/bottom side.
    ///
    /// Dimensions from a successfully decoded image are always positive, so
    /// there are no error conditions.
    pub fn centered_square(width: u32, height: u32) -> Self {
        if width > height {
            let left = (width - height) / 2;
            Self {
                left,
                top: 0,
                right: left + height,
                bottom: height,
            }
        } else {
            let top = (height - width) / 2;
            Self {
                left: 0,
                top,
                right: width,
                bottom: top + width,
            }
        }
    }

    /// Width of the region in pixels.
    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    /// Height of the region in pixels.
    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landscape_crop() {
        // 1200x800: square of edge 800 centered on the wide axis
        let crop = CropBox::centered_square(1200, 800);
        assert_eq!(crop.left, 200);
        assert_eq!(crop.top, 0);
        assert_eq!(crop.right, 1000);
        assert_eq!(crop.bottom, 800);
    }

    #[test]
    fn test_portrait_crop() {
        let crop = CropBox::centered_square(800, 1200);
        assert_eq!(crop.left, 0);
        assert_eq!(crop.top, 200);
        assert_eq!(crop.right, 800);
        assert_eq!(crop.bottom, 1000);
    }

    #[test]
    fn test_square_source_is_identity() {
        let crop = CropBox::centered_square(640, 640);
        assert_eq!(crop.left, 0);
        assert_eq!(crop.top, 0);
        assert_eq!(crop.right, 640);
        assert_eq!(crop.bottom, 640);
    }

    #[test]
    fn test_odd_margin_truncates() {
        // 5x2: margin is 3, so left = 1 and the extra pixel sits on the right
        let crop = CropBox::centered_square(5, 2);
        assert_eq!(crop.left, 1);
        assert_eq!(crop.right, 3);
        assert_eq!(crop.width(), 2);
    }

    #[test]
    fn test_one_pixel_source() {
        let crop = CropBox::centered_square(1, 1);
        assert_eq!(crop.width(), 1);
        assert_eq!(crop.height(), 1);
    }

    #[test]
    fn test_extreme_aspect_ratio() {
        let crop = CropBox::centered_square(10_000, 1);
        assert_eq!(crop.width(), 1);
        assert_eq!(crop.height(), 1);
        assert_eq!(crop.left, 4999);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
