//! Fixed-canvas rotation for RGBA layers.
//!
//! Rotates about the exact canvas center without expanding the canvas, so
//! content near the corners is clipped. This is the behavior wanted for
//! watermark overlays: the layer must keep the dimensions of the image it
//! will be composited onto.
//!
//! The rotation uses inverse mapping: for each pixel in the output image,
//! we calculate which source pixel(s) contribute to it and interpolate
//! their values. Samples that fall outside the source stay fully
//! transparent.

use image::{Rgba, RgbaImage};

/// Rotate an RGBA image about its center, keeping the canvas size.
///
/// # Arguments
///
/// * `image` - Source layer to rotate
/// * `angle_degrees` - Rotation angle in degrees (positive = counter-clockwise)
///
/// # Returns
///
/// A new `RgbaImage` with the same dimensions as the source. Corners of the
/// rotated content that fall outside the canvas are clipped.
pub fn rotate_about_center(image: &RgbaImage, angle_degrees: f32) -> RgbaImage {
    // Fast path: no rotation needed
    if angle_degrees.abs() < 0.001 {
        return image.clone();
    }

    let (width, height) = image.dimensions();
    if width == 0 || height == 0 {
        return image.clone();
    }

    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    // Negate angle for correct visual rotation direction
    // (positive angle should rotate counter-clockwise visually)
    let angle_rad = -angle_degrees.to_radians();
    let cos = angle_rad.cos();
    let sin = angle_rad.sin();

    let mut output = RgbaImage::new(width, height);

    for dst_y in 0..height {
        for dst_x in 0..width {
            let dx = dst_x as f32 - center_x;
            let dy = dst_y as f32 - center_y;

            // Apply inverse rotation to find source coordinates
            let src_x = dx * cos - dy * sin + center_x;
            let src_y = dx * sin + dy * cos + center_y;

            if let Some(pixel) = sample_bilinear(image, src_x, src_y) {
                output.put_pixel(dst_x, dst_y, pixel);
            }
        }
    }

    output
}

/// Sample a pixel using bilinear interpolation over all four channels.
///
/// Returns `None` for out-of-bounds coordinates; the caller leaves those
/// destination pixels fully transparent.
fn sample_bilinear(image: &RgbaImage, x: f32, y: f32) -> Option<Rgba<u8>> {
    let (width, height) = image.dimensions();

    if x < 0.0 || y < 0.0 || x >= (width - 1) as f32 || y >= (height - 1) as f32 {
        return None;
    }

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = x0 + 1;
    let y1 = y0 + 1;

    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = image.get_pixel(x0, y0);
    let p10 = image.get_pixel(x1, y0);
    let p01 = image.get_pixel(x0, y1);
    let p11 = image.get_pixel(x1, y1);

    let mut result = [0u8; 4];
    for (channel, value) in result.iter_mut().enumerate() {
        let v = p00[channel] as f32 * (1.0 - fx) * (1.0 - fy)
            + p10[channel] as f32 * fx * (1.0 - fy)
            + p01[channel] as f32 * (1.0 - fx) * fy
            + p11[channel] as f32 * fx * fy;
        *value = v.round().clamp(0.0, 255.0) as u8;
    }

    Some(Rgba(result))
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (2u32..=64, 2u32..=64)
    }

    proptest! {
        /// Property: Rotation never changes the canvas dimensions.
        #[test]
        fn prop_dimensions_preserved(
            (width, height) in dimensions_strategy(),
            angle in -360.0f32..=360.0,
        ) {
            let layer = RgbaImage::from_pixel(width, height, Rgba([10, 20, 30, 200]));
            let rotated = rotate_about_center(&layer, angle);

            prop_assert_eq!(rotated.dimensions(), (width, height));
        }

        /// Property: A fully transparent layer stays fully transparent.
        #[test]
        fn prop_transparency_preserved(
            (width, height) in dimensions_strategy(),
            angle in -360.0f32..=360.0,
        ) {
            let layer = RgbaImage::new(width, height);
            let rotated = rotate_about_center(&layer, angle);

            prop_assert!(rotated.pixels().all(|p| p[3] == 0));
        }
    }
}
