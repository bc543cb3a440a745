//! Alpha compositing of an overlay onto an opaque base image.
//!
//! Uses the Porter-Duff "over" operator with straight (non-premultiplied)
//! alpha inputs and alpha-correct channel math. The base is promoted to RGBA
//! for the blend and flattened back to RGB afterwards, so the result carries
//! no alpha channel.

use image::{DynamicImage, Rgba, RgbImage, RgbaImage};

/// Composite an RGBA overlay onto an opaque RGB base with "over" blending.
///
/// Pixels with zero overlay alpha leave the base untouched byte-for-byte.
/// If the overlay dimensions differ from the base, only the shared region is
/// blended.
pub fn composite_over(base: &RgbImage, overlay: &RgbaImage) -> RgbImage {
    let mut canvas = DynamicImage::ImageRgb8(base.clone()).into_rgba8();

    let width = canvas.width().min(overlay.width());
    let height = canvas.height().min(overlay.height());

    for y in 0..height {
        for x in 0..width {
            let foreground = *overlay.get_pixel(x, y);
            if foreground[3] == 0 {
                continue;
            }

            let background = *canvas.get_pixel(x, y);
            canvas.put_pixel(x, y, blend_over(background, foreground));
        }
    }

    DynamicImage::ImageRgba8(canvas).into_rgb8()
}

/// Blend two pixels using the Porter-Duff "over" operator.
///
/// result = foreground * fg_alpha + background * bg_alpha * (1 - fg_alpha),
/// renormalized by the output alpha.
fn blend_over(background: Rgba<u8>, foreground: Rgba<u8>) -> Rgba<u8> {
    let fg_alpha = foreground[3] as f32 / 255.0;
    let bg_alpha = background[3] as f32 / 255.0;

    let out_alpha = fg_alpha + bg_alpha * (1.0 - fg_alpha);

    if out_alpha < 0.001 {
        return Rgba([0, 0, 0, 0]);
    }

    let blend_channel = |fg: u8, bg: u8| -> u8 {
        let fg = fg as f32 / 255.0;
        let bg = bg as f32 / 255.0;
        let result = (fg * fg_alpha + bg * bg_alpha * (1.0 - fg_alpha)) / out_alpha;
        (result * 255.0).round().clamp(0.0, 255.0) as u8
    };

    Rgba([
        blend_channel(foreground[0], background[0]),
        blend_channel(foreground[1], background[1]),
        blend_channel(foreground[2], background[2]),
        (out_alpha * 255.0).round() as u8,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid_base(width: u32, height: u32, color: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, image::Rgb(color))
    }

    #[test]
    fn test_transparent_overlay_is_identity() {
        let base = RgbImage::from_fn(16, 16, |x, y| image::Rgb([x as u8, y as u8, 42]));
        let overlay = RgbaImage::new(16, 16);

        let result = composite_over(&base, &overlay);
        assert_eq!(result.as_raw(), base.as_raw());
    }

    #[test]
    fn test_opaque_overlay_replaces_base() {
        let base = solid_base(8, 8, [0, 0, 0]);
        let overlay = RgbaImage::from_pixel(8, 8, Rgba([255, 255, 255, 255]));

        let result = composite_over(&base, &overlay);
        assert!(result.pixels().all(|p| p.0 == [255, 255, 255]));
    }

    #[test]
    fn test_half_alpha_white_over_black() {
        let base = solid_base(4, 4, [0, 0, 0]);
        let overlay = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 128]));

        let result = composite_over(&base, &overlay);
        let pixel = result.get_pixel(2, 2);

        // 128/255 of white over black is mid-gray
        assert!((pixel[0] as i32 - 128).abs() <= 1, "got {}", pixel[0]);
        assert_eq!(pixel[0], pixel[1]);
        assert_eq!(pixel[1], pixel[2]);
    }

    #[test]
    fn test_output_has_no_alpha_channel() {
        let base = solid_base(4, 4, [10, 20, 30]);
        let overlay = RgbaImage::from_pixel(4, 4, Rgba([200, 200, 200, 77]));

        let result = composite_over(&base, &overlay);
        assert_eq!(result.as_raw().len(), 4 * 4 * 3);
    }

    #[test]
    fn test_partial_overlay_blends_only_covered_pixels() {
        let base = solid_base(10, 10, [0, 0, 0]);
        let mut overlay = RgbaImage::new(10, 10);
        overlay.put_pixel(3, 3, Rgba([255, 255, 255, 255]));

        let result = composite_over(&base, &overlay);
        assert_eq!(result.get_pixel(3, 3).0, [255, 255, 255]);
        assert_eq!(result.get_pixel(4, 4).0, [0, 0, 0]);
    }

    #[test]
    fn test_mismatched_overlay_blends_shared_region() {
        let base = solid_base(10, 10, [0, 0, 0]);
        let overlay = RgbaImage::from_pixel(4, 4, Rgba([255, 0, 0, 255]));

        let result = composite_over(&base, &overlay);
        assert_eq!(result.get_pixel(0, 0).0, [255, 0, 0]);
        assert_eq!(result.get_pixel(5, 5).0, [0, 0, 0]);
    }

    #[test]
    fn test_blend_over_full_foreground() {
        let result = blend_over(Rgba([10, 20, 30, 255]), Rgba([200, 100, 50, 255]));
        assert_eq!(result.0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_blend_over_both_transparent() {
        let result = blend_over(Rgba([0, 0, 0, 0]), Rgba([0, 0, 0, 0]));
        assert_eq!(result.0, [0, 0, 0, 0]);
    }
}
