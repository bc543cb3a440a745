//! Watermark compositing.
//!
//! Overlays diagonal semi-transparent text centered on an image. The overlay
//! is rendered on a transparent layer the same size as the target, rotated
//! about the canvas center without expanding the canvas (clipped corners are
//! intentional), then alpha-composited onto the base image and flattened
//! back to opaque RGB.
//!
//! Fonts are resolved through a best-effort fallback chain (bold system
//! fonts, then regular weights, then a built-in bitmap font), so rendering
//! never fails for lack of a font.

mod composite;
mod font;
mod render;
mod rotate;

pub use composite::composite_over;
pub use font::{resolve_font, ResolvedFont};
pub use rotate::rotate_about_center;

use image::RgbImage;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during watermark compositing.
#[derive(Debug, Error)]
pub enum WatermarkError {
    /// The target image has a zero dimension
    #[error("Cannot watermark an empty image")]
    EmptyCanvas,
}

/// Immutable watermark configuration.
///
/// The font itself is not part of the value; it is resolved at render time
/// via the fallback chain in [`resolve_font`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkSpec {
    /// Text to overlay.
    pub text: String,
    /// Alpha value for the text pixels (0 = invisible, 255 = opaque).
    pub opacity: u8,
    /// Rotation of the text layer in degrees, positive = counter-clockwise.
    pub angle_degrees: f32,
    /// Font size in pixels.
    pub font_size: f32,
}

impl WatermarkSpec {
    /// Default opacity for watermark text.
    pub const DEFAULT_OPACITY: u8 = 50;
    /// Default rotation angle in degrees.
    pub const DEFAULT_ANGLE_DEGREES: f32 = 45.0;
    /// Default font size in pixels.
    pub const DEFAULT_FONT_SIZE: f32 = 80.0;

    /// Create a spec with the given text and default opacity, angle, and
    /// font size.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Default for WatermarkSpec {
    fn default() -> Self {
        Self {
            text: "Zeno".to_string(),
            opacity: Self::DEFAULT_OPACITY,
            angle_degrees: Self::DEFAULT_ANGLE_DEGREES,
            font_size: Self::DEFAULT_FONT_SIZE,
        }
    }
}

/// Composite a rotated text watermark onto an image.
///
/// The input image is not mutated; a new composited image is returned. The
/// output is opaque RGB even though compositing happens in RGBA internally.
/// Empty watermark text yields a copy of the input.
///
/// # Errors
///
/// Returns `WatermarkError::EmptyCanvas` if the image has a zero dimension.
/// Font resolution failures are recovered internally and never surface.
pub fn apply_watermark(image: &RgbImage, spec: &WatermarkSpec) -> Result<RgbImage, WatermarkError> {
    let font = font::resolve_font();
    let overlay = render::render_text_layer(image.width(), image.height(), spec, &font)?;
    let rotated = rotate::rotate_about_center(&overlay, spec.angle_degrees);
    Ok(composite::composite_over(image, &rotated))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn black_image(edge: u32) -> RgbImage {
        RgbImage::from_pixel(edge, edge, image::Rgb([0, 0, 0]))
    }

    #[test]
    fn test_spec_defaults() {
        let spec = WatermarkSpec::default();
        assert_eq!(spec.text, "Zeno");
        assert_eq!(spec.opacity, 50);
        assert_eq!(spec.angle_degrees, 45.0);
        assert_eq!(spec.font_size, 80.0);
    }

    #[test]
    fn test_spec_new_keeps_defaults() {
        let spec = WatermarkSpec::new("Sample");
        assert_eq!(spec.text, "Sample");
        assert_eq!(spec.opacity, WatermarkSpec::DEFAULT_OPACITY);
    }

    #[test]
    fn test_apply_watermark_preserves_dimensions() {
        let img = black_image(120);
        let result = apply_watermark(&img, &WatermarkSpec::default()).unwrap();

        assert_eq!(result.dimensions(), (120, 120));
    }

    #[test]
    fn test_apply_watermark_adds_visible_pixels() {
        let img = black_image(200);
        let spec = WatermarkSpec {
            opacity: 255,
            ..WatermarkSpec::new("XX")
        };
        let result = apply_watermark(&img, &spec).unwrap();

        let lit = result.pixels().filter(|p| p[0] > 0).count();
        assert!(lit > 0, "watermark should brighten some pixels");
    }

    #[test]
    fn test_apply_watermark_opacity_zero_is_identity() {
        let img = RgbImage::from_fn(64, 64, |x, y| image::Rgb([x as u8, y as u8, 77]));
        let spec = WatermarkSpec {
            opacity: 0,
            ..WatermarkSpec::default()
        };
        let result = apply_watermark(&img, &spec).unwrap();

        assert_eq!(result.as_raw(), img.as_raw());
    }

    #[test]
    fn test_apply_watermark_full_opacity_has_opaque_white() {
        let img = black_image(300);
        let spec = WatermarkSpec {
            opacity: 255,
            ..WatermarkSpec::new("X")
        };
        let result = apply_watermark(&img, &spec).unwrap();

        // Stroke interiors survive rotation with full coverage
        let pure_white = result.pixels().any(|p| p.0 == [255, 255, 255]);
        assert!(pure_white, "full opacity should produce unblended text pixels");
    }

    #[test]
    fn test_apply_watermark_empty_text_is_identity() {
        let img = RgbImage::from_fn(32, 32, |x, y| image::Rgb([x as u8, y as u8, 5]));
        let spec = WatermarkSpec::new("");
        let result = apply_watermark(&img, &spec).unwrap();

        assert_eq!(result.as_raw(), img.as_raw());
    }

    #[test]
    fn test_apply_watermark_does_not_mutate_input() {
        let img = black_image(100);
        let copy = img.clone();
        let _ = apply_watermark(&img, &WatermarkSpec::default()).unwrap();

        assert_eq!(img.as_raw(), copy.as_raw());
    }

    #[test]
    fn test_apply_watermark_empty_canvas_error() {
        let img = RgbImage::new(0, 0);
        let result = apply_watermark(&img, &WatermarkSpec::default());

        assert!(matches!(result, Err(WatermarkError::EmptyCanvas)));
    }
}
