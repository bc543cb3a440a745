//! Text layer rendering.
//!
//! Draws watermark text onto a fully transparent RGBA layer the same size as
//! the target image, centered, in white with the configured opacity as the
//! alpha value. Text wider than the canvas is clipped, not an error.

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};

use super::font::{bitmap_glyph, bitmap_scale, ResolvedFont, BITMAP_GLYPH_EDGE};
use super::{WatermarkError, WatermarkSpec};

/// Render the watermark text onto a transparent layer of the given size.
///
/// The text is centered: `x = (width - text_width) / 2` and likewise for
/// `y`. Empty text produces a fully transparent layer.
///
/// # Errors
///
/// Returns `WatermarkError::EmptyCanvas` if either dimension is zero.
pub(crate) fn render_text_layer(
    width: u32,
    height: u32,
    spec: &WatermarkSpec,
    font: &ResolvedFont,
) -> Result<RgbaImage, WatermarkError> {
    if width == 0 || height == 0 {
        return Err(WatermarkError::EmptyCanvas);
    }

    let mut layer = RgbaImage::new(width, height);
    if spec.text.is_empty() {
        return Ok(layer);
    }

    let (text_width, text_height) = font.measure(&spec.text, spec.font_size);
    let origin_x = (width as i32 - text_width as i32) / 2;
    let origin_y = (height as i32 - text_height as i32) / 2;

    match font {
        ResolvedFont::Outline { font, .. } => {
            draw_outline_text(&mut layer, font, spec, origin_x, origin_y);
        }
        ResolvedFont::Bitmap => {
            draw_bitmap_text(&mut layer, spec, origin_x, origin_y);
        }
    }

    Ok(layer)
}

/// Rasterize outline glyphs onto the layer.
///
/// Glyph coverage is scaled by the configured opacity; overlapping
/// anti-aliased edges keep the strongest alpha. The color is always white.
fn draw_outline_text(
    layer: &mut RgbaImage,
    font: &FontVec,
    spec: &WatermarkSpec,
    origin_x: i32,
    origin_y: i32,
) {
    let scale = PxScale::from(spec.font_size);
    let scaled = font.as_scaled(scale);

    let baseline_y = origin_y as f32 + scaled.ascent();
    let mut cursor_x = origin_x as f32;
    let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

    for c in spec.text.chars() {
        let glyph_id = scaled.glyph_id(c);

        if let Some(prev) = prev_glyph {
            cursor_x += scaled.kern(prev, glyph_id);
        }

        let glyph = glyph_id.with_scale_and_position(scale, point(cursor_x, baseline_y));

        if let Some(outlined) = font.outline_glyph(glyph) {
            let bounds = outlined.px_bounds();

            outlined.draw(|px, py, coverage| {
                let x = px as i32 + bounds.min.x as i32;
                let y = py as i32 + bounds.min.y as i32;

                if x < 0 || y < 0 || x >= layer.width() as i32 || y >= layer.height() as i32 {
                    return;
                }

                let alpha = (coverage * spec.opacity as f32).round() as u8;
                if alpha == 0 {
                    return;
                }

                let existing = layer.get_pixel(x as u32, y as u32)[3];
                layer.put_pixel(x as u32, y as u32, Rgba([255, 255, 255, alpha.max(existing)]));
            });
        }

        cursor_x += scaled.h_advance(glyph_id);
        prev_glyph = Some(glyph_id);
    }
}

/// Draw bitmap glyphs, scaling each 8x8 cell up to the requested size.
fn draw_bitmap_text(layer: &mut RgbaImage, spec: &WatermarkSpec, origin_x: i32, origin_y: i32) {
    if spec.opacity == 0 {
        return;
    }

    let scale = bitmap_scale(spec.font_size);
    let cell = BITMAP_GLYPH_EDGE * scale;
    let pixel = Rgba([255, 255, 255, spec.opacity]);

    for (index, c) in spec.text.chars().enumerate() {
        let glyph = bitmap_glyph(c);
        let glyph_x = origin_x + (index as u32 * cell) as i32;

        for (row_index, row) in glyph.iter().copied().enumerate() {
            for col in 0..BITMAP_GLYPH_EDGE {
                if (row >> col) & 1 == 0 {
                    continue;
                }

                // Fill the scale x scale block for this font pixel
                for sub_y in 0..scale {
                    for sub_x in 0..scale {
                        let x = glyph_x + (col * scale + sub_x) as i32;
                        let y = origin_y + (row_index as u32 * scale + sub_y) as i32;

                        if x < 0 || y < 0 || x >= layer.width() as i32 || y >= layer.height() as i32
                        {
                            continue;
                        }

                        layer.put_pixel(x as u32, y as u32, pixel);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec(text: &str, opacity: u8) -> WatermarkSpec {
        WatermarkSpec {
            opacity,
            ..WatermarkSpec::new(text)
        }
    }

    #[test]
    fn test_layer_matches_requested_dimensions() {
        let layer = render_text_layer(120, 80, &spec("Hi", 50), &ResolvedFont::Bitmap).unwrap();
        assert_eq!(layer.dimensions(), (120, 80));
    }

    #[test]
    fn test_empty_text_is_fully_transparent() {
        let layer = render_text_layer(64, 64, &spec("", 50), &ResolvedFont::Bitmap).unwrap();
        assert!(layer.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_text_pixels_are_white_at_configured_alpha() {
        let layer = render_text_layer(200, 200, &spec("AB", 50), &ResolvedFont::Bitmap).unwrap();

        let inked: Vec<_> = layer.pixels().filter(|p| p[3] > 0).collect();
        assert!(!inked.is_empty());
        assert!(inked.iter().all(|p| p.0 == [255, 255, 255, 50]));
    }

    #[test]
    fn test_zero_opacity_draws_nothing() {
        let layer = render_text_layer(200, 200, &spec("AB", 0), &ResolvedFont::Bitmap).unwrap();
        assert!(layer.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_text_is_roughly_centered() {
        let layer = render_text_layer(400, 400, &spec("X", 255), &ResolvedFont::Bitmap).unwrap();

        let (mut min_x, mut max_x, mut min_y, mut max_y) = (u32::MAX, 0u32, u32::MAX, 0u32);
        for (x, y, p) in layer.enumerate_pixels() {
            if p[3] > 0 {
                min_x = min_x.min(x);
                max_x = max_x.max(x);
                min_y = min_y.min(y);
                max_y = max_y.max(y);
            }
        }

        let center_x = (min_x + max_x) as i64 / 2;
        let center_y = (min_y + max_y) as i64 / 2;
        // The ink centroid sits near the canvas center (glyphs are not
        // symmetric inside their cells, so allow a cell of slack)
        assert!((center_x - 200).abs() < 80, "center_x = {center_x}");
        assert!((center_y - 200).abs() < 80, "center_y = {center_y}");
    }

    #[test]
    fn test_oversized_text_is_clipped_not_an_error() {
        // 10 glyphs at 80px cells on a 64px canvas
        let layer =
            render_text_layer(64, 64, &spec("ABCDEFGHIJ", 255), &ResolvedFont::Bitmap).unwrap();
        assert_eq!(layer.dimensions(), (64, 64));
    }

    #[test]
    fn test_zero_canvas_is_an_error() {
        let result = render_text_layer(0, 64, &spec("A", 255), &ResolvedFont::Bitmap);
        assert!(matches!(result, Err(WatermarkError::EmptyCanvas)));
    }

    #[test]
    fn test_outline_font_renders_when_available() {
        // Exercises the outline path on hosts that have a system font; on
        // hosts without one this still covers the bitmap path.
        let font = crate::watermark::font::resolve_font();
        let layer = render_text_layer(300, 300, &spec("Zeno", 255), &font).unwrap();

        assert!(layer.pixels().any(|p| p[3] > 0));
    }
}
