//! Best-effort font resolution.
//!
//! Watermark text prefers a bold system font, falls back to a regular
//! weight, and finally to a built-in 8x8 bitmap font that is always
//! available. Candidate failures are logged at debug level and fall through
//! to the next candidate; resolution as a whole never fails.

use std::fs;
use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use font8x8::legacy::BASIC_LEGACY;
use tracing::debug;

/// Bold candidates, tried first. Paths cover the usual install locations on
/// macOS, Windows, and Linux (msttcorefonts plus the DejaVu equivalent).
const BOLD_FONT_CANDIDATES: &[&str] = &[
    "/Library/Fonts/Arial Bold.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial_Bold.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
];

/// Regular-weight candidates, tried after the bold tier.
const REGULAR_FONT_CANDIDATES: &[&str] = &[
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
    "/usr/share/fonts/truetype/msttcorefonts/Arial.ttf",
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
];

/// Edge length of a bitmap font glyph cell before scaling.
pub(crate) const BITMAP_GLYPH_EDGE: u32 = 8;

/// A font usable for watermark rendering.
pub enum ResolvedFont {
    /// An outline font loaded from a system font file.
    Outline {
        /// Path the font was loaded from, for diagnostics.
        path: String,
        /// The parsed font.
        font: FontVec,
    },
    /// The built-in 8x8 bitmap font; always available.
    Bitmap,
}

impl std::fmt::Debug for ResolvedFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Outline { path, .. } => f.debug_struct("Outline").field("path", path).finish(),
            Self::Bitmap => f.write_str("Bitmap"),
        }
    }
}

impl ResolvedFont {
    /// Measure rendered text, returning (width, height) in pixels.
    ///
    /// Outline fonts measure via glyph advances plus kerning and the scaled
    /// line height; the bitmap font measures via its fixed cell size and
    /// integer scale. Both return the same semantic result: the pixel size
    /// of the text as this font renders it.
    pub fn measure(&self, text: &str, font_size: f32) -> (u32, u32) {
        match self {
            Self::Outline { font, .. } => {
                let scale = PxScale::from(font_size);
                let scaled = font.as_scaled(scale);

                let mut width = 0.0f32;
                let mut prev_glyph: Option<ab_glyph::GlyphId> = None;

                for c in text.chars() {
                    let glyph_id = scaled.glyph_id(c);
                    if let Some(prev) = prev_glyph {
                        width += scaled.kern(prev, glyph_id);
                    }
                    width += scaled.h_advance(glyph_id);
                    prev_glyph = Some(glyph_id);
                }

                (width.ceil() as u32, scaled.height().ceil() as u32)
            }
            Self::Bitmap => {
                let cell = BITMAP_GLYPH_EDGE * bitmap_scale(font_size);
                (text.chars().count() as u32 * cell, cell)
            }
        }
    }
}

/// Resolve a watermark font via the fallback chain.
///
/// Tries bold system fonts, then regular weights, then falls back to the
/// built-in bitmap font. Never fails.
pub fn resolve_font() -> ResolvedFont {
    for path in BOLD_FONT_CANDIDATES.iter().chain(REGULAR_FONT_CANDIDATES) {
        match load_outline_font(Path::new(path)) {
            Ok(font) => {
                debug!("resolved watermark font: {path}");
                return ResolvedFont::Outline {
                    path: (*path).to_string(),
                    font,
                };
            }
            Err(reason) => debug!("font candidate {path} unavailable: {reason}"),
        }
    }

    debug!("no system font available, using built-in bitmap font");
    ResolvedFont::Bitmap
}

fn load_outline_font(path: &Path) -> Result<FontVec, String> {
    let data = fs::read(path).map_err(|e| e.to_string())?;
    FontVec::try_from_vec(data).map_err(|e| e.to_string())
}

/// Integer scale factor that brings the 8x8 bitmap glyphs close to the
/// requested font size.
pub(crate) fn bitmap_scale(font_size: f32) -> u32 {
    ((font_size / BITMAP_GLYPH_EDGE as f32).round() as u32).max(1)
}

/// Look up the bitmap glyph for a character; non-ASCII characters render as
/// `?`.
pub(crate) fn bitmap_glyph(c: char) -> [u8; 8] {
    let index = c as usize;
    if index < BASIC_LEGACY.len() {
        BASIC_LEGACY[index]
    } else {
        BASIC_LEGACY[b'?' as usize]
    }
}
