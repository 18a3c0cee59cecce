//! Label fonts: a preferred scalable font with a built-in bitmap fallback

use super::builtin_font::{GLYPH_ADVANCE, GLYPH_HEIGHT, GLYPH_WIDTH, glyph};
use crate::error::{Error, Result};
use ab_glyph::{FontVec, PxScale};
use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;
use std::fs;
use std::path::Path;

/// Pixel size that maps to one bitmap pixel per glyph dot
const BUILTIN_UNIT: f32 = 10.0;

/// A font used for the text lines under the QR code
pub enum LabelFont {
    /// TrueType/OpenType font loaded from disk
    Scalable {
        /// Parsed font data
        font: FontVec,
        /// Rendering size
        scale: PxScale,
    },
    /// Built-in 5x7 bitmap font
    Builtin {
        /// Integer magnification of each glyph dot
        magnify: u32,
    },
}

impl LabelFont {
    /// Load `path` at `size` pixels, falling back to the built-in font on any failure.
    pub fn load_or_builtin(path: Option<&Path>, size: f32) -> Self {
        let Some(path) = path else {
            return Self::builtin(size);
        };

        match Self::load(path, size) {
            Ok(font) => font,
            Err(err) => {
                tracing::warn!(
                    font = %path.display(),
                    error = %err,
                    "Falling back to built-in font"
                );
                Self::builtin(size)
            }
        }
    }

    /// Load a scalable font from `path`.
    pub fn load(path: &Path, size: f32) -> Result<Self> {
        let bytes = fs::read(path)
            .map_err(|e| Error::Font(format!("Failed to read {}: {e}", path.display())))?;
        let font = FontVec::try_from_vec(bytes)
            .map_err(|e| Error::Font(format!("Failed to parse {}: {e}", path.display())))?;

        Ok(Self::Scalable {
            font,
            scale: PxScale::from(size),
        })
    }

    /// Built-in bitmap font magnified to roughly `size` pixels.
    pub fn builtin(size: f32) -> Self {
        let magnify = (size / BUILTIN_UNIT).round().max(1.0) as u32;
        Self::Builtin { magnify }
    }

    /// Whether this is the built-in fallback font
    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin { .. })
    }

    /// Width and height of the bounding box of `text`.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self {
            Self::Scalable { font, scale } => text_size(*scale, font, text),
            Self::Builtin { magnify } => {
                let chars = text.chars().count() as u32;
                if chars == 0 {
                    return (0, 0);
                }
                let width = (chars * GLYPH_ADVANCE - 1) * magnify;
                (width, GLYPH_HEIGHT * magnify)
            }
        }
    }

    /// Draw `text` with its top-left corner at (`x`, `y`).
    pub fn draw(&self, canvas: &mut RgbImage, color: Rgb<u8>, x: i32, y: i32, text: &str) {
        match self {
            Self::Scalable { font, scale } => {
                draw_text_mut(canvas, color, x, y, *scale, font, text);
            }
            Self::Builtin { magnify } => {
                let dot = *magnify as i32;
                for (index, ch) in text.chars().enumerate() {
                    let left = x + (index as i32) * (GLYPH_ADVANCE as i32) * dot;
                    for (col, bits) in glyph(ch).iter().enumerate().take(GLYPH_WIDTH as usize) {
                        for row in 0..GLYPH_HEIGHT as i32 {
                            if bits & (1 << row) == 0 {
                                continue;
                            }
                            let rect = Rect::at(left + col as i32 * dot, y + row * dot)
                                .of_size(*magnify, *magnify);
                            draw_filled_rect_mut(canvas, rect, color);
                        }
                    }
                }
            }
        }
    }
}

impl std::fmt::Debug for LabelFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scalable { scale, .. } => f
                .debug_struct("Scalable")
                .field("scale", &scale.y)
                .finish_non_exhaustive(),
            Self::Builtin { magnify } => f
                .debug_struct("Builtin")
                .field("magnify", magnify)
                .finish(),
        }
    }
}
