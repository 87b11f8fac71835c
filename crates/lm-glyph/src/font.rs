use std::path::Path;

use ab_glyph::{Font, FontVec, PxScale, point};
use anyhow::{Context, Result};
use lm_core::frame::GlyphMask;
use lm_core::traits::GlyphRasterizer;

/// Coverage above which a rasterized pixel counts as "on".
const COVERAGE_THRESHOLD: f32 = 0.5;

/// Rasterise les glyphes d'une police TTF/OTF via ab_glyph.
///
/// Chaque glyphe est mis à l'échelle pour que la hauteur de ligne de la police
/// tienne dans la cellule, posé sur la ligne de base et centré horizontalement.
pub struct FontRasterizer {
    font: FontVec,
    name: String,
}

impl FontRasterizer {
    /// Parse font bytes.
    ///
    /// # Errors
    /// Retourne une erreur si la police fournie est invalide.
    ///
    /// # Example
    /// ```
    /// use lm_glyph::font::FontRasterizer;
    /// assert!(FontRasterizer::new(vec![0u8; 16], "broken").is_err());
    /// ```
    pub fn new(font_data: Vec<u8>, name: &str) -> Result<Self> {
        let font = FontVec::try_from_vec(font_data)
            .with_context(|| format!("Invalid font data for '{name}'"))?;
        Ok(Self {
            font,
            name: name.to_string(),
        })
    }

    /// Read and parse a font file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or is not a font.
    pub fn open(path: &Path, name: &str) -> Result<Self> {
        let data =
            std::fs::read(path).with_context(|| format!("Cannot read font {}", path.display()))?;
        let rasterizer = Self::new(data, name)?;
        log::info!("Font '{name}' loaded from {}", path.display());
        Ok(rasterizer)
    }
}

impl GlyphRasterizer for FontRasterizer {
    fn font_id(&self) -> &str {
        &self.name
    }

    #[allow(clippy::cast_possible_wrap)]
    fn rasterize(&self, ch: char, size: usize) -> GlyphMask {
        let mut mask = GlyphMask::new(size);
        let font = &self.font;

        // Skip characters not actually in the font (glyph_id 0 = .notdef)
        let gid = font.glyph_id(ch);
        if gid.0 == 0 {
            log::debug!("'{ch}' missing from font '{}', rendered blank", self.name);
            return mask;
        }

        let cell = size as f32;
        let scale = PxScale::from(cell);
        let height = font.height_unscaled();
        let ascent_px = font.ascent_unscaled() * scale.y / height;
        let advance_px = font.h_advance_unscaled(gid) * scale.x / height;
        let left = ((cell - advance_px) / 2.0).max(0.0);
        let glyph = gid.with_scale_and_position(scale, point(left, ascent_px));

        if let Some(outline) = font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            outline.draw(|x, y, v| {
                let px = x as i32 + bounds.min.x as i32;
                let py = y as i32 + bounds.min.y as i32;
                if v > COVERAGE_THRESHOLD
                    && (0..size as i32).contains(&px)
                    && (0..size as i32).contains(&py)
                {
                    mask.set(py as usize, px as usize, true);
                }
            });
        }
        mask
    }
}
