//! Test doubles shared by the unit tests of this crate.

use std::cell::Cell;
use std::collections::HashMap;

use lm_core::frame::GlyphMask;
use lm_core::traits::GlyphRasterizer;

/// Rasterizer whose glyphs light a fixed number of pixels, row-major.
pub(crate) struct FillRasterizer {
    font: String,
    fills: HashMap<char, usize>,
    calls: Cell<usize>,
}

impl FillRasterizer {
    pub(crate) fn new(font: &str, fills: &[(char, usize)]) -> Self {
        Self {
            font: font.to_string(),
            fills: fills.iter().copied().collect(),
            calls: Cell::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.get()
    }
}

impl GlyphRasterizer for FillRasterizer {
    fn font_id(&self) -> &str {
        &self.font
    }

    fn rasterize(&self, ch: char, size: usize) -> GlyphMask {
        self.calls.set(self.calls.get() + 1);
        let lit = self.fills.get(&ch).copied().unwrap_or(0);
        GlyphMask::from_fn(size, |row, col| row * size + col < lit)
    }
}
