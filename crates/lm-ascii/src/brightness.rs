use lm_core::color::normalized_luma;
use lm_core::frame::{GlyphMask, Rgb};

/// Brillance moyenne d'un bloc de pixels, pondération BT.709, ∈ [0.0, 1.0].
///
/// An empty block scores 0.0.
///
/// # Example
/// ```
/// use lm_core::frame::Rgb;
/// use lm_ascii::brightness::block_brightness;
/// assert_eq!(block_brightness(&[Rgb::BLACK; 4]), 0.0);
/// assert!((block_brightness(&[Rgb::WHITE; 4]) - 1.0).abs() < 1e-9);
/// ```
#[must_use]
pub fn block_brightness(block: &[Rgb]) -> f64 {
    if block.is_empty() {
        return 0.0;
    }
    let sum: f64 = block.iter().map(|p| normalized_luma(p.r, p.g, p.b)).sum();
    sum / block.len() as f64
}

/// Fraction of set pixels in a glyph mask.
///
/// # Example
/// ```
/// use lm_core::frame::GlyphMask;
/// use lm_ascii::brightness::glyph_brightness;
/// let half = GlyphMask::from_fn(16, |row, _| row < 8);
/// assert_eq!(glyph_brightness(&half), 0.5);
/// ```
#[must_use]
pub fn glyph_brightness(mask: &GlyphMask) -> f64 {
    let area = mask.size() * mask.size();
    if area == 0 {
        return 0.0;
    }
    mask.count_set() as f64 / area as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use lm_core::frame::GLYPH_SIZE;

    #[test]
    fn block_brightness_averages_pixels() {
        let block = [Rgb::grey(0), Rgb::grey(0), Rgb::grey(255), Rgb::grey(255)];
        assert!((block_brightness(&block) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn block_brightness_uses_luma_weights() {
        let red = block_brightness(&[Rgb::new(255, 0, 0)]);
        let green = block_brightness(&[Rgb::new(0, 255, 0)]);
        assert!((red - 0.2126).abs() < 1e-9);
        assert!((green - 0.7152).abs() < 1e-9);
    }

    #[test]
    fn glyph_brightness_extremes() {
        assert_eq!(glyph_brightness(&GlyphMask::new(GLYPH_SIZE)), 0.0);
        let full = GlyphMask::from_fn(GLYPH_SIZE, |_, _| true);
        assert_eq!(glyph_brightness(&full), 1.0);
    }

    #[test]
    fn glyph_brightness_counts_single_pixel() {
        let mut mask = GlyphMask::new(GLYPH_SIZE);
        mask.set(3, 7, true);
        assert_eq!(glyph_brightness(&mask), 1.0 / 256.0);
    }
}
