use std::collections::HashMap;
use std::collections::hash_map::Entry;

use lm_core::frame::{GLYPH_SIZE, ImageId};
use lm_core::traits::GlyphRasterizer;

use crate::brightness::glyph_brightness;

/// Compteurs d'instrumentation du cache.
///
/// # Example
/// ```
/// use lm_ascii::cache::BrightnessCache;
/// let cache = BrightnessCache::new();
/// assert_eq!(cache.stats().blocks_scored, 0);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Glyph brightness served from the character cache.
    pub char_hits: u64,
    /// Glyphs rasterized and scored.
    pub char_misses: u64,
    /// Renders that reused a block-brightness grid.
    pub block_hits: u64,
    /// Renders that had to score blocks from pixels.
    pub block_misses: u64,
    /// Individual blocks scored from pixels.
    pub blocks_scored: u64,
    /// Times the block cache was wiped by a different image.
    pub invalidations: u64,
}

/// Raw block brightness for one resolution, row-major.
///
/// Filled value by value while blocks are scored; only a grid holding all
/// `rows × cols` values counts as a cache hit.
#[derive(Clone, Debug)]
pub struct BlockGrid {
    rows: u32,
    cols: u32,
    values: Vec<f64>,
}

impl BlockGrid {
    fn with_shape(rows: u32, cols: u32) -> Self {
        Self {
            rows,
            cols,
            values: Vec::with_capacity(rows as usize * cols as usize),
        }
    }

    /// Append the next block value in row-major order.
    #[inline]
    pub fn push(&mut self, value: f64) {
        self.values.push(value);
    }

    /// Raw brightness of block (`row`, `col`).
    #[inline]
    #[must_use]
    pub fn get(&self, row: u32, col: u32) -> f64 {
        self.values[row as usize * self.cols as usize + col as usize]
    }

    /// True once every block has a value.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.values.len() == self.rows as usize * self.cols as usize
    }

    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }
}

/// Cache de brillance à deux niveaux.
///
/// - Caractères : (police, caractère) → brillance brute. Jamais vidé.
/// - Blocs : caractères par ligne → grille de brillances brutes de l'image
///   courante. Vidé entièrement dès qu'une autre image est liée.
///
/// Owned by the caller and lent mutably to each matcher, so one cache can
/// outlive many renders.
///
/// # Example
/// ```
/// use lm_ascii::cache::BrightnessCache;
/// use lm_core::frame::ImageId;
///
/// let mut cache = BrightnessCache::new();
/// assert!(!cache.bind_image(ImageId::fresh()));
/// ```
#[derive(Debug, Default)]
pub struct BrightnessCache {
    chars: HashMap<String, HashMap<char, f64>>,
    blocks: HashMap<u32, BlockGrid>,
    image: Option<ImageId>,
    stats: CacheStats,
}

impl BrightnessCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Associate the block cache with `id`.
    ///
    /// Clears every block entry when `id` differs from the image recorded so
    /// far and returns whether that happened. An older id also clears: images
    /// get their id at load time, not at first render. The character cache is
    /// left alone.
    pub fn bind_image(&mut self, id: ImageId) -> bool {
        let invalidate = self.image.is_some_and(|prev| prev != id);
        if invalidate {
            log::debug!(
                "Image {id} replaces previous image (newer: {}), dropping {} block grid(s)",
                self.image.is_some_and(|prev| id.is_newer_than(prev)),
                self.blocks.len()
            );
            self.blocks.clear();
            self.stats.invalidations += 1;
        }
        self.image = Some(id);
        invalidate
    }

    /// Raw brightness of `ch` in the rasterizer's font, computed on first use.
    pub fn char_brightness<G: GlyphRasterizer + ?Sized>(&mut self, ch: char, rasterizer: &G) -> f64 {
        let font = rasterizer.font_id();
        if let Some(&value) = self.chars.get(font).and_then(|m| m.get(&ch)) {
            self.stats.char_hits += 1;
            return value;
        }

        let value = glyph_brightness(&rasterizer.rasterize(ch, GLYPH_SIZE));
        self.stats.char_misses += 1;
        self.chars
            .entry(font.to_owned())
            .or_default()
            .insert(ch, value);
        value
    }

    /// Cached grid for `chars_in_row`, only if fully populated with `rows` rows.
    #[must_use]
    pub fn complete_blocks(&self, chars_in_row: u32, rows: u32) -> Option<&BlockGrid> {
        self.blocks
            .get(&chars_in_row)
            .filter(|grid| grid.rows == rows && grid.is_complete())
    }

    /// Start a fresh grid for `chars_in_row`, replacing any partial one.
    pub fn begin_blocks(&mut self, chars_in_row: u32, rows: u32) -> &mut BlockGrid {
        let fresh = BlockGrid::with_shape(rows, chars_in_row);
        match self.blocks.entry(chars_in_row) {
            Entry::Occupied(slot) => {
                let grid = slot.into_mut();
                *grid = fresh;
                grid
            }
            Entry::Vacant(slot) => slot.insert(fresh),
        }
    }

    /// Resolutions currently cached, ascending.
    #[must_use]
    pub fn cached_resolutions(&self) -> Vec<u32> {
        let mut keys: Vec<u32> = self.blocks.keys().copied().collect();
        keys.sort_unstable();
        keys
    }

    #[must_use]
    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub(crate) fn stats_mut(&mut self) -> &mut CacheStats {
        &mut self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FillRasterizer;

    #[test]
    fn char_brightness_is_computed_once_per_font() {
        let raster = FillRasterizer::new("a", &[('x', 64)]);
        let mut cache = BrightnessCache::new();
        assert_eq!(cache.char_brightness('x', &raster), 0.25);
        assert_eq!(cache.char_brightness('x', &raster), 0.25);
        assert_eq!(raster.calls(), 1);
        assert_eq!(cache.stats().char_hits, 1);
        assert_eq!(cache.stats().char_misses, 1);
    }

    #[test]
    fn fonts_are_cached_separately() {
        let a = FillRasterizer::new("a", &[('x', 64)]);
        let b = FillRasterizer::new("b", &[('x', 128)]);
        let mut cache = BrightnessCache::new();
        assert_eq!(cache.char_brightness('x', &a), 0.25);
        assert_eq!(cache.char_brightness('x', &b), 0.5);
        assert_eq!(cache.char_brightness('x', &a), 0.25);
        assert_eq!(a.calls() + b.calls(), 2);
    }

    #[test]
    fn newer_image_clears_all_resolutions() {
        let mut cache = BrightnessCache::new();
        let first = ImageId::fresh();
        assert!(!cache.bind_image(first));
        cache.begin_blocks(4, 4).push(0.1);
        cache.begin_blocks(8, 8).push(0.2);
        assert_eq!(cache.cached_resolutions(), vec![4, 8]);

        assert!(!cache.bind_image(first));
        assert_eq!(cache.cached_resolutions(), vec![4, 8]);

        assert!(cache.bind_image(ImageId::fresh()));
        assert!(cache.cached_resolutions().is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn older_image_also_clears_entries() {
        let older = ImageId::fresh();
        let newer = ImageId::fresh();
        let mut cache = BrightnessCache::new();
        cache.bind_image(newer);
        cache.begin_blocks(2, 1).push(0.5);
        assert!(cache.bind_image(older));
        assert!(cache.cached_resolutions().is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn grid_of_another_height_is_not_a_hit() {
        let mut cache = BrightnessCache::new();
        let grid = cache.begin_blocks(2, 1);
        grid.push(0.1);
        grid.push(0.2);
        assert!(cache.complete_blocks(2, 1).is_some());
        assert!(cache.complete_blocks(2, 2).is_none());
    }

    #[test]
    fn partial_grid_is_not_a_hit() {
        let mut cache = BrightnessCache::new();
        let grid = cache.begin_blocks(2, 2);
        grid.push(0.1);
        grid.push(0.2);
        grid.push(0.3);
        assert!(cache.complete_blocks(2, 2).is_none());
        cache.begin_blocks(2, 2);
        assert!(cache.complete_blocks(2, 2).is_none());
        let grid = cache.begin_blocks(2, 1);
        grid.push(0.4);
        grid.push(0.6);
        let hit = cache.complete_blocks(2, 1).unwrap();
        assert_eq!(hit.get(0, 1), 0.6);
    }
}
