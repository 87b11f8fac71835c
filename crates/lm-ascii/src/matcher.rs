use lm_core::frame::CharGrid;
use lm_core::traits::{GlyphRasterizer, Image};

use crate::brightness::block_brightness;
use crate::cache::BrightnessCache;
use crate::table::CharBrightnessTable;
use crate::tiler::SubImageGrid;

/// Associe à chaque bloc de l'image le caractère de brillance la plus proche.
///
/// Construire un matcher lie le cache à l'identifiant de l'image : une image
/// strictement plus récente que la précédente vide toutes les grilles de blocs.
///
/// # Example
/// ```
/// use lm_core::frame::{GlyphMask, PixelImage, Rgb};
/// use lm_core::traits::GlyphRasterizer;
/// use lm_ascii::cache::BrightnessCache;
/// use lm_ascii::matcher::BrightnessMatcher;
///
/// struct Blocks;
/// impl GlyphRasterizer for Blocks {
///     fn font_id(&self) -> &str { "blocks" }
///     fn rasterize(&self, ch: char, size: usize) -> GlyphMask {
///         GlyphMask::from_fn(size, |_, _| ch == '#')
///     }
/// }
///
/// let img = PixelImage::from_fn(4, 2, |_, col| Rgb::grey(if col < 2 { 0 } else { 255 }));
/// let mut cache = BrightnessCache::new();
/// let mut matcher = BrightnessMatcher::new(&img, &Blocks, &mut cache);
/// let grid = matcher.choose_chars(2, &[' ', '#']);
/// assert_eq!(grid.to_string(), " #");
/// ```
pub struct BrightnessMatcher<'a, I: Image + ?Sized, G: GlyphRasterizer + ?Sized> {
    image: &'a I,
    rasterizer: &'a G,
    cache: &'a mut BrightnessCache,
}

impl<'a, I: Image + ?Sized, G: GlyphRasterizer + ?Sized> BrightnessMatcher<'a, I, G> {
    /// Bind `cache` to `image`, invalidating block grids of older images.
    pub fn new(image: &'a I, rasterizer: &'a G, cache: &'a mut BrightnessCache) -> Self {
        cache.bind_image(image.identifier());
        Self {
            image,
            rasterizer,
            cache,
        }
    }

    /// Build the character grid for `chars_in_row` columns.
    ///
    /// An empty `charset` yields [`CharGrid::empty`].
    ///
    /// # Panics
    /// Panics if `chars_in_row` is zero or does not divide the image into
    /// square blocks that also divide its height.
    pub fn choose_chars(&mut self, chars_in_row: u32, charset: &[char]) -> CharGrid {
        if charset.is_empty() {
            return CharGrid::empty();
        }

        let (width, height) = (self.image.width(), self.image.height());
        assert!(
            chars_in_row > 0 && chars_in_row <= width,
            "{chars_in_row} characters per row do not fit a {width}px wide image"
        );
        let block_size = width / chars_in_row;
        assert!(
            block_size * chars_in_row == width && height % block_size == 0,
            "block size {block_size} does not tile a {width}×{height} image"
        );
        let chars_in_col = height / block_size;

        let table = CharBrightnessTable::build(charset, self.rasterizer, self.cache);
        let mut grid = CharGrid::new(chars_in_row, chars_in_col);

        if let Some(blocks) = self.cache.complete_blocks(chars_in_row, chars_in_col) {
            log::debug!("Block cache hit: {chars_in_row}×{chars_in_col}");
            for y in 0..chars_in_col {
                for x in 0..chars_in_row {
                    grid.set(x, y, select_char(&table, blocks.get(y, x)));
                }
            }
            self.cache.stats_mut().block_hits += 1;
            return grid;
        }

        log::debug!("Block cache miss: scoring {chars_in_row}×{chars_in_col} blocks of {block_size}px");
        let tiles = SubImageGrid::tile(self.image, block_size);
        let blocks = self.cache.begin_blocks(chars_in_row, chars_in_col);
        for y in 0..chars_in_col {
            for x in 0..chars_in_row {
                let b = block_brightness(tiles.block(y, x));
                blocks.push(b);
                grid.set(x, y, select_char(&table, b));
            }
        }
        let stats = self.cache.stats_mut();
        stats.block_misses += 1;
        stats.blocks_scored += u64::from(chars_in_row) * u64::from(chars_in_col);
        grid
    }
}

/// Pick the character whose normalized brightness is closest to `b`.
///
/// Ties go to the brighter neighbour. With a single neighbour that one is
/// used; with none, the darkest entry.
///
/// # Example
/// ```
/// use lm_ascii::matcher::select_char;
/// use lm_ascii::table::CharBrightnessTable;
/// let table = CharBrightnessTable::from_raw(&[('A', 0.0), ('B', 1.0)]);
/// assert_eq!(select_char(&table, 0.5), 'B');
/// assert_eq!(select_char(&table, 0.49), 'A');
/// ```
#[must_use]
pub fn select_char(table: &CharBrightnessTable, b: f64) -> char {
    let picked = match (table.closest_at_or_above(b), table.closest_at_or_below(b)) {
        (Some((above, a)), Some((below, c))) => {
            if (b - above).abs() <= (b - below).abs() {
                Some(a)
            } else {
                Some(c)
            }
        }
        (Some((_, ch)), None) | (None, Some((_, ch))) => Some(ch),
        (None, None) => table.lowest().map(|(_, ch)| ch),
    };
    picked.unwrap_or(' ')
}

/// One-shot convenience around [`BrightnessMatcher`].
///
/// # Example
/// ```
/// use lm_core::frame::{GlyphMask, PixelImage, Rgb};
/// use lm_core::traits::GlyphRasterizer;
/// use lm_ascii::cache::BrightnessCache;
/// use lm_ascii::matcher::render;
///
/// struct Dot;
/// impl GlyphRasterizer for Dot {
///     fn font_id(&self) -> &str { "dot" }
///     fn rasterize(&self, _ch: char, size: usize) -> GlyphMask { GlyphMask::new(size) }
/// }
///
/// let img = PixelImage::filled(8, 8, Rgb::WHITE);
/// let mut cache = BrightnessCache::new();
/// let grid = render(&img, &Dot, &mut cache, 4, &['.']);
/// assert_eq!((grid.width, grid.height), (4, 4));
/// assert!(grid.cells.iter().all(|&c| c == '.'));
/// ```
pub fn render<I: Image + ?Sized, G: GlyphRasterizer + ?Sized>(
    image: &I,
    rasterizer: &G,
    cache: &mut BrightnessCache,
    chars_in_row: u32,
    charset: &[char],
) -> CharGrid {
    BrightnessMatcher::new(image, rasterizer, cache).choose_chars(chars_in_row, charset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FillRasterizer;
    use lm_core::frame::{PixelImage, Rgb};

    fn ramp(width: u32, height: u32) -> PixelImage {
        PixelImage::from_fn(width, height, |_, col| {
            Rgb::grey((col * 255 / (width - 1).max(1)) as u8)
        })
    }

    fn dense() -> FillRasterizer {
        FillRasterizer::new("test", &[(' ', 0), ('.', 32), (':', 96), ('#', 192), ('@', 256)])
    }

    #[test]
    fn grid_shape_follows_resolution() {
        let img = ramp(16, 8);
        let raster = dense();
        let mut cache = BrightnessCache::new();
        for chars_in_row in [2, 4, 8, 16] {
            let grid = render(&img, &raster, &mut cache, chars_in_row, &[' ', '@']);
            let block = 16 / chars_in_row;
            assert_eq!(grid.width, chars_in_row);
            assert_eq!(grid.height, 8 / block);
            assert_eq!(grid.rows().count(), (8 / block) as usize);
        }
    }

    #[test]
    fn empty_charset_yields_no_rows() {
        let img = ramp(8, 8);
        let raster = dense();
        let mut cache = BrightnessCache::new();
        let grid = render(&img, &raster, &mut cache, 4, &[]);
        assert!(grid.is_empty());
        assert_eq!(grid.rows().count(), 0);
        assert_eq!(cache.stats().blocks_scored, 0);
    }

    #[test]
    fn single_char_fills_grid() {
        let img = ramp(8, 4);
        let raster = dense();
        let mut cache = BrightnessCache::new();
        let grid = render(&img, &raster, &mut cache, 8, &[':']);
        assert_eq!(grid.cells.len(), 32);
        assert!(grid.cells.iter().all(|&c| c == ':'));
    }

    #[test]
    fn ramp_maps_dark_to_light() {
        let img = ramp(4, 1);
        let raster = dense();
        let mut cache = BrightnessCache::new();
        let grid = render(&img, &raster, &mut cache, 4, &[' ', '@']);
        assert_eq!(grid.to_string(), "  @@");
    }

    #[test]
    fn second_render_reuses_blocks() {
        let mut img = ramp(8, 8);
        let raster = dense();
        let mut cache = BrightnessCache::new();
        let charset = [' ', '.', ':', '#', '@'];

        let first = render(&img, &raster, &mut cache, 4, &charset);
        assert_eq!(cache.stats().blocks_scored, 16);

        // Same identity: pixel edits must not leak into the cached render.
        for row in 0..8 {
            for col in 0..8 {
                img.set_pixel(row, col, Rgb::WHITE);
            }
        }
        let second = render(&img, &raster, &mut cache, 4, &charset);
        assert_eq!(first, second);
        assert_eq!(cache.stats().blocks_scored, 16);
        assert_eq!(cache.stats().block_hits, 1);
        assert_eq!(cache.stats().block_misses, 1);
    }

    #[test]
    fn resolutions_are_cached_independently() {
        let img = ramp(8, 8);
        let raster = dense();
        let mut cache = BrightnessCache::new();
        render(&img, &raster, &mut cache, 4, &[' ', '@']);
        render(&img, &raster, &mut cache, 2, &[' ', '@']);
        assert_eq!(cache.stats().block_misses, 2);
        assert_eq!(cache.cached_resolutions(), vec![2, 4]);

        render(&img, &raster, &mut cache, 4, &[' ', '@']);
        assert_eq!(cache.stats().block_hits, 1);
    }

    #[test]
    fn newer_image_invalidates_every_resolution() {
        let mut img = ramp(8, 8);
        let raster = dense();
        let mut cache = BrightnessCache::new();
        render(&img, &raster, &mut cache, 4, &[' ', '@']);
        render(&img, &raster, &mut cache, 8, &[' ', '@']);

        for row in 0..8 {
            for col in 0..8 {
                img.set_pixel(row, col, Rgb::BLACK);
            }
        }
        img.renew_id();
        let grid = render(&img, &raster, &mut cache, 4, &[' ', '@']);
        assert!(grid.cells.iter().all(|&c| c == ' '));
        assert_eq!(cache.cached_resolutions(), vec![4]);
        assert_eq!(cache.stats().invalidations, 1);
        assert_eq!(cache.stats().block_misses, 3);
    }

    #[test]
    fn image_loaded_earlier_is_not_served_a_later_grid() {
        let raster = dense();
        let mut cache = BrightnessCache::new();
        let black = PixelImage::filled(8, 8, Rgb::BLACK);
        let white = PixelImage::filled(8, 8, Rgb::WHITE);

        let grid = render(&white, &raster, &mut cache, 4, &[' ', '@']);
        assert!(grid.cells.iter().all(|&c| c == '@'));
        let grid = render(&black, &raster, &mut cache, 4, &[' ', '@']);
        assert!(grid.cells.iter().all(|&c| c == ' '));
        assert_eq!(cache.stats().block_hits, 0);
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn earlier_taller_image_is_scored_from_pixels() {
        let raster = dense();
        let mut cache = BrightnessCache::new();
        let tall = PixelImage::filled(8, 16, Rgb::BLACK);
        let square = PixelImage::filled(8, 8, Rgb::WHITE);

        render(&square, &raster, &mut cache, 4, &[' ', '@']);
        let grid = render(&tall, &raster, &mut cache, 4, &[' ', '@']);
        assert_eq!((grid.width, grid.height), (4, 8));
        assert!(grid.cells.iter().all(|&c| c == ' '));
    }

    #[test]
    fn glyph_cache_survives_new_image() {
        let raster = dense();
        let mut cache = BrightnessCache::new();
        render(&ramp(4, 4), &raster, &mut cache, 2, &[' ', '@']);
        render(&ramp(4, 4), &raster, &mut cache, 2, &[' ', '@']);
        assert_eq!(raster.calls(), 2);
    }

    #[test]
    fn tie_prefers_brighter_character() {
        let table = CharBrightnessTable::from_raw(&[('A', 0.0), ('B', 1.0)]);
        assert_eq!(select_char(&table, 0.5), 'B');
        assert_eq!(select_char(&table, 0.500_001), 'B');
        assert_eq!(select_char(&table, 0.499_999), 'A');
    }

    #[test]
    fn single_bucket_falls_back_to_only_entry() {
        let table = CharBrightnessTable::from_raw(&[('x', 0.4), ('y', 0.4)]);
        assert_eq!(select_char(&table, 0.0), 'y');
        assert_eq!(select_char(&table, 0.9), 'y');
    }

    #[test]
    fn out_of_range_brightness_uses_existing_side() {
        let table = CharBrightnessTable::from_raw(&[('a', 0.1), ('b', 0.9)]);
        assert_eq!(select_char(&table, 1.2), 'b');
        assert_eq!(select_char(&table, -0.2), 'a');
    }

    #[test]
    #[should_panic(expected = "do not fit")]
    fn zero_chars_in_row_panics() {
        let img = ramp(8, 8);
        let raster = dense();
        let mut cache = BrightnessCache::new();
        let _ = render(&img, &raster, &mut cache, 0, &['a']);
    }

    #[test]
    #[should_panic(expected = "does not tile")]
    fn non_dividing_resolution_panics() {
        let img = ramp(8, 8);
        let raster = dense();
        let mut cache = BrightnessCache::new();
        let _ = render(&img, &raster, &mut cache, 3, &['a']);
    }
}
