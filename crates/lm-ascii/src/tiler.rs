use lm_core::frame::Rgb;
use lm_core::traits::Image;

/// Image découpée en blocs carrés `size × size`.
///
/// Les blocs sont stockés contigus, ligne de blocs par ligne de blocs ;
/// à l'intérieur d'un bloc, les pixels sont en row-major.
///
/// # Example
/// ```
/// use lm_core::frame::{PixelImage, Rgb};
/// use lm_ascii::tiler::SubImageGrid;
///
/// let img = PixelImage::filled(8, 4, Rgb::WHITE);
/// let tiles = SubImageGrid::tile(&img, 2);
/// assert_eq!((tiles.rows(), tiles.cols()), (2, 4));
/// assert_eq!(tiles.block(1, 3).len(), 4);
/// ```
pub struct SubImageGrid {
    rows: u32,
    cols: u32,
    size: u32,
    pixels: Vec<Rgb>,
}

impl SubImageGrid {
    /// Split `image` into `(height/size) × (width/size)` blocks.
    ///
    /// # Panics
    /// Panics if `size` is zero or does not divide both dimensions. Callers
    /// bound the resolution so this cannot happen for valid input.
    #[must_use]
    pub fn tile<I: Image + ?Sized>(image: &I, size: u32) -> Self {
        let (width, height) = (image.width(), image.height());
        assert!(
            size > 0 && width % size == 0 && height % size == 0,
            "block size {size} does not tile a {width}×{height} image"
        );

        let rows = height / size;
        let cols = width / size;
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for br in 0..rows {
            for bc in 0..cols {
                for dy in 0..size {
                    for dx in 0..size {
                        pixels.push(image.pixel(br * size + dy, bc * size + dx));
                    }
                }
            }
        }

        Self {
            rows,
            cols,
            size,
            pixels,
        }
    }

    /// Number of block rows.
    #[must_use]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of block columns.
    #[must_use]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Edge of one block in pixels.
    #[must_use]
    pub fn block_size(&self) -> u32 {
        self.size
    }

    /// The `size × size` pixels of block (`row`, `col`), row-major.
    #[inline]
    #[must_use]
    pub fn block(&self, row: u32, col: u32) -> &[Rgb] {
        let area = (self.size * self.size) as usize;
        let start = (row as usize * self.cols as usize + col as usize) * area;
        &self.pixels[start..start + area]
    }
}
