use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::error::CoreError;
use crate::traits::Image;

/// Côté (en pixels) du masque carré utilisé pour mesurer la brillance d'un glyphe.
pub const GLYPH_SIZE: usize = 16;

/// Pixel RGB 8 bits.
///
/// # Example
/// ```
/// use lm_core::frame::Rgb;
/// assert_eq!(Rgb::WHITE, Rgb::new(255, 255, 255));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb {
    /// Pure white, used as padding colour.
    pub const WHITE: Self = Self::new(255, 255, 255);
    /// Pure black.
    pub const BLACK: Self = Self::new(0, 0, 0);

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Grey pixel with all channels equal to `v`.
    #[must_use]
    pub const fn grey(v: u8) -> Self {
        Self::new(v, v, v)
    }
}

static NEXT_IMAGE_ID: AtomicU64 = AtomicU64::new(1);

/// Identifiant opaque d'une image logique.
///
/// Chaque appel à [`ImageId::fresh`] renvoie un identifiant strictement plus
/// récent que tous ceux émis auparavant dans le processus. La seule
/// comparaison exposée est [`ImageId::is_newer_than`].
///
/// # Example
/// ```
/// use lm_core::frame::ImageId;
/// let a = ImageId::fresh();
/// let b = ImageId::fresh();
/// assert!(b.is_newer_than(a));
/// assert!(!a.is_newer_than(b));
/// assert!(!a.is_newer_than(a));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ImageId(u64);

impl ImageId {
    /// Allocate a new identifier, newer than every identifier allocated so far.
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_IMAGE_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// True when `self` was allocated strictly after `other`.
    #[inline]
    #[must_use]
    pub fn is_newer_than(self, other: Self) -> bool {
        self.0 > other.0
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "img#{}", self.0)
    }
}

/// In-memory RGB image, row-major, 3 bytes per pixel.
///
/// Mutating pixels through [`PixelImage::set_pixel`] keeps the identifier:
/// callers that replace the logical content call [`PixelImage::renew_id`].
///
/// # Example
/// ```
/// use lm_core::frame::{PixelImage, Rgb};
/// use lm_core::traits::Image;
/// let img = PixelImage::filled(4, 2, Rgb::WHITE);
/// assert_eq!(img.width(), 4);
/// assert_eq!(img.height(), 2);
/// assert_eq!(img.pixel(1, 3), Rgb::WHITE);
/// ```
#[derive(Clone, Debug)]
pub struct PixelImage {
    data: Vec<u8>,
    width: u32,
    height: u32,
    id: ImageId,
}

impl PixelImage {
    /// Image of the given size with every pixel set to `color`.
    #[must_use]
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for _ in 0..(width as usize * height as usize) {
            data.extend_from_slice(&[color.r, color.g, color.b]);
        }
        Self {
            data,
            width,
            height,
            id: ImageId::fresh(),
        }
    }

    /// Wrap a raw RGB8 buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] for a zero dimension and
    /// [`CoreError::BufferSize`] when `data` does not hold `width × height × 3` bytes.
    ///
    /// # Example
    /// ```
    /// use lm_core::frame::PixelImage;
    /// assert!(PixelImage::from_rgb(1, 1, vec![0, 0, 0]).is_ok());
    /// assert!(PixelImage::from_rgb(2, 1, vec![0, 0, 0]).is_err());
    /// ```
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        if width == 0 || height == 0 {
            return Err(CoreError::InvalidDimensions { width, height });
        }
        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(CoreError::BufferSize {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            id: ImageId::fresh(),
        })
    }

    /// Build an image by evaluating `f(row, col)` for every pixel.
    ///
    /// # Example
    /// ```
    /// use lm_core::frame::{PixelImage, Rgb};
    /// use lm_core::traits::Image;
    /// let img = PixelImage::from_fn(2, 2, |row, _| Rgb::grey(if row == 0 { 0 } else { 255 }));
    /// assert_eq!(img.pixel(1, 0), Rgb::WHITE);
    /// ```
    #[must_use]
    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> Rgb) -> Self {
        let mut data = Vec::with_capacity(width as usize * height as usize * 3);
        for row in 0..height {
            for col in 0..width {
                let p = f(row, col);
                data.extend_from_slice(&[p.r, p.g, p.b]);
            }
        }
        Self {
            data,
            width,
            height,
            id: ImageId::fresh(),
        }
    }

    /// Overwrite one pixel. The identifier is left untouched.
    #[inline]
    pub fn set_pixel(&mut self, row: u32, col: u32, color: Rgb) {
        let idx = self.index(row, col);
        self.data[idx..idx + 3].copy_from_slice(&[color.r, color.g, color.b]);
    }

    /// Mark the content as a new logical image.
    pub fn renew_id(&mut self) {
        self.id = ImageId::fresh();
    }

    #[inline(always)]
    fn index(&self, row: u32, col: u32) -> usize {
        debug_assert!(row < self.height && col < self.width, "pixel out of bounds");
        (row as usize * self.width as usize + col as usize) * 3
    }
}

impl Image for PixelImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    #[inline(always)]
    fn pixel(&self, row: u32, col: u32) -> Rgb {
        let idx = self.index(row, col);
        Rgb::new(self.data[idx], self.data[idx + 1], self.data[idx + 2])
    }

    fn identifier(&self) -> ImageId {
        self.id
    }
}

/// Masque d'occupation booléen carré d'un glyphe rendu.
///
/// # Example
/// ```
/// use lm_core::frame::GlyphMask;
/// let mask = GlyphMask::from_fn(4, |row, col| row == col);
/// assert_eq!(mask.count_set(), 4);
/// assert!(mask.get(2, 2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphMask {
    size: usize,
    bits: Vec<bool>,
}

impl GlyphMask {
    /// Empty (all-off) mask of `size × size`.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            bits: vec![false; size * size],
        }
    }

    /// Build a mask by evaluating `f(row, col)`.
    #[must_use]
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> bool) -> Self {
        let mut bits = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                bits.push(f(row, col));
            }
        }
        Self { size, bits }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.bits[row * self.size + col]
    }

    #[inline]
    pub fn set(&mut self, row: usize, col: usize, on: bool) {
        self.bits[row * self.size + col] = on;
    }

    /// Number of pixels switched on.
    #[must_use]
    pub fn count_set(&self) -> usize {
        self.bits.iter().filter(|&&b| b).count()
    }
}

/// Grille de caractères produite par le matcher. Row-major, haut→bas, gauche→droite.
///
/// # Example
/// ```
/// use lm_core::frame::CharGrid;
/// let mut grid = CharGrid::new(3, 2);
/// grid.set(2, 1, '#');
/// assert_eq!(grid.get(2, 1), '#');
/// assert_eq!(grid.to_string(), "   \n  #");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharGrid {
    /// Flat array of cells, row-major.
    pub cells: Vec<char>,
    /// Width in characters (columns).
    pub width: u32,
    /// Height in characters (rows).
    pub height: u32,
}

impl CharGrid {
    /// Grid of `width × height` spaces.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            cells: vec![' '; width as usize * height as usize],
            width,
            height,
        }
    }

    /// Grid with zero rows: the "nothing to render" outcome.
    #[must_use]
    pub fn empty() -> Self {
        Self::new(0, 0)
    }

    /// True when the grid has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    /// Set the cell at column `x`, row `y`.
    #[inline(always)]
    pub fn set(&mut self, x: u32, y: u32, ch: char) {
        self.cells[y as usize * self.width as usize + x as usize] = ch;
    }

    /// Get the cell at column `x`, row `y`.
    #[inline(always)]
    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> char {
        self.cells[y as usize * self.width as usize + x as usize]
    }

    /// Iterate over rows as slices.
    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.cells.chunks(self.width.max(1) as usize)
    }
}

impl fmt::Display for CharGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for &ch in row {
                write!(f, "{ch}")?;
            }
        }
        Ok(())
    }
}
