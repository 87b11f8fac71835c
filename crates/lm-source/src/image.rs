use std::path::Path;

use anyhow::{Context, Result};
use lm_core::error::CoreError;
use lm_core::frame::{ImageId, PixelImage, Rgb};
use lm_core::traits::Image;

/// Smallest power of two ≥ `n`.
///
/// # Errors
/// Returns [`CoreError::InvalidDimensions`] for zero or when the result
/// would not fit in a `u32`.
///
/// # Example
/// ```
/// use lm_source::image::next_power_of_two;
/// assert_eq!(next_power_of_two(1).unwrap(), 1);
/// assert_eq!(next_power_of_two(300).unwrap(), 512);
/// assert_eq!(next_power_of_two(512).unwrap(), 512);
/// assert!(next_power_of_two(0).is_err());
/// ```
pub fn next_power_of_two(n: u32) -> Result<u32, CoreError> {
    match n {
        0 => Err(CoreError::InvalidDimensions {
            width: 0,
            height: 0,
        }),
        n => n.checked_next_power_of_two().ok_or(CoreError::InvalidDimensions {
            width: n,
            height: n,
        }),
    }
}

/// Image source complétée en blanc jusqu'aux puissances de deux.
///
/// L'original est centré : décalage `(padded - original) / 2` sur chaque axe.
/// Chaque chargement reçoit un `ImageId` neuf.
///
/// # Example
/// ```
/// use lm_source::image::PaddedImage;
/// use lm_core::traits::Image;
/// use lm_core::frame::Rgb;
/// let img = PaddedImage::from_rgb(3, 2, vec![0; 3 * 2 * 3]).unwrap();
/// assert_eq!((img.width(), img.height()), (4, 2));
/// assert_eq!(img.pixel(0, 0), Rgb::BLACK);
/// assert_eq!(img.pixel(0, 3), Rgb::WHITE);
/// ```
#[derive(Clone, Debug)]
pub struct PaddedImage {
    inner: PixelImage,
    original: (u32, u32),
    offset: (u32, u32),
}

impl PaddedImage {
    /// Decode an image file and pad it.
    ///
    /// # Errors
    /// Returns an error if the file cannot be decoded.
    ///
    /// # Example
    /// ```no_run
    /// use lm_source::image::PaddedImage;
    /// use std::path::Path;
    /// let img = PaddedImage::open(Path::new("photo.png")).unwrap();
    /// ```
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CoreError::FileNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        let img = image::open(path)
            .with_context(|| format!("Impossible de charger {}", path.display()))?;
        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let padded = Self::from_rgb(width, height, rgb.into_raw())
            .with_context(|| format!("Invalid image {}", path.display()))?;
        log::info!(
            "Loaded {} ({width}x{height}, padded to {}x{}, {})",
            path.display(),
            padded.width(),
            padded.height(),
            padded.identifier()
        );
        Ok(padded)
    }

    /// Pad an in-memory RGB8 buffer.
    ///
    /// # Errors
    /// Returns [`CoreError::InvalidDimensions`] or [`CoreError::BufferSize`]
    /// when the buffer does not describe a `width × height` image.
    pub fn from_rgb(width: u32, height: u32, data: Vec<u8>) -> Result<Self, CoreError> {
        let source = PixelImage::from_rgb(width, height, data)?;
        let padded_w = next_power_of_two(width)?;
        let padded_h = next_power_of_two(height)?;
        let off_x = (padded_w - width) / 2;
        let off_y = (padded_h - height) / 2;

        let inner = if (padded_w, padded_h) == (width, height) {
            source
        } else {
            PixelImage::from_fn(padded_w, padded_h, |row, col| {
                let inside = (off_y..off_y + height).contains(&row)
                    && (off_x..off_x + width).contains(&col);
                if inside {
                    source.pixel(row - off_y, col - off_x)
                } else {
                    Rgb::WHITE
                }
            })
        };

        Ok(Self {
            inner,
            original: (width, height),
            offset: (off_x, off_y),
        })
    }

    /// Dimensions before padding, `(width, height)`.
    #[must_use]
    pub fn original_size(&self) -> (u32, u32) {
        self.original
    }

    /// Position of the original inside the padded image, `(x, y)`.
    #[must_use]
    pub fn offset(&self) -> (u32, u32) {
        self.offset
    }
}

impl Image for PaddedImage {
    fn width(&self) -> u32 {
        self.inner.width()
    }

    fn height(&self) -> u32 {
        self.inner.height()
    }

    #[inline]
    fn pixel(&self, row: u32, col: u32) -> Rgb {
        self.inner.pixel(row, col)
    }

    fn identifier(&self) -> ImageId {
        self.inner.identifier()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grey_buffer(width: u32, height: u32, v: u8) -> Vec<u8> {
        vec![v; width as usize * height as usize * 3]
    }

    #[test]
    fn original_is_centred() {
        let img = PaddedImage::from_rgb(5, 3, grey_buffer(5, 3, 0)).unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));
        assert_eq!(img.offset(), (1, 0));
        assert_eq!(img.original_size(), (5, 3));

        for row in 0..4 {
            for col in 0..8 {
                let inside = row < 3 && (1..6).contains(&col);
                let expected = if inside { Rgb::BLACK } else { Rgb::WHITE };
                assert_eq!(img.pixel(row, col), expected, "pixel ({row}, {col})");
            }
        }
    }

    #[test]
    fn power_of_two_input_is_untouched() {
        let img = PaddedImage::from_rgb(4, 8, grey_buffer(4, 8, 7)).unwrap();
        assert_eq!((img.width(), img.height()), (4, 8));
        assert_eq!(img.offset(), (0, 0));
        assert_eq!(img.pixel(7, 3), Rgb::grey(7));
    }

    #[test]
    fn each_image_gets_a_newer_id() {
        let a = PaddedImage::from_rgb(2, 2, grey_buffer(2, 2, 0)).unwrap();
        let b = PaddedImage::from_rgb(2, 2, grey_buffer(2, 2, 0)).unwrap();
        assert!(b.identifier().is_newer_than(a.identifier()));
    }

    #[test]
    fn bad_buffers_are_rejected() {
        assert!(matches!(
            PaddedImage::from_rgb(0, 4, Vec::new()),
            Err(CoreError::InvalidDimensions { .. })
        ));
        assert!(matches!(
            PaddedImage::from_rgb(2, 2, vec![0; 5]),
            Err(CoreError::BufferSize { expected: 12, actual: 5 })
        ));
    }

    #[test]
    fn open_decodes_and_pads_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("dot.png");
        let mut buf = image::RgbImage::new(3, 3);
        buf.put_pixel(1, 1, image::Rgb([10, 20, 30]));
        buf.save(&path).unwrap();

        let img = PaddedImage::open(&path).unwrap();
        assert_eq!((img.width(), img.height()), (4, 4));
        // offset is (0, 0) since (4 - 3) / 2 == 0
        assert_eq!(img.pixel(1, 1), Rgb::new(10, 20, 30));
        assert_eq!(img.pixel(3, 3), Rgb::WHITE);
    }

    #[test]
    fn open_missing_file_errors() {
        let err = PaddedImage::open(Path::new("nope/missing.png")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CoreError>(),
            Some(CoreError::FileNotFound { .. })
        ));
    }
}
