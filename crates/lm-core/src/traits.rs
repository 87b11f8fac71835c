use crate::frame::{GlyphMask, ImageId, Rgb};

/// Image source consumed by the brightness matcher.
///
/// Implémenté par : `PixelImage`, `PaddedImage`.
///
/// # Example
/// ```
/// use lm_core::traits::Image;
/// use lm_core::frame::{ImageId, Rgb};
///
/// struct Flat(ImageId);
/// impl Image for Flat {
///     fn width(&self) -> u32 { 8 }
///     fn height(&self) -> u32 { 8 }
///     fn pixel(&self, _row: u32, _col: u32) -> Rgb { Rgb::WHITE }
///     fn identifier(&self) -> ImageId { self.0 }
/// }
/// let img = Flat(ImageId::fresh());
/// assert_eq!(img.pixel(3, 3), Rgb::WHITE);
/// ```
pub trait Image {
    /// Width in pixels, always positive.
    fn width(&self) -> u32;

    /// Height in pixels, always positive.
    fn height(&self) -> u32;

    /// Couleur du pixel à la ligne `row`, colonne `col`.
    fn pixel(&self, row: u32, col: u32) -> Rgb;

    /// Identifiant stable. Devient strictement plus récent à chaque fois que
    /// le contenu logique de l'image est remplacé.
    fn identifier(&self) -> ImageId;
}

/// Rasterise un caractère en masque booléen carré.
///
/// Implémenté par : `FontRasterizer`, `BuiltinRasterizer`.
///
/// # Example
/// ```
/// use lm_core::traits::GlyphRasterizer;
/// use lm_core::frame::GlyphMask;
///
/// struct Solid;
/// impl GlyphRasterizer for Solid {
///     fn font_id(&self) -> &str { "solid" }
///     fn rasterize(&self, _ch: char, size: usize) -> GlyphMask {
///         GlyphMask::from_fn(size, |_, _| true)
///     }
/// }
/// assert_eq!(Solid.rasterize('x', 4).count_set(), 16);
/// ```
pub trait GlyphRasterizer {
    /// Identifiant de la police, utilisé comme clé de cache avec le caractère.
    fn font_id(&self) -> &str;

    /// Rend `ch` dans un masque `size × size`.
    ///
    /// CONTRAT : déterministe pour un couple (caractère, police).
    fn rasterize(&self, ch: char, size: usize) -> GlyphMask;
}
