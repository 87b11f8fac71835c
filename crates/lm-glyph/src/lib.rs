/// Rasterisation des glyphes pour la table de brillance.
///
/// Deux sources : une police TTF/OTF via ab_glyph, ou les glyphes intégrés
/// quand aucune police n'est configurée ou lisible.

pub mod builtin;
pub mod font;

use lm_core::config::ShellConfig;
use lm_core::traits::GlyphRasterizer;

pub use builtin::BuiltinRasterizer;
pub use font::FontRasterizer;

/// Choose the rasterizer described by `config`.
///
/// A configured font that cannot be loaded falls back to the builtin glyphs
/// with a warning.
///
/// # Example
/// ```
/// use lm_core::config::ShellConfig;
/// let r = lm_glyph::load_rasterizer(&ShellConfig::default());
/// assert_eq!(r.font_id(), lm_glyph::builtin::BUILTIN_FONT_ID);
/// ```
#[must_use]
pub fn load_rasterizer(config: &ShellConfig) -> Box<dyn GlyphRasterizer> {
    let Some(path) = &config.font_path else {
        log::info!("No font file configured, using builtin glyphs");
        return Box::new(BuiltinRasterizer::new());
    };
    match FontRasterizer::open(path, &config.font_name) {
        Ok(r) => Box::new(r),
        Err(e) => {
            log::warn!("{e:#}; falling back to builtin glyphs");
            Box::new(BuiltinRasterizer::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn unreadable_font_falls_back_to_builtin() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"garbage").unwrap();
        let config = ShellConfig {
            font_path: Some(file.path().to_path_buf()),
            ..ShellConfig::default()
        };
        assert_eq!(load_rasterizer(&config).font_id(), builtin::BUILTIN_FONT_ID);
    }
}
