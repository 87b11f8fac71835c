/// Brightness-matching engine for lumascii.
///
/// Tiles an image into square blocks, scores blocks and glyphs by
/// brightness, and picks the closest glyph per block.

pub mod brightness;
pub mod cache;
pub mod matcher;
pub mod table;
pub mod tiler;

#[cfg(test)]
mod testing;

pub use cache::{BrightnessCache, CacheStats};
pub use matcher::{BrightnessMatcher, render, select_char};
pub use table::CharBrightnessTable;
