/// Configuration, types, and shared structures for lumascii.
///
/// This crate contains all shared types, traits, and configuration logic
/// used across the lumascii workspace.

pub mod charset;
pub mod color;
pub mod config;
pub mod error;
pub mod frame;
pub mod traits;

pub use charset::CharSet;
pub use config::ShellConfig;
pub use error::CoreError;
pub use frame::{CharGrid, GLYPH_SIZE, GlyphMask, ImageId, PixelImage, Rgb};
pub use traits::{GlyphRasterizer, Image};
