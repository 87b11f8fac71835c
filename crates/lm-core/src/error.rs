use thiserror::Error;

/// Errors originating from the core module.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Invalid configuration value or structure.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Source image does not exist.
    #[error("File not found: {path}")]
    FileNotFound {
        /// Path that was not found.
        path: String,
    },

    /// Invalid width/height dimensions.
    #[error("Invalid dimensions: {width}×{height}")]
    InvalidDimensions {
        /// Width value.
        width: u32,
        /// Height value.
        height: u32,
    },

    /// Pixel buffer length does not match the declared dimensions.
    #[error("Pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize {
        /// Bytes required by width × height × 3.
        expected: usize,
        /// Bytes actually provided.
        actual: usize,
    },

    /// Character range outside the printable ASCII window.
    #[error("Character range {begin:?}-{end:?} is outside printable ASCII")]
    CharRange {
        /// First character of the range.
        begin: char,
        /// Last character of the range.
        end: char,
    },
}
