/// Sorties des grilles de caractères : console et fichier HTML.

pub mod console;
pub mod html;

use anyhow::Result;
use lm_core::frame::CharGrid;

pub use console::ConsoleOutput;
pub use html::HtmlOutput;

/// Destination d'une grille rendue.
///
/// Implémenté par : `ConsoleOutput`, `HtmlOutput`.
pub trait AsciiOutput {
    /// Emit `grid`, one line per row.
    ///
    /// # Errors
    /// Returns an error if the underlying writer or file fails.
    fn output(&mut self, grid: &CharGrid) -> Result<()>;
}
