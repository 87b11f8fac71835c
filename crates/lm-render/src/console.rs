use std::io::{self, Stdout, Write};

use anyhow::Result;
use lm_core::frame::CharGrid;

use crate::AsciiOutput;

/// Écrit la grille ligne par ligne sur un `Write` (stdout par défaut).
///
/// # Example
/// ```
/// use lm_core::frame::CharGrid;
/// use lm_render::{AsciiOutput, ConsoleOutput};
/// let mut grid = CharGrid::new(2, 1);
/// grid.set(0, 0, '#');
/// grid.set(1, 0, '.');
/// let mut out = ConsoleOutput::new(Vec::new());
/// out.output(&grid).unwrap();
/// assert_eq!(out.into_inner(), b"#.\n");
/// ```
pub struct ConsoleOutput<W: Write> {
    writer: W,
    line_buffer: String,
}

impl ConsoleOutput<Stdout> {
    #[must_use]
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleOutput<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            line_buffer: String::new(),
        }
    }

    /// Recover the wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> AsciiOutput for ConsoleOutput<W> {
    fn output(&mut self, grid: &CharGrid) -> Result<()> {
        for row in grid.rows() {
            self.line_buffer.clear();
            self.line_buffer.extend(row);
            writeln!(self.writer, "{}", self.line_buffer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
