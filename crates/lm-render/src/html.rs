use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lm_core::frame::CharGrid;

use crate::AsciiOutput;

/// Écrit la grille dans un fichier HTML autonome.
///
/// Chaque rendu remplace le fichier. La police et la taille sont celles de la
/// configuration, l'interligne est fixé à 1.0 pour garder des cellules carrées.
pub struct HtmlOutput {
    path: PathBuf,
    font_family: String,
    font_size_px: u32,
}

impl HtmlOutput {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, font_family: &str, font_size_px: u32) -> Self {
        Self {
            path: path.into(),
            font_family: font_family.to_string(),
            font_size_px,
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Build the complete document for `grid`.
    ///
    /// # Example
    /// ```
    /// use lm_core::frame::CharGrid;
    /// use lm_render::HtmlOutput;
    /// let mut grid = CharGrid::new(1, 1);
    /// grid.set(0, 0, '<');
    /// let html = HtmlOutput::new("out.html", "Courier New", 4).document(&grid);
    /// assert!(html.contains("&lt;"));
    /// ```
    #[must_use]
    pub fn document(&self, grid: &CharGrid) -> String {
        let mut html = format!(
            r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<style>
    body {{ background: #ffffff; margin: 0; }}
    pre {{
        font-family: '{font}', monospace;
        font-size: {size}px;
        line-height: 1.0;
        letter-spacing: 0;
        margin: 0;
    }}
</style>
</head>
<body>
<pre>"#,
            font = escape(&self.font_family),
            size = self.font_size_px,
        );

        for (i, row) in grid.rows().enumerate() {
            if i > 0 {
                html.push('\n');
            }
            for &ch in row {
                push_escaped(&mut html, ch);
            }
        }

        html.push_str("</pre>\n</body>\n</html>\n");
        html
    }
}

impl AsciiOutput for HtmlOutput {
    fn output(&mut self, grid: &CharGrid) -> Result<()> {
        let html = self.document(grid);
        std::fs::write(&self.path, html)
            .with_context(|| format!("Cannot write {}", self.path.display()))?;
        log::info!(
            "Wrote {}x{} grid to {}",
            grid.width,
            grid.height,
            self.path.display()
        );
        Ok(())
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        '"' => out.push_str("&quot;"),
        '\'' => out.push_str("&#39;"),
        c => out.push(c),
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        push_escaped(&mut out, ch);
    }
    out
}
