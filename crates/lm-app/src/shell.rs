use std::io::{BufRead, Write};

use anyhow::Result;
use lm_ascii::BrightnessCache;
use lm_core::charset::{CharSet, FIRST_RENDERABLE, LAST_RENDERABLE, checked_range};
use lm_core::config::{OutputKind, ShellConfig};
use lm_core::traits::{GlyphRasterizer, Image};
use lm_render::{AsciiOutput, ConsoleOutput, HtmlOutput};

const PROMPT: &str = ">>> ";
const COMMAND_ERROR: &str = "Did not executed due to incorrect command";
const BOUNDARIES_ERROR: &str = "Did not change due to exceeding boundaries";
const NO_CHARS_ERROR: &str = "Can not render without any chars";

/// Caractères visés par `add` / `remove`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selection {
    Single(char),
    /// Inclusive, bounds already ordered.
    Range(char, char),
    All,
    Space,
}

/// Verbe d'édition du jeu de caractères.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edit {
    Add,
    Remove,
}

impl Edit {
    fn verb(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Remove => "remove",
        }
    }
}

/// Une ligne saisie, analysée.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Chars,
    Edit(Edit, Selection),
    ResUp,
    ResDown,
    Console,
    Render,
    Exit,
    /// `add` / `remove` with an argument that is not a valid selection.
    BadFormat(Edit),
    Unknown,
}

impl Command {
    /// Parse one input line (line terminator already stripped).
    ///
    /// # Example
    /// ```
    /// use lm_app::shell::{Command, Edit, Selection};
    /// assert_eq!(Command::parse("add z-a"), Command::Edit(Edit::Add, Selection::Range('a', 'z')));
    /// assert_eq!(Command::parse("remove"), Command::BadFormat(Edit::Remove));
    /// assert_eq!(Command::parse("res up"), Command::ResUp);
    /// ```
    #[must_use]
    pub fn parse(line: &str) -> Self {
        match line {
            "chars" => return Self::Chars,
            "res up" => return Self::ResUp,
            "res down" => return Self::ResDown,
            "console" => return Self::Console,
            "render" => return Self::Render,
            "exit" => return Self::Exit,
            _ => {}
        }

        for edit in [Edit::Add, Edit::Remove] {
            if let Some(rest) = line.strip_prefix(edit.verb()) {
                return match rest.strip_prefix(' ') {
                    Some(arg) => parse_selection(arg)
                        .map_or(Self::BadFormat(edit), |sel| Self::Edit(edit, sel)),
                    None if rest.is_empty() => Self::BadFormat(edit),
                    None => Self::Unknown,
                };
            }
        }
        Self::Unknown
    }
}

fn parse_selection(arg: &str) -> Option<Selection> {
    match arg {
        "all" => return Some(Selection::All),
        "space" => return Some(Selection::Space),
        _ => {}
    }
    let chars: Vec<char> = arg.chars().collect();
    match chars.as_slice() {
        &[ch] => Some(Selection::Single(ch)),
        &[begin, '-', end] => checked_range(begin, end)
            .ok()
            .map(|(lo, hi)| Selection::Range(lo, hi)),
        _ => None,
    }
}

/// Issue d'une commande : continuer ou quitter la boucle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Boucle interactive : une image, un jeu de caractères modifiable, une
/// résolution et une sortie.
///
/// Le cache de brillance vit aussi longtemps que le shell, de sorte que les
/// rendus successifs réutilisent glyphes et blocs déjà calculés.
pub struct Shell<I: Image> {
    image: I,
    rasterizer: Box<dyn GlyphRasterizer>,
    cache: BrightnessCache,
    charset: CharSet,
    chars_in_row: u32,
    min_chars_in_row: u32,
    max_chars_in_row: u32,
    output: Box<dyn AsciiOutput>,
    output_kind: OutputKind,
}

impl<I: Image> Shell<I> {
    pub fn new(image: I, rasterizer: Box<dyn GlyphRasterizer>, config: &ShellConfig) -> Self {
        let (min, max) =
            resolution_bounds(image.width(), image.height(), config.min_pixels_per_char);
        let chars_in_row = initial_chars_in_row(config.initial_chars_in_row, min, max);
        if chars_in_row != config.initial_chars_in_row {
            log::warn!(
                "initial_chars_in_row {} adjusted to {chars_in_row} (bounds {min}..={max})",
                config.initial_chars_in_row
            );
        }

        let output: Box<dyn AsciiOutput> = match config.output {
            OutputKind::Html => Box::new(HtmlOutput::new(
                &config.html_path,
                &config.font_name,
                config.html_font_size_px,
            )),
            OutputKind::Console => Box::new(ConsoleOutput::stdout()),
        };

        log::info!(
            "Shell ready: {}x{} image, {chars_in_row} chars per row, font '{}'",
            image.width(),
            image.height(),
            rasterizer.font_id()
        );

        Self {
            image,
            rasterizer,
            cache: BrightnessCache::new(),
            charset: CharSet::from_chars(&config.initial_charset),
            chars_in_row,
            min_chars_in_row: min,
            max_chars_in_row: max,
            output,
            output_kind: config.output,
        }
    }

    /// Read commands from `input` until `exit` or end of input.
    ///
    /// # Errors
    /// Returns an error if reading input or writing to `out` fails.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut out: W) -> Result<()> {
        let mut line = String::new();
        loop {
            write!(out, "{PROMPT}")?;
            out.flush()?;
            line.clear();
            if input.read_line(&mut line)? == 0 {
                writeln!(out)?;
                return Ok(());
            }
            let command = Command::parse(line.trim_end_matches(['\n', '\r']));
            log::debug!("Command: {command:?}");
            if self.execute(command, &mut out)? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Apply one command, writing user-facing messages to `out`.
    ///
    /// # Errors
    /// Returns an error if writing to `out` fails.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<Flow> {
        match command {
            Command::Chars => {
                for ch in self.charset.iter() {
                    write!(out, "{ch} ")?;
                }
                writeln!(out)?;
            }
            Command::Edit(edit, selection) => self.apply_edit(edit, selection),
            Command::ResUp => {
                if self.chars_in_row * 2 <= self.max_chars_in_row {
                    self.chars_in_row *= 2;
                    writeln!(out, "Width set to {}", self.chars_in_row)?;
                } else {
                    writeln!(out, "{BOUNDARIES_ERROR}")?;
                }
            }
            Command::ResDown => {
                if self.chars_in_row / 2 >= self.min_chars_in_row {
                    self.chars_in_row /= 2;
                    writeln!(out, "Width set to {}", self.chars_in_row)?;
                } else {
                    writeln!(out, "{BOUNDARIES_ERROR}")?;
                }
            }
            Command::Console => {
                self.output = Box::new(ConsoleOutput::stdout());
                self.output_kind = OutputKind::Console;
            }
            Command::Render => self.render(out)?,
            Command::Exit => return Ok(Flow::Exit),
            Command::BadFormat(edit) => {
                writeln!(out, "Did not {} due to incorrect format", edit.verb())?;
            }
            Command::Unknown => writeln!(out, "{COMMAND_ERROR}")?,
        }
        Ok(Flow::Continue)
    }

    /// Render with the current settings and send the grid to the output.
    ///
    /// An output failure is logged, not returned, so the session survives it.
    ///
    /// # Errors
    /// Returns an error if writing to `out` fails.
    pub fn render<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.charset.is_empty() {
            writeln!(out, "{NO_CHARS_ERROR}")?;
            return Ok(());
        }
        let charset = self.charset.to_vec();
        let grid = lm_ascii::render(
            &self.image,
            self.rasterizer.as_ref(),
            &mut self.cache,
            self.chars_in_row,
            &charset,
        );
        if let Err(e) = self.output.output(&grid) {
            log::error!("Render output failed: {e:#}");
        }
        let stats = self.cache.stats();
        log::debug!(
            "Cache: {} block hits, {} misses, {} glyph hits, resolutions {:?}",
            stats.block_hits,
            stats.block_misses,
            stats.char_hits,
            self.cache.cached_resolutions()
        );
        Ok(())
    }

    fn apply_edit(&mut self, edit: Edit, selection: Selection) {
        let (begin, end) = match selection {
            Selection::Single(ch) => (ch, ch),
            Selection::Range(lo, hi) => (lo, hi),
            Selection::All => (FIRST_RENDERABLE, LAST_RENDERABLE),
            Selection::Space => (' ', ' '),
        };
        match edit {
            Edit::Add => self.charset.add_range(begin, end),
            Edit::Remove => self.charset.remove_range(begin, end),
        }
    }

    #[must_use]
    pub fn chars_in_row(&self) -> u32 {
        self.chars_in_row
    }

    #[must_use]
    pub fn charset(&self) -> &CharSet {
        &self.charset
    }

    #[must_use]
    pub fn output_kind(&self) -> OutputKind {
        self.output_kind
    }

    #[must_use]
    pub fn cache(&self) -> &BrightnessCache {
        &self.cache
    }
}

/// `(min, max)` characters per row for a `width × height` image.
///
/// `min` keeps blocks no taller than the image, `max` keeps them at least
/// `min_pixels_per_char` wide.
fn resolution_bounds(width: u32, height: u32, min_pixels_per_char: u32) -> (u32, u32) {
    let min = (width / height.max(1)).max(1);
    let max = width / min_pixels_per_char.max(1);
    (min, max)
}

/// Clamp into the bounds, then round down to a power of two so the block
/// size divides the padded image.
fn initial_chars_in_row(requested: u32, min: u32, max: u32) -> u32 {
    let clamped = requested.min(max).max(min);
    let pow2 = if clamped.is_power_of_two() {
        clamped
    } else {
        1 << (u32::BITS - 1 - clamped.leading_zeros())
    };
    pow2.max(min)
}
