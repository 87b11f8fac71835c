use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Configuration du shell et du rendu.
///
/// Sérialisable en TOML. Chaque champ a une valeur par défaut saine.
///
/// # Example
/// ```
/// use lm_core::config::ShellConfig;
/// let config = ShellConfig::default();
/// assert_eq!(config.initial_chars_in_row, 64);
/// assert_eq!(config.font_name, "Courier New");
/// ```
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ShellConfig {
    // === Police ===
    /// Fichier TTF/OTF utilisé pour rasteriser les glyphes. `None` = glyphes intégrés.
    pub font_path: Option<PathBuf>,
    /// Font identifier, also emitted as the HTML font-family.
    pub font_name: String,

    // === Résolution ===
    /// Characters per row at startup, clamped to the image bounds.
    pub initial_chars_in_row: u32,
    /// Smallest block edge in pixels, bounds `res up`.
    pub min_pixels_per_char: u32,

    // === Caractères ===
    /// Jeu de caractères initial.
    pub initial_charset: String,

    // === Sortie ===
    pub output: OutputKind,
    /// Fichier HTML écrit par `render` en mode HTML.
    pub html_path: PathBuf,
    /// Font size of the HTML rendering, in pixels.
    pub html_font_size_px: u32,
}

/// Output back-end selection.
///
/// # Example
/// ```
/// use lm_core::config::OutputKind;
/// assert_eq!(OutputKind::default(), OutputKind::Html);
/// ```
#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum OutputKind {
    /// Standalone HTML file.
    #[default]
    Html,
    /// Plain text on stdout.
    Console,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            font_path: None,
            font_name: "Courier New".to_string(),
            initial_chars_in_row: 64,
            min_pixels_per_char: 2,
            initial_charset: crate::charset::CHARSET_DIGITS.to_string(),
            output: OutputKind::Html,
            html_path: PathBuf::from("out.html"),
            html_font_size_px: 4,
        }
    }
}

impl ShellConfig {
    /// Clamp all numeric fields to their valid ranges.
    /// Called after TOML deserialization to prevent out-of-range values.
    pub fn clamp_all(&mut self) {
        self.initial_chars_in_row = self.initial_chars_in_row.max(1);
        self.min_pixels_per_char = self.min_pixels_per_char.clamp(1, 64);
        self.html_font_size_px = self.html_font_size_px.clamp(1, 72);
    }

    /// Reject values that clamping cannot repair.
    ///
    /// # Errors
    /// Returns [`CoreError::Config`] for an empty font name.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.font_name.trim().is_empty() {
            return Err(CoreError::Config("font_name must not be empty".into()));
        }
        Ok(())
    }
}

/// Structure TOML intermédiaire pour désérialisation avec valeurs optionnelles.
#[derive(Deserialize)]
struct ConfigFile {
    font: Option<FontSection>,
    shell: Option<ShellSection>,
    output: Option<OutputSection>,
}

#[derive(Deserialize)]
struct FontSection {
    path: Option<PathBuf>,
    name: Option<String>,
}

#[derive(Deserialize)]
struct ShellSection {
    initial_chars_in_row: Option<u32>,
    min_pixels_per_char: Option<u32>,
    initial_charset: Option<String>,
}

#[derive(Deserialize)]
struct OutputSection {
    kind: Option<OutputKind>,
    html_path: Option<PathBuf>,
    html_font_size_px: Option<u32>,
}

/// Charge un fichier TOML et fusionne avec les valeurs par défaut.
///
/// # Errors
/// Returns an error if the file cannot be read, parsed or validated.
///
/// # Example
/// ```no_run
/// use lm_core::config::load_config;
/// use std::path::Path;
/// let config = load_config(Path::new("config/default.toml")).unwrap();
/// ```
pub fn load_config(path: &Path) -> Result<ShellConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Cannot read {}", path.display()))?;
    parse_config(&content).with_context(|| format!("Invalid config in {}", path.display()))
}

/// Parse TOML text and merge it onto the defaults.
///
/// # Errors
/// Returns an error on malformed TOML or an invalid value.
///
/// # Example
/// ```
/// use lm_core::config::{parse_config, OutputKind};
/// let config = parse_config("[output]\nkind = \"Console\"\n").unwrap();
/// assert_eq!(config.output, OutputKind::Console);
/// assert_eq!(config.initial_chars_in_row, 64);
/// ```
pub fn parse_config(content: &str) -> Result<ShellConfig> {
    let file: ConfigFile = toml::from_str(content).context("TOML parse error")?;

    let mut config = ShellConfig::default();

    if let Some(f) = file.font {
        if let Some(v) = f.path {
            config.font_path = Some(v);
        }
        if let Some(v) = f.name {
            config.font_name = v;
        }
    }

    if let Some(s) = file.shell {
        if let Some(v) = s.initial_chars_in_row {
            config.initial_chars_in_row = v;
        }
        if let Some(v) = s.min_pixels_per_char {
            config.min_pixels_per_char = v;
        }
        if let Some(v) = s.initial_charset {
            config.initial_charset = v;
        }
    }

    if let Some(o) = file.output {
        if let Some(v) = o.kind {
            config.output = v;
        }
        if let Some(v) = o.html_path {
            config.html_path = v;
        }
        if let Some(v) = o.html_font_size_px {
            config.html_font_size_px = v;
        }
    }

    config.clamp_all();
    config.validate()?;
    log::debug!("Config loaded: {config:?}");
    Ok(config)
}
