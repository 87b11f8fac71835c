use std::path::PathBuf;

use clap::Parser;
use lm_core::config::{OutputKind, ShellConfig};

/// lumascii: brightness-matched character art from bitmap images.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Image source (PNG, JPEG, BMP, GIF).
    #[arg(long)]
    pub image: PathBuf,

    /// Fichier de configuration TOML. Défaut : config/default.toml.
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: PathBuf,

    /// Police TTF/OTF pour la rasterisation (remplace `[font] path`).
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Nom de la police (clé de cache et font-family HTML).
    /// Défaut avec `--font` : nom du fichier sans extension.
    #[arg(long)]
    pub font_name: Option<String>,

    /// Caractères par ligne au démarrage.
    #[arg(long)]
    pub chars_in_row: Option<u32>,

    /// Sortie console au lieu du fichier HTML.
    #[arg(long, default_value_t = false)]
    pub console: bool,

    /// Render once with the initial settings and exit, without the shell.
    #[arg(long, default_value_t = false)]
    pub render_once: bool,

    /// Niveau de log : error, warn, info, debug, trace.
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Cli {
    /// Apply command-line overrides on top of the loaded config.
    pub fn apply_overrides(&self, config: &mut ShellConfig) {
        if let Some(ref font) = self.font {
            config.font_path = Some(font.clone());
            if let Some(stem) = font.file_stem().and_then(|s| s.to_str()) {
                config.font_name = stem.to_string();
            }
        }
        if let Some(ref name) = self.font_name {
            config.font_name.clone_from(name);
        }
        if let Some(n) = self.chars_in_row {
            config.initial_chars_in_row = n;
        }
        if self.console {
            config.output = OutputKind::Console;
        }
        config.clamp_all();
    }
}
