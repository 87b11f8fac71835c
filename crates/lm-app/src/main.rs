use std::io;

use anyhow::Result;
use clap::Parser;
use lm_app::{cli, shell};
use lm_core::config::ShellConfig;
use lm_source::PaddedImage;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Charger la config, puis appliquer les overrides CLI
    let mut config = resolve_config(&cli)?;
    cli.apply_overrides(&mut config);

    // 4. Image et glyphes
    let image = PaddedImage::open(&cli.image)?;
    let rasterizer = lm_glyph::load_rasterizer(&config);

    // 5. Shell
    let mut shell = shell::Shell::new(image, rasterizer, &config);
    let stdout = io::stdout();
    if cli.render_once {
        shell.render(&mut stdout.lock())
    } else {
        shell.run(io::stdin().lock(), stdout.lock())
    }
}

/// Resolve config: a missing file falls back to defaults.
fn resolve_config(cli: &cli::Cli) -> Result<ShellConfig> {
    if cli.config.exists() {
        lm_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(ShellConfig::default())
    }
}
