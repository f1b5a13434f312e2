use anyhow::{Context, Result};
use clap::Parser;
use gt_core::config::Settings;

pub mod batch;
pub mod cli;
pub mod hotreload;
pub mod output;
pub mod preview;

fn main() -> Result<()> {
    // 1. Parser CLI
    let cli = cli::Cli::parse();

    // 2. Initialiser le logging
    env_logger::Builder::new()
        .filter_level(cli.log_level.parse().unwrap_or(log::LevelFilter::Warn))
        .init();

    // 3. Valider les entrées
    cli.validate_inputs()?;

    // 4. Charger la config, éditer les palettes, puis appliquer les overrides CLI
    let mut settings = resolve_settings(&cli)?;
    if cli.edits_palettes() {
        cli.edit_palettes(&mut settings)?;
        gt_core::config::save_palettes(&cli.config, &settings.palettes)?;
        if cli.images.is_empty() && !cli.list_palettes {
            return Ok(());
        }
    }
    let overrides = cli.overrides();
    overrides.apply(&mut settings)?;

    if cli.list_palettes {
        for name in settings.palettes.names() {
            let palette = settings.palettes.get(name)?;
            println!("{name:<12} {palette}");
        }
        return Ok(());
    }

    // 5. Aperçu en direct
    if cli.watch {
        let frame = gt_source::image::load_image(&cli.images[0])?;
        return preview::run_watch(&frame, &cli.config, settings, overrides);
    }

    // 6. Batch
    if cli.images.len() > 1 {
        let out_dir = cli
            .out_dir
            .as_deref()
            .context("--out-dir requis en mode batch")?;
        let written = batch::run_batch(&cli.images, out_dir, &settings.render, cli.format)?;
        log::info!("{} fichier(s) écrit(s)", written.len());
        return Ok(());
    }

    // 7. Image unique
    let frame = gt_source::image::load_image(&cli.images[0])?;
    let grid = gt_ascii::render(&frame, &settings.render)
        .with_context(|| format!("Rendu impossible pour {}", cli.images[0].display()))?;
    let path = match (&cli.output, &cli.out_dir) {
        (Some(p), _) => Some(p.clone()),
        (None, Some(dir)) => {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Impossible de créer {}", dir.display()))?;
            Some(batch::output_path(dir, &cli.images[0], cli.format))
        }
        (None, None) => None,
    };
    output::emit(&grid, cli.format, path.as_deref())
}

/// Config file if present, defaults otherwise.
fn resolve_settings(cli: &cli::Cli) -> Result<Settings> {
    if cli.config.exists() {
        gt_core::config::load_config(&cli.config)
    } else {
        log::warn!(
            "Config introuvable : {}. Utilisation des défauts.",
            cli.config.display()
        );
        Ok(Settings::default())
    }
}
