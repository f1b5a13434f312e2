use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use gt_core::config::RenderConfig;
use rayon::prelude::*;

use crate::cli::Format;

/// Chemin de sortie d'une image : `<out_dir>/<stem>.<ext>`.
#[must_use]
pub fn output_path(out_dir: &Path, image: &Path, format: Format) -> PathBuf {
    let stem = image
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("image");
    out_dir.join(format!("{stem}.{}", format.extension()))
}

/// Rend chaque image indépendamment, en parallèle, dans `out_dir`.
///
/// Une image en échec n'interrompt pas les autres ; l'erreur globale indique
/// combien ont échoué.
///
/// # Errors
/// Returns an error if `out_dir` cannot be created or any image fails.
pub fn run_batch(
    images: &[PathBuf],
    out_dir: &Path,
    config: &RenderConfig,
    format: Format,
) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("Impossible de créer {}", out_dir.display()))?;
    log::info!(
        "Batch : {} image(s) → {}",
        images.len(),
        out_dir.display()
    );

    let results: Vec<(&PathBuf, Result<PathBuf>)> = images
        .par_iter()
        .map(|image| (image, render_one(image, out_dir, config, format)))
        .collect();

    let mut written = Vec::with_capacity(results.len());
    let mut failures = 0usize;
    for (image, result) in results {
        match result {
            Ok(path) => written.push(path),
            Err(e) => {
                failures += 1;
                log::error!("{} : {e:#}", image.display());
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} image(s) sur {} en échec", images.len());
    }
    Ok(written)
}

fn render_one(image: &Path, out_dir: &Path, config: &RenderConfig, format: Format) -> Result<PathBuf> {
    let frame = gt_source::image::load_image(image)?;
    let grid = gt_ascii::render(&frame, config)
        .with_context(|| format!("Rendu impossible pour {}", image.display()))?;
    let path = output_path(out_dir, image, format);
    crate::output::emit(&grid, format, Some(&path))?;
    Ok(path)
}
