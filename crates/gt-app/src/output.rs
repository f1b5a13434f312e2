use std::io::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use gt_core::frame::AsciiGrid;

use crate::cli::Format;

/// Encode une grille dans le format demandé.
///
/// # Errors
/// Returns an error if the ANSI encoder fails.
pub fn encode(grid: &AsciiGrid, format: Format) -> Result<String> {
    match format {
        Format::Text => Ok(gt_export::text::to_text(grid)),
        Format::Html => Ok(gt_export::html::to_html(grid)),
        Format::Ansi => crate::preview::to_ansi(grid),
    }
}

/// Écrit la grille dans `path`, ou sur stdout si `None`.
///
/// # Errors
/// Returns an error if encoding or writing fails.
pub fn emit(grid: &AsciiGrid, format: Format, path: Option<&Path>) -> Result<()> {
    match (format, path) {
        (Format::Text, Some(p)) => gt_export::text::write_text(p, grid),
        (Format::Html, Some(p)) => gt_export::html::write_html(p, grid),
        (Format::Ansi, Some(p)) => {
            std::fs::write(p, encode(grid, format)?)
                .with_context(|| format!("Impossible d'écrire {}", p.display()))?;
            log::info!("ANSI exporté : {}", p.display());
            Ok(())
        }
        (_, None) => {
            let mut out = std::io::stdout().lock();
            writeln!(out, "{}", encode(grid, format)?).context("Écriture stdout impossible")?;
            out.flush().context("Écriture stdout impossible")
        }
    }
}
