use std::path::Path;

use anyhow::{Context, Result};
use gt_core::frame::AsciiGrid;

/// Grille → texte brut, lignes séparées par `\n`, sans saut final.
/// Les couleurs sont ignorées.
///
/// # Example
/// ```
/// use gt_core::frame::{AsciiCell, AsciiGrid};
/// use gt_export::text::to_text;
/// let cells = "abcdef".chars().map(|ch| AsciiCell { ch, color: None }).collect();
/// let grid = AsciiGrid::from_stream(cells, 3);
/// assert_eq!(to_text(&grid), "abc\ndef");
/// ```
#[must_use]
pub fn to_text(grid: &AsciiGrid) -> String {
    let mut out = String::with_capacity(grid.cells.len() + grid.height as usize);
    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.extend(row.iter().map(|c| c.ch));
    }
    out
}

/// Écrit la grille en texte UTF-8.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_text(path: &Path, grid: &AsciiGrid) -> Result<()> {
    std::fs::write(path, to_text(grid))
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("Texte exporté : {}", path.display());
    Ok(())
}
