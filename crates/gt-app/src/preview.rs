use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use arc_swap::ArcSwap;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};
use crossterm::{execute, queue};
use gt_core::config::Settings;
use gt_core::frame::{AsciiGrid, FrameBuffer};

use crate::cli::{Format, Overrides};
use crate::hotreload;

/// Grille → séquences ANSI truecolor. La couleur n'est réémise que lorsqu'elle
/// change ; chaque ligne se termine par un reset.
///
/// # Errors
/// Returns an error if a command cannot be encoded.
pub fn to_ansi(grid: &AsciiGrid) -> Result<String> {
    let mut buf: Vec<u8> = Vec::with_capacity(grid.cells.len() * 4);
    for (i, row) in grid.rows().enumerate() {
        if i > 0 {
            queue!(buf, Print('\n'))?;
        }
        let mut current = None;
        for cell in row {
            if cell.color != current {
                match cell.color {
                    Some((r, g, b)) => queue!(buf, SetForegroundColor(Color::Rgb { r, g, b }))?,
                    None => queue!(buf, ResetColor)?,
                }
                current = cell.color;
            }
            queue!(buf, Print(cell.ch))?;
        }
        if current.is_some() {
            queue!(buf, ResetColor)?;
        }
    }
    String::from_utf8(buf).context("Séquence ANSI non UTF-8")
}

/// Aperçu en direct : affiche le rendu de `frame`, puis le refait à chaque
/// rechargement de la config. Bloque jusqu'à l'arrêt du watcher (Ctrl-C).
///
/// # Errors
/// Returns an error if the watcher cannot start or the terminal is unusable.
pub fn run_watch(
    frame: &FrameBuffer,
    config_path: &Path,
    settings: Settings,
    overrides: Overrides,
) -> Result<()> {
    let settings = Arc::new(ArcSwap::from_pointee(settings));
    let (wake_tx, wake_rx) = flume::unbounded();

    let _watcher = if config_path.exists() {
        Some(hotreload::spawn_config_watcher(
            config_path,
            &settings,
            overrides,
            wake_tx,
        )?)
    } else {
        log::warn!(
            "Config introuvable : {}. Aperçu statique.",
            config_path.display()
        );
        drop(wake_tx);
        None
    };

    draw(frame, &settings.load())?;
    while wake_rx.recv().is_ok() {
        // Un enregistrement produit souvent plusieurs événements.
        while wake_rx.try_recv().is_ok() {}
        draw(frame, &settings.load())?;
    }
    Ok(())
}

fn draw(frame: &FrameBuffer, settings: &Settings) -> Result<()> {
    let mut out = std::io::stdout().lock();
    execute!(out, Clear(ClearType::All), MoveTo(0, 0))?;
    match gt_ascii::render(frame, &settings.render) {
        Ok(grid) => {
            let format = if grid.is_colored() {
                Format::Ansi
            } else {
                Format::Text
            };
            writeln!(out, "{}", crate::output::encode(&grid, format)?)?;
            writeln!(
                out,
                "{}×{} · palette {} · contraste {:.2} · luminosité {:.2} · gamma {:.2}",
                grid.width,
                grid.height,
                settings.palette_name,
                settings.render.contrast,
                settings.render.brightness,
                settings.render.gamma
            )?;
        }
        Err(e) => {
            log::warn!("Rendu impossible : {e}");
            writeln!(out, "Rendu impossible : {e}")?;
        }
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::frame::AsciiCell;

    #[test]
    fn monochrome_grid_has_no_escapes() {
        let cells = "ab\u{20}c".chars().map(|ch| AsciiCell { ch, color: None }).collect();
        let ansi = to_ansi(&AsciiGrid::from_stream(cells, 2)).unwrap();
        assert_eq!(ansi, "ab\n c");
    }

    #[test]
    fn color_is_emitted_once_per_run() {
        let red = Some((255, 0, 0));
        let cells = vec![
            AsciiCell { ch: 'a', color: red },
            AsciiCell { ch: 'b', color: red },
            AsciiCell { ch: 'c', color: Some((0, 0, 255)) },
        ];
        let ansi = to_ansi(&AsciiGrid::from_stream(cells, 3)).unwrap();
        assert_eq!(ansi.matches("38;2;255;0;0").count(), 1);
        assert_eq!(ansi.matches("38;2;0;0;255").count(), 1);
        assert!(ansi.contains("ab"));
        assert!(ansi.ends_with("\u{1b}[0m"));
    }
}
