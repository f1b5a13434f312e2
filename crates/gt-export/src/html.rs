use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use gt_core::frame::{AsciiCell, AsciiGrid};

const HTML_HEAD: &str = "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>ASCII Art</title>
<style>
body { background-color: #2B2B2B; }
pre { font-family: 'Courier New', Courier, monospace; font-size: 10px; line-height: 0.8; }
</style>
</head>
<body>
<pre>
";

const HTML_TAIL: &str = "</pre>
</body>
</html>
";

/// Grille → document HTML autonome.
///
/// Colored cells become `<span style="color:#rrggbb">c</span>`, uncolored
/// cells are emitted as-is. Each row ends with `\n` inside the `<pre>` block.
///
/// # Example
/// ```
/// use gt_core::frame::{AsciiCell, AsciiGrid};
/// use gt_export::html::to_html;
/// let grid = AsciiGrid::from_stream(vec![AsciiCell { ch: '@', color: Some((255, 0, 16)) }], 1);
/// assert!(to_html(&grid).contains("<span style=\"color:#ff0010\">@</span>\n"));
/// ```
#[must_use]
pub fn to_html(grid: &AsciiGrid) -> String {
    let mut out = String::with_capacity(HTML_HEAD.len() + HTML_TAIL.len() + grid.cells.len() * 32);
    out.push_str(HTML_HEAD);
    for row in grid.rows() {
        for cell in row {
            push_cell(&mut out, cell);
        }
        out.push('\n');
    }
    out.push_str(HTML_TAIL);
    out
}

fn push_cell(out: &mut String, cell: &AsciiCell) {
    match cell.color {
        Some((r, g, b)) => {
            let _ = write!(out, "<span style=\"color:#{r:02x}{g:02x}{b:02x}\">");
            push_escaped(out, cell.ch);
            out.push_str("</span>");
        }
        None => push_escaped(out, cell.ch),
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        c => out.push(c),
    }
}

/// Écrit la grille en HTML UTF-8.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_html(path: &Path, grid: &AsciiGrid) -> Result<()> {
    std::fs::write(path, to_html(grid))
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("HTML exporté : {}", path.display());
    Ok(())
}
