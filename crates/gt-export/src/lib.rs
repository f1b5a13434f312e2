/// Exporters for glyphtone grids: plain text and colored HTML.

pub mod html;
pub mod text;
