/// ASCII conversion engine for glyphtone.
///
/// Converts pixel frames to character grids: tone curve, error diffusion,
/// glyph lookup, monochrome and colored paths.

pub mod color_map;
pub mod compositor;
pub mod dither;
pub mod glyph;
pub mod luminance;
pub mod tone;

pub use compositor::render;
