use gt_core::config::RenderConfig;
use gt_core::error::CoreError;
use gt_core::frame::{AsciiCell, AsciiGrid, FrameBuffer};
use gt_source::resize::resize_to_width;

use crate::compositor::luminance_levels;
use crate::glyph::GlyphMapper;

/// Rendu couleur : chaque cellule porte le glyphe du pipeline gris et la
/// couleur RGB du pixel redimensionné correspondant.
///
/// Gamma is only applied when `config.color_gamma` is set; by default the
/// colored path uses contrast and brightness alone. The grid is exactly the
/// resized width × height, nothing is truncated.
///
/// # Errors
/// Returns [`CoreError::EmptyOutput`] for a zero-sized source and
/// [`CoreError::Resize`] if resampling fails.
///
/// # Example
/// ```
/// use gt_core::frame::FrameBuffer;
/// use gt_core::config::RenderConfig;
/// use gt_ascii::color_map::render_color;
///
/// let frame = FrameBuffer::filled(8, 8, (200, 50, 50));
/// let config = RenderConfig { target_width: 8, aspect_factor: 1.0, ..RenderConfig::default() };
/// let grid = render_color(&frame, &config).unwrap();
/// assert_eq!(grid.get(3, 3).color, Some((200, 50, 50)));
/// ```
pub fn render_color(frame: &FrameBuffer, config: &RenderConfig) -> Result<AsciiGrid, CoreError> {
    let resized = resize_to_width(frame, config.target_width, config.aspect_factor)?;
    let gamma = config.color_gamma.then_some(config.gamma);
    let levels = luminance_levels(&resized, config, gamma);
    let mapper = GlyphMapper::new(&config.palette, config.invert);

    let cells: Vec<AsciiCell> = levels
        .into_iter()
        .zip(resized.data.chunks_exact(4))
        .map(|(v, px)| AsciiCell {
            ch: mapper.map(v),
            color: Some((px[0], px[1], px[2])),
        })
        .collect();

    log::debug!("Rendu couleur {}×{}", resized.width, resized.height);
    Ok(AsciiGrid {
        cells,
        width: resized.width,
        height: resized.height,
    })
}
