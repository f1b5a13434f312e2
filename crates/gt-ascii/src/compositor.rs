use gt_core::config::RenderConfig;
use gt_core::error::CoreError;
use gt_core::frame::{AsciiGrid, FrameBuffer};

use crate::dither::floyd_steinberg;
use crate::tone::ToneCurve;

/// Render `frame` with `config`, monochrome or colored per
/// `config.color_enabled`.
///
/// The configuration is validated first; nothing is rendered for an invalid
/// one. The source frame is never modified.
///
/// # Errors
/// - [`CoreError::InvalidConfig`] if `config` fails validation or the output
///   would exceed `gt_source::resize::MAX_OUTPUT_DIM` on a side.
/// - [`CoreError::EmptyOutput`] for a zero-sized source.
/// - [`CoreError::Resize`] if resampling fails.
///
/// # Example
/// ```
/// use gt_core::frame::FrameBuffer;
/// use gt_core::config::RenderConfig;
/// use gt_ascii::render;
///
/// let frame = FrameBuffer::filled(40, 20, (200, 200, 200));
/// let config = RenderConfig { target_width: 10, ..RenderConfig::default() };
/// let grid = render(&frame, &config).unwrap();
/// assert_eq!(grid.width, 10);
/// ```
pub fn render(frame: &FrameBuffer, config: &RenderConfig) -> Result<AsciiGrid, CoreError> {
    config.validate()?;
    if config.color_enabled {
        crate::color_map::render_color(frame, config)
    } else {
        crate::luminance::render_monochrome(frame, config)
    }
}

/// Gray plane → tone curve → optional Floyd–Steinberg, for a resized frame.
///
/// Returns one luminance level per pixel, row-major. Values are within
/// [0, 255] unless dithering is on.
pub(crate) fn luminance_levels(
    resized: &FrameBuffer,
    config: &RenderConfig,
    gamma: Option<f64>,
) -> Vec<i32> {
    let gray = resized.gray_plane();
    let toned = ToneCurve::new(config.contrast, config.brightness, gamma).apply(&gray);
    if config.dither {
        floyd_steinberg(&toned, resized.width as usize, resized.height as usize)
    } else {
        toned.into_iter().map(i32::from).collect()
    }
}
