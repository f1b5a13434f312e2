use gt_core::config::RenderConfig;
use gt_core::error::CoreError;
use gt_core::frame::{AsciiCell, AsciiGrid, FrameBuffer};
use gt_source::resize::resize_to_width;

use crate::compositor::luminance_levels;
use crate::glyph::GlyphMapper;

/// Rendu monochrome : resize → gris → contraste, luminosité, gamma →
/// tramage optionnel → inversion optionnelle → glyphe.
///
/// The glyph stream is cut into rows of exactly `config.target_width`
/// characters; a trailing partial row is dropped. Cells carry no color.
///
/// # Errors
/// Returns [`CoreError::EmptyOutput`] for a zero-sized source and
/// [`CoreError::Resize`] if resampling fails. The configuration is assumed
/// validated (see [`crate::render`]).
///
/// # Example
/// ```
/// use gt_core::frame::FrameBuffer;
/// use gt_core::config::RenderConfig;
/// use gt_ascii::luminance::render_monochrome;
///
/// let frame = FrameBuffer::filled(100, 50, (0, 0, 0));
/// let config = RenderConfig { target_width: 20, ..RenderConfig::default() };
/// let grid = render_monochrome(&frame, &config).unwrap();
/// assert_eq!((grid.width, grid.height), (20, 5));
/// ```
pub fn render_monochrome(frame: &FrameBuffer, config: &RenderConfig) -> Result<AsciiGrid, CoreError> {
    let resized = resize_to_width(frame, config.target_width, config.aspect_factor)?;
    let levels = luminance_levels(&resized, config, Some(config.gamma));
    let mapper = GlyphMapper::new(&config.palette, config.invert);

    let stream: Vec<AsciiCell> = levels
        .into_iter()
        .map(|v| AsciiCell {
            ch: mapper.map(v),
            color: None,
        })
        .collect();

    let grid = AsciiGrid::from_stream(stream, config.target_width);
    if grid.height == 0 {
        return Err(CoreError::EmptyOutput {
            width: grid.width,
            height: grid.height,
        });
    }
    log::debug!("Rendu monochrome {}×{}", grid.width, grid.height);
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::palette::Palette;

    fn config(width: u32, aspect: f64) -> RenderConfig {
        RenderConfig {
            target_width: width,
            contrast: 1.0,
            brightness: 1.0,
            gamma: 1.0,
            aspect_factor: aspect,
            palette: Palette::new("0123456789").unwrap(),
            ..RenderConfig::default()
        }
    }

    #[test]
    fn dimensions_follow_resize_law() {
        let frame = FrameBuffer::filled(90, 60, (50, 60, 70));
        for (width, aspect) in [(30, 0.5), (7, 1.0), (45, 0.3), (1, 1.0)] {
            let grid = render_monochrome(&frame, &config(width, aspect)).unwrap();
            let expected_h = (f64::from(width) * 60.0 / 90.0 * aspect).round().max(1.0) as u32;
            assert_eq!(grid.height, expected_h);
            assert_eq!(grid.width, width);
            assert!(grid.rows().all(|row| row.len() == width as usize));
            assert_eq!(grid.rows().count(), expected_h as usize);
        }
    }

    #[test]
    fn gamma_applies_on_monochrome_path() {
        let frame = FrameBuffer::filled(2, 2, (128, 128, 128));
        let cfg = RenderConfig {
            gamma: 2.0,
            ..config(2, 1.0)
        };
        // 255 × (128/255)² = 64.25 → 64 → 64 × 10 / 256 = 2
        let grid = render_monochrome(&frame, &cfg).unwrap();
        assert!(grid.cells.iter().all(|c| c.ch == '2'));
    }

    #[test]
    fn invert_flips_glyph_choice() {
        let frame = FrameBuffer::filled(3, 3, (255, 255, 255));
        let plain = render_monochrome(&frame, &config(3, 1.0)).unwrap();
        let inverted = render_monochrome(
            &frame,
            &RenderConfig {
                invert: true,
                ..config(3, 1.0)
            },
        )
        .unwrap();
        assert!(plain.cells.iter().all(|c| c.ch == '9'));
        assert!(inverted.cells.iter().all(|c| c.ch == '0'));
    }

    #[test]
    fn dithered_interior_uses_extreme_glyphs_only() {
        let frame = FrameBuffer::filled(16, 16, (128, 128, 128));
        let cfg = RenderConfig {
            dither: true,
            ..config(16, 1.0)
        };
        let grid = render_monochrome(&frame, &cfg).unwrap();
        for y in 0..grid.height - 1 {
            for x in 1..grid.width - 1 {
                let ch = grid.get(x, y).ch;
                assert!(ch == '0' || ch == '9', "({x}, {y}) = {ch}");
            }
        }
        // boundary cells keep the undithered level: 128 → '5'
        assert_eq!(grid.get(0, 0).ch, '5');
        assert_eq!(grid.get(15, 15).ch, '5');
    }
}
