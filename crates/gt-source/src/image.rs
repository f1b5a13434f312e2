use std::path::Path;

use anyhow::{Context, Result};
use gt_core::frame::FrameBuffer;
use image::DynamicImage;

/// Charge une image (PNG, JPEG, BMP, GIF) en RGBA8.
///
/// # Errors
/// Returns an error if the image cannot be opened or decoded.
///
/// # Example
/// ```no_run
/// use gt_source::image::load_image;
/// use std::path::Path;
/// let frame = load_image(Path::new("photo.png")).unwrap();
/// ```
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    let frame = frame_from_image(img);
    log::info!(
        "Image chargée : {} ({}×{})",
        path.display(),
        frame.width,
        frame.height
    );
    Ok(frame)
}

/// Convertit une image décodée en [`FrameBuffer`] RGBA.
///
/// # Example
/// ```
/// use gt_source::image::frame_from_image;
/// let img = image::DynamicImage::new_rgb8(3, 2);
/// let frame = frame_from_image(img);
/// assert_eq!((frame.width, frame.height), (3, 2));
/// assert_eq!(frame.pixel(0, 0), (0, 0, 0, 255));
/// ```
#[must_use]
pub fn frame_from_image(img: DynamicImage) -> FrameBuffer {
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    FrameBuffer {
        data: rgba.into_raw(),
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn loads_png_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("solid.png");
        RgbaImage::from_pixel(5, 3, Rgba([10, 200, 30, 255]))
            .save(&path)
            .unwrap();

        let frame = load_image(&path).unwrap();
        assert_eq!((frame.width, frame.height), (5, 3));
        assert_eq!(frame.pixel(4, 2), (10, 200, 30, 255));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_image(&dir.path().join("absent.png")).is_err());
    }

    #[test]
    fn garbage_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"not an image").unwrap();
        assert!(load_image(&path).is_err());
    }
}
