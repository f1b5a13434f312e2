use fast_image_resize::images::{Image, ImageRef};
use fast_image_resize::{FilterType, PixelType, ResizeAlg, ResizeOptions, Resizer};
use gt_core::error::CoreError;
use gt_core::frame::FrameBuffer;

/// Borne sur chaque dimension de sortie, en cellules.
pub const MAX_OUTPUT_DIM: u32 = 1 << 16;

/// Dimensions de sortie en cellules pour une source `src_width`×`src_height`.
///
/// `height = round(target_width × src_height / src_width × aspect_factor)`,
/// au minimum 1.
///
/// # Errors
/// - [`CoreError::EmptyOutput`] if the source or the target width is 0.
/// - [`CoreError::InvalidConfig`] if either output dimension exceeds
///   [`MAX_OUTPUT_DIM`].
///
/// # Example
/// ```
/// use gt_source::resize::target_dimensions;
/// assert_eq!(target_dimensions(100, 50, 40, 0.5).unwrap(), (40, 10));
/// ```
pub fn target_dimensions(
    src_width: u32,
    src_height: u32,
    target_width: u32,
    aspect_factor: f64,
) -> Result<(u32, u32), CoreError> {
    if src_width == 0 || src_height == 0 || target_width == 0 {
        return Err(CoreError::EmptyOutput {
            width: target_width,
            height: src_height,
        });
    }
    let ratio = f64::from(src_height) / f64::from(src_width);
    let height = (f64::from(target_width) * ratio * aspect_factor).round().max(1.0);
    if target_width > MAX_OUTPUT_DIM || height > f64::from(MAX_OUTPUT_DIM) {
        return Err(CoreError::InvalidConfig(format!(
            "sortie {target_width}×{height} hors limites (max {MAX_OUTPUT_DIM} par côté)"
        )));
    }
    Ok((target_width, height as u32))
}

/// Resample `src` into `dst` (Lanczos3). Dimensions of `dst` determine the
/// output size; same-size inputs are copied verbatim.
///
/// # Errors
/// Returns [`CoreError::Resize`] if either buffer does not match its
/// declared dimensions or the resampler fails.
///
/// # Example
/// ```
/// use gt_source::resize::resize_into;
/// use gt_core::frame::FrameBuffer;
/// let src = FrameBuffer::new(100, 100);
/// let mut dst = FrameBuffer::new(50, 50);
/// resize_into(&src, &mut dst).unwrap();
/// ```
pub fn resize_into(src: &FrameBuffer, dst: &mut FrameBuffer) -> Result<(), CoreError> {
    if src.width == dst.width && src.height == dst.height && src.data.len() == dst.data.len() {
        dst.data.copy_from_slice(&src.data);
        return Ok(());
    }

    let src_image = ImageRef::new(src.width, src.height, &src.data, PixelType::U8x4)
        .map_err(|e| CoreError::Resize(format!("source : {e}")))?;

    let mut dst_image =
        Image::from_slice_u8(dst.width, dst.height, &mut dst.data, PixelType::U8x4)
            .map_err(|e| CoreError::Resize(format!("destination : {e}")))?;

    let options = ResizeOptions::new().resize_alg(ResizeAlg::Convolution(FilterType::Lanczos3));
    Resizer::new()
        .resize(&src_image, &mut dst_image, Some(&options))
        .map_err(|e| CoreError::Resize(e.to_string()))
}

/// Resample `src` to `target_width` columns, height derived from the source
/// aspect ratio and `aspect_factor`. The source is left untouched.
///
/// # Errors
/// Returns [`CoreError::EmptyOutput`] for a zero-sized source or target,
/// [`CoreError::InvalidConfig`] for an output beyond [`MAX_OUTPUT_DIM`] and
/// [`CoreError::Resize`] if resampling fails.
///
/// # Example
/// ```
/// use gt_source::resize::resize_to_width;
/// use gt_core::frame::FrameBuffer;
/// let src = FrameBuffer::filled(200, 100, (9, 9, 9));
/// let dst = resize_to_width(&src, 20, 0.5).unwrap();
/// assert_eq!((dst.width, dst.height), (20, 5));
/// ```
pub fn resize_to_width(
    src: &FrameBuffer,
    target_width: u32,
    aspect_factor: f64,
) -> Result<FrameBuffer, CoreError> {
    let (width, height) = target_dimensions(src.width, src.height, target_width, aspect_factor)?;
    log::debug!(
        "Resize {}×{} → {width}×{height}",
        src.width,
        src.height
    );
    let mut dst = FrameBuffer::new(width, height);
    resize_into(src, &mut dst)?;
    Ok(dst)
}
