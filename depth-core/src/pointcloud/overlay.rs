use crate::error::ExtractionError;
use crate::pointcloud::sampling::{policy::full_step, sampler::sample_colors};

/// Samples true colors from an image whose dimensions equal the depth
/// image's. The step follows the full-density rule, so index `i` of the
/// result lines up with point `i` of `PointCloud::full`.
///
/// Checking that the two images have the same dimensions is the caller's
/// job; this only verifies that `pixels` is consistent with `width` and
/// `height`.
pub fn extract_color_overlay(
    pixels: &[u8],
    width: usize,
    height: usize,
) -> Result<Vec<f32>, ExtractionError> {
    let step = full_step(width, height);
    let colors = sample_colors(pixels, width, height, step)?;
    log::debug!(
        "sampled {} overlay colors from {}x{} image (step: {})",
        colors.len() / 3,
        width,
        height,
        step
    );
    Ok(colors)
}
