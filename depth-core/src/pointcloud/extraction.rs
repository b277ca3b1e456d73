use crate::error::ExtractionError;
use crate::pointcloud::point::PointCloud;
use crate::pointcloud::sampling::{
    policy::SamplingSteps,
    sampler::{GridSampler, PixelSampler},
};

/// Builds the full and preview buffers of one depth image.
///
/// Both passes read the same pixels with the same `depth_scale`; only the
/// sampling step differs (see [`SamplingSteps::for_dimensions`]). A zero
/// width or height produces an empty cloud.
pub fn build_point_cloud(
    pixels: &[u8],
    width: usize,
    height: usize,
    depth_scale: f32,
) -> Result<PointCloud, ExtractionError> {
    let steps = SamplingSteps::for_dimensions(width, height);
    log::debug!(
        "sampling {}x{} depth image (full step: {}, preview step: {})",
        width,
        height,
        steps.full,
        steps.preview
    );

    let start = std::time::Instant::now();
    let full = GridSampler::new(steps.full, depth_scale).sample(pixels, width, height)?;
    let preview = GridSampler::new(steps.preview, depth_scale).sample(pixels, width, height)?;
    log::debug!(
        "extracted {} full / {} preview points in {:?}",
        full.point_count(),
        preview.point_count(),
        start.elapsed()
    );

    Ok(PointCloud { full, preview })
}
