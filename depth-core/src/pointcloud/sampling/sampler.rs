use crate::error::ExtractionError;
use crate::pointcloud::point::PointBuffer;

/// Bytes per pixel of the RGBA layout read by the samplers. Alpha is ignored.
pub const BYTES_PER_PIXEL: usize = 4;

// The largest image dimension spans this many world units.
const REFERENCE_SPAN: f64 = 10.0;
const DEPTH_DIVISOR: f64 = 10.0;

pub trait PixelSampler {
    fn sample(
        &self,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<PointBuffer, ExtractionError>;
}

/// Samples every pixel whose column and row are multiples of `step`.
///
/// Depth comes from the mean of the RGB channels, color from the channels
/// themselves, so a color depth map keeps its hues while still extruding by
/// luminance.
#[derive(Debug, Clone, Copy)]
pub struct GridSampler {
    pub step: usize,
    pub depth_scale: f32,
}

impl GridSampler {
    pub fn new(step: usize, depth_scale: f32) -> Self {
        Self {
            step: step.max(1),
            depth_scale,
        }
    }
}

impl PixelSampler for GridSampler {
    fn sample(
        &self,
        pixels: &[u8],
        width: usize,
        height: usize,
    ) -> Result<PointBuffer, ExtractionError> {
        let step = self.step.max(1);
        if width == 0 || height == 0 {
            return Ok(PointBuffer::default());
        }
        validate_buffer(pixels, width, height)?;

        let count = sample_count(width, height, step);
        let mut positions = Vec::with_capacity(count * 3);
        let mut colors = Vec::with_capacity(count * 3);

        let scale = width.max(height) as f64 / REFERENCE_SPAN;
        let half_width = width as f64 / 2.0;
        let half_height = height as f64 / 2.0;
        let depth_scale = self.depth_scale as f64;

        for (x, y, offset) in grid_offsets(width, height, step) {
            let rgb = &pixels[offset..offset + 3];
            let intensity = (rgb[0] as f64 + rgb[1] as f64 + rgb[2] as f64) / 3.0;
            let depth = intensity / 255.0;

            positions.push(((x as f64 - half_width) / scale) as f32);
            positions.push(((half_height - y as f64) / scale) as f32);
            positions.push(((depth * depth_scale) / DEPTH_DIVISOR) as f32);

            colors.extend_from_slice(&normalize_rgb(rgb));
        }
        debug_assert_eq!(positions.len(), count * 3);

        PointBuffer::new(positions, colors)
    }
}

/// Samples an RGBA buffer into a `PointBuffer` of `ceil(width/step) *
/// ceil(height/step)` points. A zero `step` behaves as 1.
pub fn extract(
    pixels: &[u8],
    width: usize,
    height: usize,
    step: usize,
    depth_scale: f32,
) -> Result<PointBuffer, ExtractionError> {
    GridSampler::new(step, depth_scale).sample(pixels, width, height)
}

/// Color-only variant of the grid walk: the same cells in the same order as
/// `GridSampler`, without positions.
pub fn sample_colors(
    pixels: &[u8],
    width: usize,
    height: usize,
    step: usize,
) -> Result<Vec<f32>, ExtractionError> {
    let step = step.max(1);
    if width == 0 || height == 0 {
        return Ok(Vec::new());
    }
    validate_buffer(pixels, width, height)?;

    let mut colors = Vec::with_capacity(sample_count(width, height, step) * 3);
    for (_, _, offset) in grid_offsets(width, height, step) {
        colors.extend_from_slice(&normalize_rgb(&pixels[offset..offset + 3]));
    }

    Ok(colors)
}

pub fn sample_count(width: usize, height: usize, step: usize) -> usize {
    let step = step.max(1);
    width.div_ceil(step) * height.div_ceil(step)
}

pub fn expected_buffer_len(width: usize, height: usize) -> Result<usize, ExtractionError> {
    width
        .checked_mul(height)
        .and_then(|pixels| pixels.checked_mul(BYTES_PER_PIXEL))
        .ok_or(ExtractionError::DimensionsOverflow { width, height })
}

pub fn validate_buffer(pixels: &[u8], width: usize, height: usize) -> Result<(), ExtractionError> {
    let expected = expected_buffer_len(width, height)?;
    if pixels.len() != expected {
        return Err(ExtractionError::BufferLength {
            width,
            height,
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

// Yields (x, y, byte offset) in row-major order.
fn grid_offsets(
    width: usize,
    height: usize,
    step: usize,
) -> impl Iterator<Item = (usize, usize, usize)> {
    (0..height).step_by(step).flat_map(move |y| {
        (0..width)
            .step_by(step)
            .map(move |x| (x, y, (y * width + x) * BYTES_PER_PIXEL))
    })
}

fn normalize_rgb(rgb: &[u8]) -> [f32; 3] {
    [
        (rgb[0] as f64 / 255.0) as f32,
        (rgb[1] as f64 / 255.0) as f32,
        (rgb[2] as f64 / 255.0) as f32,
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_pixels(width: usize, height: usize, rgba: [u8; 4]) -> Vec<u8> {
        rgba.repeat(width * height)
    }

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-6
    }

    #[test]
    fn point_count_follows_ceiling_rule() {
        for (width, height, step) in [(1, 1, 1), (5, 3, 2), (7, 7, 3), (10, 1, 4), (3, 9, 8)] {
            let pixels = make_pixels(width, height, [10, 20, 30, 255]);
            let buffer = extract(&pixels, width, height, step, 60.0).unwrap();
            let expected = width.div_ceil(step) * height.div_ceil(step);
            assert_eq!(buffer.point_count(), expected, "{width}x{height} step {step}");
            assert_eq!(buffer.positions().len(), 3 * expected);
            assert_eq!(buffer.colors().len(), 3 * expected);
        }
    }

    #[test]
    fn uniform_gray_has_constant_depth_and_color() {
        let pixels = make_pixels(6, 4, [128, 128, 128, 255]);
        let depth_scale = 60.0;
        let expected_z = ((128.0 / 255.0 * depth_scale as f64) / 10.0) as f32;
        let expected_c = 128.0 / 255.0;

        for step in [1, 2, 3, 5] {
            let buffer = extract(&pixels, 6, 4, step, depth_scale).unwrap();
            for (position, color) in buffer.iter() {
                assert!(approx_eq(position[2], expected_z));
                assert!(color.iter().all(|&c| approx_eq(c, expected_c)));
            }
        }
    }

    #[test]
    fn positions_are_centered_and_y_up() {
        // 4x2: scale = 4 / 10 = 0.4
        let pixels = make_pixels(4, 2, [0, 0, 0, 255]);
        let buffer = extract(&pixels, 4, 2, 1, 60.0).unwrap();
        let positions = buffer.positions();

        // (0, 0)
        assert!(approx_eq(positions[0], -5.0));
        assert!(approx_eq(positions[1], 2.5));
        assert!(approx_eq(positions[2], 0.0));
        // (3, 0)
        assert!(approx_eq(positions[9], 2.5));
        assert!(approx_eq(positions[10], 2.5));
        // (0, 1)
        assert!(approx_eq(positions[12], -5.0));
        assert!(approx_eq(positions[13], 0.0));
    }

    #[test]
    fn color_keeps_channels_while_depth_uses_their_mean() {
        let pixels = make_pixels(1, 1, [255, 0, 60, 7]);
        let buffer = extract(&pixels, 1, 1, 1, 30.0).unwrap();
        assert_eq!(buffer.colors(), &[1.0, 0.0, (60.0f64 / 255.0) as f32]);

        let expected_z = ((((255.0 + 0.0 + 60.0) / 3.0) / 255.0 * 30.0) / 10.0) as f32;
        assert!(approx_eq(buffer.positions()[2], expected_z));
    }

    #[test]
    fn points_follow_raster_order() {
        let mut pixels = Vec::new();
        for value in 0..6u8 {
            pixels.extend_from_slice(&[value, value, value, 255]);
        }
        let buffer = extract(&pixels, 3, 2, 1, 10.0).unwrap();
        for (i, (_, color)) in buffer.iter().enumerate() {
            assert_eq!(color[0], (i as f64 / 255.0) as f32);
        }
    }

    #[test]
    fn zero_step_is_treated_as_one() {
        let pixels = make_pixels(3, 3, [1, 2, 3, 4]);
        let zero = extract(&pixels, 3, 3, 0, 60.0).unwrap();
        let one = extract(&pixels, 3, 3, 1, 60.0).unwrap();
        assert_eq!(zero, one);
        assert_eq!(zero.point_count(), 9);
    }

    #[test]
    fn negative_depth_scale_inverts_extrusion() {
        let pixels = make_pixels(2, 2, [255, 255, 255, 255]);
        let up = extract(&pixels, 2, 2, 1, 50.0).unwrap();
        let down = extract(&pixels, 2, 2, 1, -50.0).unwrap();
        let flat = extract(&pixels, 2, 2, 1, 0.0).unwrap();
        assert!(approx_eq(up.positions()[2], 5.0));
        assert!(approx_eq(down.positions()[2], -5.0));
        assert_eq!(flat.positions()[2], 0.0);
    }

    #[test]
    fn degenerate_dimensions_yield_empty_buffer() {
        assert!(extract(&[], 0, 10, 1, 60.0).unwrap().is_empty());
        assert!(extract(&[], 10, 0, 1, 60.0).unwrap().is_empty());
        assert!(sample_colors(&[], 0, 0, 1).unwrap().is_empty());
    }

    #[test]
    fn short_buffer_is_rejected() {
        let pixels = make_pixels(2, 2, [0, 0, 0, 0]);
        let err = extract(&pixels[..15], 2, 2, 1, 60.0).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::BufferLength {
                width: 2,
                height: 2,
                expected: 16,
                actual: 15
            }
        );
        assert!(sample_colors(&pixels[..15], 2, 2, 1).is_err());
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        let err = expected_buffer_len(usize::MAX, 2).unwrap_err();
        assert!(matches!(err, ExtractionError::DimensionsOverflow { .. }));
    }

    #[test]
    fn sample_colors_matches_grid_sampler_colors() {
        let pixels: Vec<u8> = (0..5 * 4 * 4).map(|i| (i * 7 % 256) as u8).collect();
        let buffer = extract(&pixels, 5, 4, 2, 60.0).unwrap();
        let colors = sample_colors(&pixels, 5, 4, 2).unwrap();
        assert_eq!(buffer.colors(), colors.as_slice());
    }
}
