use crate::error::ExtractionError;
use crate::pointcloud::{
    extraction::build_point_cloud, overlay::extract_color_overlay, point::PointCloud,
    sampling::sampler::validate_buffer,
};

/// Decoded RGBA8 pixels, row-major from the top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelBuffer {
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, ExtractionError> {
        validate_buffer(&data, width, height)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn same_dimensions(&self, other: &PixelBuffer) -> bool {
        self.dimensions() == other.dimensions()
    }

    pub fn to_point_cloud(&self, depth_scale: f32) -> Result<PointCloud, ExtractionError> {
        build_point_cloud(&self.data, self.width, self.height, depth_scale)
    }

    pub fn to_color_overlay(&self) -> Result<Vec<f32>, ExtractionError> {
        extract_color_overlay(&self.data, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validates_length() {
        assert!(PixelBuffer::new(2, 2, vec![0; 16]).is_ok());
        assert!(PixelBuffer::new(2, 2, vec![0; 17]).is_err());
        assert!(PixelBuffer::new(0, 0, Vec::new()).is_ok());
    }

    #[test]
    fn builds_cloud_and_overlay() {
        let depth = PixelBuffer::new(3, 2, [9, 9, 9, 255].repeat(6)).unwrap();
        let color = PixelBuffer::new(3, 2, [255, 0, 0, 255].repeat(6)).unwrap();
        assert!(depth.same_dimensions(&color));

        let mut cloud = depth.to_point_cloud(60.0).unwrap();
        cloud.apply_color_overlay(color.to_color_overlay().unwrap()).unwrap();
        assert_eq!(cloud.full.point_count(), 6);
        assert_eq!(&cloud.full.display_colors(true)[0..3], &[1.0, 0.0, 0.0]);
    }
}
