use crate::error::ExtractionError;

/// Per-point colors of a buffer.
///
/// `Grayscale` holds the colors sampled from the depth image itself.
/// `WithOverlay` additionally carries true colors sampled from a second,
/// resolution-matched image. Both arrays always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub enum PointColors {
    Grayscale(Vec<f32>),
    WithOverlay { colors: Vec<f32>, textured: Vec<f32> },
}

impl Default for PointColors {
    fn default() -> Self {
        PointColors::Grayscale(Vec::new())
    }
}

impl PointColors {
    pub fn colors(&self) -> &[f32] {
        match self {
            PointColors::Grayscale(colors) => colors.as_slice(),
            PointColors::WithOverlay { colors, .. } => colors.as_slice(),
        }
    }

    pub fn textured(&self) -> Option<&[f32]> {
        match self {
            PointColors::Grayscale(_) => None,
            PointColors::WithOverlay { textured, .. } => Some(textured.as_slice()),
        }
    }

    fn into_colors(self) -> Vec<f32> {
        match self {
            PointColors::Grayscale(colors) | PointColors::WithOverlay { colors, .. } => colors,
        }
    }
}

// Axis-aligned bounds of the sampled positions, in world units.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BoundingVolume {
    pub min: [f32; 3],
    pub max: [f32; 3],
}

/// Dense xyz positions and rgb colors, three floats per point, stored in
/// raster-scan order of the sampling walk.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointBuffer {
    positions: Vec<f32>,
    colors: PointColors,
}

impl PointBuffer {
    pub fn new(positions: Vec<f32>, colors: Vec<f32>) -> Result<Self, ExtractionError> {
        if positions.len() != colors.len() || positions.len() % 3 != 0 {
            return Err(ExtractionError::ChannelLength {
                positions: positions.len(),
                colors: colors.len(),
            });
        }

        Ok(PointBuffer {
            positions,
            colors: PointColors::Grayscale(colors),
        })
    }

    pub fn point_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn positions(&self) -> &[f32] {
        &self.positions
    }

    pub fn colors(&self) -> &[f32] {
        self.colors.colors()
    }

    pub fn textured_colors(&self) -> Option<&[f32]> {
        self.colors.textured()
    }

    pub fn point_colors(&self) -> &PointColors {
        &self.colors
    }

    /// Colors the renderer should draw: the overlay when it is requested and
    /// present, the depth image's own colors otherwise.
    pub fn display_colors(&self, use_color_image: bool) -> &[f32] {
        match (&self.colors, use_color_image) {
            (PointColors::WithOverlay { textured, .. }, true) => textured.as_slice(),
            _ => self.colors.colors(),
        }
    }

    pub fn set_overlay(&mut self, textured: Vec<f32>) -> Result<(), ExtractionError> {
        let expected = self.colors.colors().len();
        if textured.len() != expected {
            return Err(ExtractionError::OverlayLength {
                expected,
                actual: textured.len(),
            });
        }

        let colors = std::mem::take(&mut self.colors).into_colors();
        self.colors = PointColors::WithOverlay { colors, textured };
        Ok(())
    }

    pub fn clear_overlay(&mut self) {
        let colors = std::mem::take(&mut self.colors).into_colors();
        self.colors = PointColors::Grayscale(colors);
    }

    pub fn position_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.positions)
    }

    pub fn color_bytes(&self, use_color_image: bool) -> &[u8] {
        bytemuck::cast_slice(self.display_colors(use_color_image))
    }

    pub fn iter(&self) -> impl Iterator<Item = ([f32; 3], [f32; 3])> + '_ {
        self.positions
            .chunks_exact(3)
            .zip(self.colors.colors().chunks_exact(3))
            .map(|(p, c)| ([p[0], p[1], p[2]], [c[0], c[1], c[2]]))
    }

    pub fn bounding_volume(&self) -> Option<BoundingVolume> {
        if self.is_empty() {
            return None;
        }

        let mut bounding_volume = BoundingVolume {
            min: [f32::MAX, f32::MAX, f32::MAX],
            max: [f32::MIN, f32::MIN, f32::MIN],
        };
        for position in self.positions.chunks_exact(3) {
            for axis in 0..3 {
                bounding_volume.min[axis] = bounding_volume.min[axis].min(position[axis]);
                bounding_volume.max[axis] = bounding_volume.max[axis].max(position[axis]);
            }
        }

        Some(bounding_volume)
    }
}

/// The two sampling densities of one depth image: `full` is drawn at rest,
/// `preview` while the camera is being manipulated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    pub full: PointBuffer,
    pub preview: PointBuffer,
}

impl PointCloud {
    pub fn is_empty(&self) -> bool {
        self.full.is_empty()
    }

    /// Attaches true colors to the full buffer. The overlay must come from
    /// `extract_color_overlay` on an image of the same dimensions.
    pub fn apply_color_overlay(&mut self, textured: Vec<f32>) -> Result<(), ExtractionError> {
        self.full.set_overlay(textured)
    }

    pub fn clear_color_overlay(&mut self) {
        self.full.clear_overlay();
    }

    pub fn has_color_overlay(&self) -> bool {
        self.full.textured_colors().is_some()
    }
}
