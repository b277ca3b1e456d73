use serde::Serialize;

/// Images with more pixels than this are sampled at every other pixel even
/// at full density.
pub const FULL_RESOLUTION_PIXEL_LIMIT: usize = 1_000_000;
pub const LARGE_IMAGE_STEP: usize = 2;
pub const PREVIEW_STEP_FACTOR: usize = 4;
pub const MIN_PREVIEW_STEP: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SamplingSteps {
    pub full: usize,
    pub preview: usize,
}

impl SamplingSteps {
    pub fn for_dimensions(width: usize, height: usize) -> Self {
        let full = full_step(width, height);
        SamplingSteps {
            full,
            preview: preview_step(full),
        }
    }
}

pub fn full_step(width: usize, height: usize) -> usize {
    if width.saturating_mul(height) > FULL_RESOLUTION_PIXEL_LIMIT {
        LARGE_IMAGE_STEP
    } else {
        1
    }
}

// At least 4x coarser than full, so a preview costs at most 1/16 of a full pass.
pub fn preview_step(full_step: usize) -> usize {
    (full_step * PREVIEW_STEP_FACTOR).max(MIN_PREVIEW_STEP)
}
