use depth_core::{PointCloud, SamplingSteps, ViewportSettings};
use depth_parser::parsers::DecodedImage;
use serde::Serialize;

const SIZE_UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageStats {
    pub width: usize,
    pub height: usize,
    pub name: String,
    pub size: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub point_count: usize,
    pub preview_point_count: usize,
    pub full_step: usize,
    pub preview_step: usize,
    pub buffer_size: String,
    pub textured: bool,
}

impl ImageStats {
    pub fn new(image: &DecodedImage, cloud: &PointCloud, settings: &ViewportSettings) -> Self {
        let (width, height) = image.pixels.dimensions();
        let steps = SamplingSteps::for_dimensions(width, height);
        let buffer_bytes = cloud.full.position_bytes().len()
            + cloud.full.color_bytes(settings.use_color_image).len();

        ImageStats {
            width,
            height,
            name: image.name.clone(),
            size: format_file_size(image.file_size),
            mime_type: image.mime_type.to_string(),
            point_count: cloud.full.point_count(),
            preview_point_count: cloud.preview.point_count(),
            full_step: steps.full,
            preview_step: steps.preview,
            buffer_size: format_file_size(buffer_bytes as u64),
            textured: cloud.has_color_overlay(),
        }
    }
}

/// Formats a byte count with base-1024 units and at most two decimals,
/// e.g. `2.35 MB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut unit = 0;
    let mut threshold = 1024u64;
    while unit + 1 < SIZE_UNITS.len() && bytes >= threshold {
        unit += 1;
        threshold = threshold.saturating_mul(1024);
    }

    let value = bytes as f64 / 1024f64.powi(unit as i32);
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, SIZE_UNITS[unit])
}
