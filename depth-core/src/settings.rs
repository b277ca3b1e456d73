use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_POINT_SIZE: f32 = 0.08;
pub const DEFAULT_DEPTH_SCALE: f32 = 60.0;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorScheme {
    #[default]
    Original,
    Depth,
    Plasma,
}

#[derive(Debug, Error)]
#[error("unknown color scheme '{0}' (expected original, depth or plasma)")]
pub struct ParseColorSchemeError(String);

impl FromStr for ColorScheme {
    type Err = ParseColorSchemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "original" => Ok(ColorScheme::Original),
            "depth" => Ok(ColorScheme::Depth),
            "plasma" => Ok(ColorScheme::Plasma),
            _ => Err(ParseColorSchemeError(s.to_string())),
        }
    }
}

impl fmt::Display for ColorScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ColorScheme::Original => "original",
            ColorScheme::Depth => "depth",
            ColorScheme::Plasma => "plasma",
        };
        f.write_str(name)
    }
}

/// Viewer-side settings. Only `depth_scale` feeds extraction; the rest are
/// hints passed through to the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewportSettings {
    pub point_size: f32,
    pub depth_scale: f32,
    pub sampling: u32,
    pub color_scheme: ColorScheme,
    pub use_color_image: bool,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            point_size: DEFAULT_POINT_SIZE,
            depth_scale: DEFAULT_DEPTH_SCALE,
            sampling: 1,
            color_scheme: ColorScheme::Original,
            use_color_image: false,
        }
    }
}
