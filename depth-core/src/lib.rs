pub mod error;
pub mod pixel;
pub mod pointcloud;
pub mod settings;

pub use error::ExtractionError;
pub use pixel::PixelBuffer;
pub use pointcloud::extraction::build_point_cloud;
pub use pointcloud::overlay::extract_color_overlay;
pub use pointcloud::point::{BoundingVolume, PointBuffer, PointCloud, PointColors};
pub use pointcloud::sampling::policy::SamplingSteps;
pub use pointcloud::sampling::sampler::extract;
pub use settings::{ColorScheme, ViewportSettings};
