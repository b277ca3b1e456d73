pub mod extraction;
pub mod overlay;
pub mod point;
pub mod sampling;
