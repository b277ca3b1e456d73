pub mod policy;
pub mod sampler;
