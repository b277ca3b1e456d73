use std::path::PathBuf;

use depth_core::ExtractionError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("file extension is not found: {0}")]
    MissingExtension(PathBuf),

    #[error("unsupported extension: {0}")]
    UnsupportedExtension(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error(transparent)]
    Buffer(#[from] ExtractionError),
}
