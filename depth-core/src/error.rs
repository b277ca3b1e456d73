use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error(
        "pixel buffer holds {actual} bytes, expected {expected} for a {width}x{height} RGBA image"
    )]
    BufferLength {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },

    #[error("image dimensions {width}x{height} overflow the addressable buffer size")]
    DimensionsOverflow { width: usize, height: usize },

    #[error("positions ({positions} values) and colors ({colors} values) must hold the same number of xyz/rgb triples")]
    ChannelLength { positions: usize, colors: usize },

    #[error("color overlay holds {actual} values, expected {expected} to match the full buffer")]
    OverlayLength { expected: usize, actual: usize },
}
