use std::{ffi::OsStr, path::Path};

use depth_core::PixelBuffer;

use crate::error::ParseError;

pub mod image;

pub trait ParserProvider {
    fn get_parser(&self) -> Box<dyn Parser>;
}

pub trait Parser {
    fn parse(&self) -> Result<DecodedImage, ParseError>;
}

/// A decoded image plus the facts about its source file that the viewer shows.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pub name: String,
    pub file_size: u64,
    pub mime_type: &'static str,
    pub pixels: PixelBuffer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Extension {
    Png,
    Jpeg,
}

impl Extension {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Extension::Png => "image/png",
            Extension::Jpeg => "image/jpeg",
        }
    }
}

pub fn get_extension(extension: &str) -> Result<Extension, ParseError> {
    match extension.to_ascii_lowercase().as_str() {
        "png" => Ok(Extension::Png),
        "jpg" | "jpeg" => Ok(Extension::Jpeg),
        _ => Err(ParseError::UnsupportedExtension(extension.to_string())),
    }
}

pub fn extension_of(path: &Path) -> Result<Extension, ParseError> {
    let extension = path
        .extension()
        .and_then(OsStr::to_str)
        .ok_or_else(|| ParseError::MissingExtension(path.to_path_buf()))?;
    get_extension(extension)
}
