use std::path::PathBuf;

use depth_core::PixelBuffer;

use super::{extension_of, DecodedImage, Parser, ParserProvider};
use crate::error::ParseError;

pub struct ImageParserProvider {
    pub filename: PathBuf,
}

impl ParserProvider for ImageParserProvider {
    fn get_parser(&self) -> Box<dyn Parser> {
        Box::new(ImageParser {
            filename: self.filename.clone(),
        })
    }
}

/// Decodes a PNG or JPEG file into RGBA8 pixels.
pub struct ImageParser {
    pub filename: PathBuf,
}

impl Parser for ImageParser {
    fn parse(&self) -> Result<DecodedImage, ParseError> {
        let extension = extension_of(&self.filename)?;
        let file_size = std::fs::metadata(&self.filename)
            .map_err(|source| ParseError::Io {
                path: self.filename.clone(),
                source,
            })?
            .len();

        let start = std::time::Instant::now();
        let rgba = ::image::open(&self.filename)
            .map_err(|source| ParseError::Decode {
                path: self.filename.clone(),
                source,
            })?
            .to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!(
            "decoded {:?} ({}x{}) in {:?}",
            self.filename,
            width,
            height,
            start.elapsed()
        );

        let pixels = PixelBuffer::new(width as usize, height as usize, rgba.into_raw())?;
        let name = self
            .filename
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(DecodedImage {
            name,
            file_size,
            mime_type: extension.mime_type(),
            pixels,
        })
    }
}

#[cfg(test)]
mod tests {
    use ::image::{Rgba, RgbaImage};
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn decodes_png_into_rgba() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("depth.png");
        let mut img = RgbaImage::new(3, 2);
        img.put_pixel(0, 0, Rgba([10, 20, 30, 255]));
        img.put_pixel(2, 1, Rgba([200, 100, 50, 128]));
        img.save(&path).unwrap();

        let provider = ImageParserProvider {
            filename: path.clone(),
        };
        let decoded = provider.get_parser().parse().unwrap();

        assert_eq!(decoded.name, "depth.png");
        assert_eq!(decoded.mime_type, "image/png");
        assert_eq!(decoded.file_size, std::fs::metadata(&path).unwrap().len());
        assert_eq!(decoded.pixels.dimensions(), (3, 2));
        assert_eq!(&decoded.pixels.data()[0..4], &[10, 20, 30, 255]);
        assert_eq!(&decoded.pixels.data()[20..24], &[200, 100, 50, 128]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempdir().unwrap();
        let parser = ImageParser {
            filename: dir.path().join("missing.png"),
        };
        assert!(matches!(parser.parse(), Err(ParseError::Io { .. })));
    }

    #[test]
    fn garbage_is_a_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.png");
        std::fs::write(&path, b"not a png").unwrap();
        let parser = ImageParser { filename: path };
        assert!(matches!(parser.parse(), Err(ParseError::Decode { .. })));
    }

    #[test]
    fn unsupported_extension_is_rejected_before_reading() {
        let parser = ImageParser {
            filename: PathBuf::from("depth.bmp"),
        };
        assert!(matches!(
            parser.parse(),
            Err(ParseError::UnsupportedExtension(_))
        ));
    }
}
