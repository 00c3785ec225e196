use log::info;

use crate::{
    chunks::ihdr::ImageHeader,
    decoder::{DecodeOptions, PNGDecoder},
    error::{DecodeError, FormatError},
    heightfield::HeightField,
    scanlines::reconstruct_scanlines,
};

/// A decoded heightmap image.
#[derive(Debug, Clone, PartialEq)]
pub struct Heightmap {
    pub header: ImageHeader,
    pub field: HeightField,
}

impl Heightmap {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, DecodeError> {
        Self::from_bytes_with(bytes, DecodeOptions::default())
    }

    pub fn from_bytes_with(bytes: &[u8], options: DecodeOptions) -> Result<Self, DecodeError> {
        let decoder = PNGDecoder::new(bytes, options)?.collect_chunks()?;
        let header = *decoder.header();
        let image_data = decoder.inflate()?;

        let (width, height) = (header.width as usize, header.height as usize);
        let mut heights = Vec::with_capacity(width * height);
        reconstruct_scanlines(&image_data, &header, |row| {
            header.format.normalize_row(row, &mut heights)
        })?;
        let field = HeightField::new(width, height, heights).ok_or(FormatError::TooLarge {
            width: header.width,
            height: header.height,
        })?;
        info!(
            "decoded {}x{} {:?} heightmap",
            header.width, header.height, header.format
        );
        Ok(Self { header, field })
    }
}
