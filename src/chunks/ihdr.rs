use nom::{
    number::complete::{be_u32, u8},
    sequence::tuple,
    IResult,
};

use super::crc::chunk_crc;
use crate::{
    error::{DecodeError, FormatError, UnsupportedFormatError},
    pixel::PixelFormat,
};

pub(crate) const HEADER: &[u8; 4] = b"IHDR";

/// The IHDR fields exactly as stored, before any validation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IHDRChunk {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) bit_depth: u8,
    pub(crate) color_type: u8,
    pub(crate) compression_method: u8,
    pub(crate) filter_method: u8,
    pub(crate) interlace_method: u8,
}
impl IHDRChunk {
    pub(crate) fn parse_data(chunk_data: &[u8]) -> IResult<&[u8], Self> {
        let (rest, (width, height, bit_depth, color_type)) =
            tuple((be_u32, be_u32, u8, u8))(chunk_data)?;
        let (rest, (compression_method, filter_method, interlace_method)) =
            tuple((u8, u8, u8))(rest)?;
        Ok((
            rest,
            IHDRChunk {
                width,
                height,
                bit_depth,
                color_type,
                compression_method,
                filter_method,
                interlace_method,
            },
        ))
    }

    pub(crate) fn to_bytes(&self) -> Vec<u8> {
        let data = [
            &self.width.to_be_bytes()[..],
            &self.height.to_be_bytes(),
            &[
                self.bit_depth,
                self.color_type,
                self.compression_method,
                self.filter_method,
                self.interlace_method,
            ],
        ]
        .concat();
        let mut bytes = (data.len() as u32).to_be_bytes().to_vec();
        bytes.extend(HEADER);
        bytes.extend(&data);
        bytes.extend(chunk_crc(HEADER, &data).to_be_bytes());
        bytes
    }
}

/// Image geometry and pixel layout, validated against what the decoder handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
}
impl ImageHeader {
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            width,
            height,
            format,
        }
    }

    /// Decodes and validates an IHDR payload.
    pub fn from_bytes(chunk_data: &[u8]) -> Result<Self, DecodeError> {
        let (_, chunk) = IHDRChunk::parse_data(chunk_data)
            .map_err(|_| FormatError::InvalidHeader("expected at least 13 bytes"))?;
        Self::try_from(chunk)
    }

    /// Bytes of one reconstructed row, without the filter type byte.
    pub fn stride(&self) -> usize {
        self.width as usize * self.format.bytes_per_pixel()
    }

    /// Length of the inflated image data: every row plus its filter type byte.
    pub(crate) fn image_data_len(&self) -> Result<usize, FormatError> {
        (self.width as usize)
            .checked_mul(self.format.bytes_per_pixel())
            .and_then(|stride| stride.checked_add(1))
            .and_then(|line| line.checked_mul(self.height as usize))
            .ok_or(FormatError::TooLarge {
                width: self.width,
                height: self.height,
            })
    }
}
impl TryFrom<IHDRChunk> for ImageHeader {
    type Error = DecodeError;
    fn try_from(chunk: IHDRChunk) -> Result<Self, Self::Error> {
        if chunk.width == 0 || chunk.height == 0 {
            let reason = "width and height must be non-zero";
            return Err(FormatError::InvalidHeader(reason).into());
        }
        let format = PixelFormat::resolve(chunk.bit_depth, chunk.color_type)?;
        if chunk.compression_method != 0 {
            let method = chunk.compression_method;
            return Err(UnsupportedFormatError::CompressionMethod(method).into());
        }
        if chunk.filter_method != 0 {
            return Err(UnsupportedFormatError::FilterMethod(chunk.filter_method).into());
        }
        if chunk.interlace_method != 0 {
            return Err(UnsupportedFormatError::Interlacing(chunk.interlace_method).into());
        }
        Ok(Self::new(chunk.width, chunk.height, format))
    }
}
impl From<&ImageHeader> for IHDRChunk {
    fn from(header: &ImageHeader) -> Self {
        let (bit_depth, color_type) = header.format.ihdr_fields();
        IHDRChunk {
            width: header.width,
            height: header.height,
            bit_depth,
            color_type,
            ..Default::default()
        }
    }
}
