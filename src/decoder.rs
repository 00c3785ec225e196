use log::{debug, warn};

use crate::{
    chunks::{idat::IDATChunk, ihdr::ImageHeader, iter_chunks, strip_signature, Chunk},
    error::{DecodeError, FormatError},
    image_data::decompress_data,
};

/// Knobs for how strictly the chunk stream is checked.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Check every chunk's CRC instead of trusting the file.
    pub verify_crc: bool,
}

pub(crate) struct PNGDecoder<'a, State> {
    data: &'a [u8],
    options: DecodeOptions,
    state: State,
}

pub(crate) struct Start;
pub(crate) struct Collected {
    header: ImageHeader,
    compressed: Vec<u8>,
}

impl<'a> PNGDecoder<'a, Start> {
    pub(crate) fn new(data: &'a [u8], options: DecodeOptions) -> Result<Self, FormatError> {
        let rest = strip_signature(data)?;
        Ok(Self {
            data: rest,
            options,
            state: Start,
        })
    }

    /// Walks the chunks, keeping the first IHDR and every IDAT payload.
    pub(crate) fn collect_chunks(self) -> Result<PNGDecoder<'a, Collected>, DecodeError> {
        let mut header: Option<ImageHeader> = None;
        let mut compressed = vec![];
        for chunk in iter_chunks(self.data, self.options.verify_crc) {
            match Chunk::from(chunk?) {
                Chunk::IHDR(data) => match header {
                    None => {
                        let parsed = ImageHeader::from_bytes(data)?;
                        debug!("{parsed:?}");
                        header = Some(parsed);
                    }
                    Some(_) => warn!("ignoring additional IHDR chunk"),
                },
                Chunk::IDAT(IDATChunk { data }) => {
                    if header.is_none() {
                        return Err(FormatError::MissingHeader.into());
                    }
                    compressed.extend_from_slice(data);
                }
                Chunk::IEND => break,
                Chunk::Unknown(raw) => debug!("skipping {} chunk", raw.type_name()),
            }
        }
        let header = header.ok_or(FormatError::MissingHeader)?;
        if compressed.is_empty() {
            return Err(FormatError::MissingImageData.into());
        }
        Ok(PNGDecoder {
            data: self.data,
            options: self.options,
            state: Collected { header, compressed },
        })
    }
}

impl<'a> PNGDecoder<'a, Collected> {
    pub(crate) fn header(&self) -> &ImageHeader {
        &self.state.header
    }

    /// Inflates the image data, checking it holds every scanline.
    ///
    /// Output stops at the size the header calls for; anything past it is dropped.
    pub(crate) fn inflate(&self) -> Result<Vec<u8>, FormatError> {
        let header = &self.state.header;
        let expected = header.image_data_len()?;
        let image_data = decompress_data(&self.state.compressed, expected)?;
        debug!(
            "inflated {} bytes of image data into {} (expected {expected})",
            self.state.compressed.len(),
            image_data.len()
        );
        if image_data.len() < expected {
            return Err(FormatError::TruncatedImageData {
                row: image_data.len() / (header.stride() + 1),
                expected,
                actual: image_data.len(),
            });
        }
        Ok(image_data)
    }
}
