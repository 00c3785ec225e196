use log::debug;
use nom::{
    bytes::complete::{tag, take},
    combinator::map,
    multi::length_data,
    number::complete::be_u32,
    sequence::tuple,
    IResult,
};

use crate::error::FormatError;

pub(crate) mod crc;
pub(crate) mod idat;
pub(crate) mod iend;
pub(crate) mod ihdr;

pub(crate) const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub(crate) enum Chunk<'a> {
    IHDR(&'a [u8]),
    IDAT(idat::IDATChunk<'a>),
    IEND,
    Unknown(RawChunk<'a>),
}
impl<'a> From<RawChunk<'a>> for Chunk<'a> {
    fn from(raw: RawChunk<'a>) -> Self {
        match &raw.chunk_type {
            ihdr::HEADER => Chunk::IHDR(raw.data),
            idat::HEADER => Chunk::IDAT(idat::IDATChunk { data: raw.data }),
            iend::HEADER => Chunk::IEND,
            _ => Chunk::Unknown(raw),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct RawChunk<'a> {
    pub(crate) chunk_type: [u8; 4],
    pub(crate) data: &'a [u8],
    pub(crate) crc: u32,
}
impl RawChunk<'_> {
    pub(crate) fn type_name(&self) -> String {
        String::from_utf8_lossy(&self.chunk_type).into_owned()
    }
}

/// Strips the signature and returns the chunk stream that follows it.
pub(crate) fn strip_signature(input: &[u8]) -> Result<&[u8], FormatError> {
    let signature: IResult<&[u8], &[u8]> = tag(SIGNATURE)(input);
    signature
        .map(|(rest, _)| rest)
        .map_err(|_| FormatError::MissingSignature)
}

pub(crate) fn iter_chunks(source: &[u8], verify_crc: bool) -> ChunkIter<'_> {
    ChunkIter {
        source,
        offset: SIGNATURE.len(),
        verify_crc,
        finished: false,
    }
}

/// Walks the chunk stream until IEND or the end of the buffer.
pub(crate) struct ChunkIter<'a> {
    source: &'a [u8],
    offset: usize,
    verify_crc: bool,
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = Result<RawChunk<'a>, FormatError>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.source.is_empty() {
            return None;
        }
        match parse_chunk(self.source) {
            Ok((rest, chunk)) => {
                debug!(
                    "{} chunk at byte {} with {} bytes of data",
                    chunk.type_name(),
                    self.offset,
                    chunk.data.len()
                );
                self.offset += self.source.len() - rest.len();
                self.source = rest;
                if &chunk.chunk_type == iend::HEADER {
                    self.finished = true;
                }
                if self.verify_crc {
                    let computed = crc::chunk_crc(&chunk.chunk_type, chunk.data);
                    if computed != chunk.crc {
                        self.finished = true;
                        return Some(Err(FormatError::CrcMismatch {
                            chunk_type: chunk.type_name(),
                            stored: chunk.crc,
                            computed,
                        }));
                    }
                }
                Some(Ok(chunk))
            }
            Err(_) => {
                self.finished = true;
                Some(Err(FormatError::TruncatedChunk {
                    offset: self.offset,
                }))
            }
        }
    }
}

fn parse_chunk(input: &[u8]) -> IResult<&[u8], RawChunk<'_>> {
    let (header_length, crc_length) = (4, 4);
    let (rest, chunk_data) = length_data(map(be_u32, |v| {
        (v as usize).saturating_add(header_length + crc_length)
    }))(input)?;
    let (_, (chunk_type, data, crc)) = tuple((
        map(take(header_length), |t: &[u8]| [t[0], t[1], t[2], t[3]]),
        take(chunk_data.len() - (header_length + crc_length)),
        be_u32,
    ))(chunk_data)?;
    Ok((
        rest,
        RawChunk {
            chunk_type,
            data,
            crc,
        },
    ))
}
