use thiserror::Error;

/// Everything that can go wrong while turning PNG bytes into a height field.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error(transparent)]
    Format(#[from] FormatError),
    #[error(transparent)]
    Unsupported(#[from] UnsupportedFormatError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("input doesn't start with the PNG signature")]
    MissingSignature,
    #[error("chunk starting at byte {offset} runs past the end of the file")]
    TruncatedChunk { offset: usize },
    #[error("CRC mismatch in {chunk_type} chunk: stored {stored:#010x}, computed {computed:#010x}")]
    CrcMismatch {
        chunk_type: String,
        stored: u32,
        computed: u32,
    },
    #[error("malformed IHDR chunk: {0}")]
    InvalidHeader(&'static str),
    #[error("no IHDR chunk before image data")]
    MissingHeader,
    #[error("no IDAT chunk found")]
    MissingImageData,
    #[error("failed to decompress image data: {0}")]
    Inflate(String),
    #[error("row {row} uses unknown filter type {filter}")]
    InvalidFilter { row: usize, filter: u8 },
    #[error("image data ends in row {row}: expected {expected} bytes, got {actual}")]
    TruncatedImageData {
        row: usize,
        expected: usize,
        actual: usize,
    },
    #[error("image dimensions {width}x{height} are too large")]
    TooLarge { width: u32, height: u32 },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnsupportedFormatError {
    #[error("bit depth {0} is not supported, only 8 and 16")]
    BitDepth(u8),
    #[error("color type {0} is not supported, only greyscale (0) and RGBA (6)")]
    ColorType(u8),
    #[error("interlace method {0} is not supported")]
    Interlacing(u8),
    #[error("compression method {0} is not supported")]
    CompressionMethod(u8),
    #[error("filter method {0} is not supported")]
    FilterMethod(u8),
}
