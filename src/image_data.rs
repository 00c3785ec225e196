use miniz_oxide::{
    deflate::compress_to_vec_zlib,
    inflate::{decompress_to_vec_zlib_with_limit, DecompressError, TINFLStatus},
};

use crate::error::FormatError;

pub(crate) fn compress_data(data: &[u8]) -> Vec<u8> {
    compress_to_vec_zlib(data, 9)
}

/// Inflates the concatenated IDAT payloads into the filtered scanlines.
///
/// At most `limit` bytes are produced. A stream with more output is cut there
/// rather than rejected.
pub(crate) fn decompress_data(
    compressed_data: &[u8],
    limit: usize,
) -> Result<Vec<u8>, FormatError> {
    match decompress_to_vec_zlib_with_limit(compressed_data, limit) {
        Ok(data) => Ok(data),
        Err(DecompressError {
            status: TINFLStatus::HasMoreOutput,
            mut output,
        }) => {
            output.truncate(limit);
            Ok(output)
        }
        Err(e) => Err(FormatError::Inflate(e.to_string())),
    }
}
