use crate::{
    chunks::{
        idat::IDATChunk,
        iend,
        ihdr::{IHDRChunk, ImageHeader},
        SIGNATURE,
    },
    filters::Filter,
    image_data::compress_data,
    scanlines::filter_scanlines,
};

/// How [`encode`] lays out the image data.
#[derive(Debug, Clone)]
pub struct EncodeOptions {
    /// Filters applied to successive rows, repeating when there are more rows.
    pub filters: Vec<Filter>,
    /// Largest payload of one IDAT chunk.
    pub max_idat_len: usize,
}
impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            filters: vec![Filter::None],
            max_idat_len: 1 << 16,
        }
    }
}

/// Writes unfiltered, row-major pixel bytes as a PNG file.
///
/// `pixels` must hold exactly `header.height` rows of `header.stride()` bytes.
pub fn encode(
    header: &ImageHeader,
    pixels: &[u8],
    options: &EncodeOptions,
) -> anyhow::Result<Vec<u8>> {
    let expected = header.stride() * header.height as usize;
    anyhow::ensure!(
        pixels.len() == expected,
        "expected {expected} bytes of pixel data, got {}",
        pixels.len()
    );
    let filters = match options.filters.as_slice() {
        [] => &[Filter::None][..],
        filters => filters,
    };
    let filtered = filter_scanlines(pixels, header, |row| filters[row % filters.len()]);
    let compressed = compress_data(&filtered);

    let mut bytes = SIGNATURE.to_vec();
    bytes.extend(IHDRChunk::from(header).to_bytes());
    for data in compressed.chunks(options.max_idat_len.max(1)) {
        bytes.extend(IDATChunk { data }.to_bytes());
    }
    bytes.extend(iend::write_end());
    Ok(bytes)
}
