use crate::{chunks::ihdr::ImageHeader, error::FormatError, filters::Filter};

/// Splits inflated image data into `(filter, filtered bytes)` rows.
pub(crate) struct Scanlines<'a> {
    image_data: &'a [u8],
    stride: usize,
    height: usize,
    row: usize,
}
impl<'a> Scanlines<'a> {
    pub(crate) fn new(image_data: &'a [u8], header: &ImageHeader) -> Self {
        Self {
            image_data,
            stride: header.stride(),
            height: header.height as usize,
            row: 0,
        }
    }
}
impl<'a> Iterator for Scanlines<'a> {
    type Item = Result<(Filter, &'a [u8]), FormatError>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.row >= self.height {
            return None;
        }
        let row = self.row;
        self.row += 1;
        let scanline_width = self.stride + 1;
        let start = row * scanline_width;
        let Some(scanline) = self.image_data.get(start..start + scanline_width) else {
            self.row = self.height;
            return Some(Err(FormatError::TruncatedImageData {
                row,
                expected: scanline_width * self.height,
                actual: self.image_data.len(),
            }));
        };
        let filter = match Filter::try_from(scanline[0]) {
            Ok(filter) => filter,
            Err(filter) => {
                self.row = self.height;
                return Some(Err(FormatError::InvalidFilter { row, filter }));
            }
        };
        Some(Ok((filter, &scanline[1..])))
    }
}

/// Undoes the row filters, handing each reconstructed row to `on_row` in order.
///
/// Only the previous reconstructed row is carried between iterations.
pub(crate) fn reconstruct_scanlines<F>(
    image_data: &[u8],
    header: &ImageHeader,
    mut on_row: F,
) -> Result<(), FormatError>
where
    F: FnMut(&[u8]),
{
    let bpp = header.format.bytes_per_pixel();
    Scanlines::new(image_data, header).try_fold(vec![0; header.stride()], |prev, scanline| {
        let (filter, raw) = scanline?;
        let recon = filter.reconstruct_row(raw, &prev, bpp);
        on_row(&recon);
        Ok(recon)
    })?;
    Ok(())
}

/// Filters unfiltered pixel rows, choosing each row's filter with `filter_for_row`.
pub(crate) fn filter_scanlines<F>(pixels: &[u8], header: &ImageHeader, filter_for_row: F) -> Vec<u8>
where
    F: Fn(usize) -> Filter,
{
    let stride = header.stride();
    let bpp = header.format.bytes_per_pixel();
    let zero_row = vec![0; stride];
    let mut data = Vec::with_capacity((stride + 1) * header.height as usize);
    for (i, row) in pixels.chunks(stride).enumerate() {
        let prev = match i {
            0 => &zero_row[..],
            _ => &pixels[(i - 1) * stride..i * stride],
        };
        let filter = filter_for_row(i);
        data.push(filter as u8);
        data.extend(filter.filter_row(row, prev, bpp));
    }
    data
}
