use crate::error::UnsupportedFormatError;

const GREYSCALE: u8 = 0;
const TRUECOLOR_WITH_ALPHA: u8 = 6;

/// The channel layouts a heightmap can be stored in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    Gray8,
    Gray16,
    Rgba8,
    Rgba16,
}
impl PixelFormat {
    pub(crate) fn resolve(bit_depth: u8, color_type: u8) -> Result<Self, UnsupportedFormatError> {
        match (bit_depth, color_type) {
            (8, GREYSCALE) => Ok(Self::Gray8),
            (16, GREYSCALE) => Ok(Self::Gray16),
            (8, TRUECOLOR_WITH_ALPHA) => Ok(Self::Rgba8),
            (16, TRUECOLOR_WITH_ALPHA) => Ok(Self::Rgba16),
            (8 | 16, color_type) => Err(UnsupportedFormatError::ColorType(color_type)),
            (bit_depth, _) => Err(UnsupportedFormatError::BitDepth(bit_depth)),
        }
    }

    pub(crate) fn ihdr_fields(&self) -> (u8, u8) {
        match self {
            Self::Gray8 => (8, GREYSCALE),
            Self::Gray16 => (16, GREYSCALE),
            Self::Rgba8 => (8, TRUECOLOR_WITH_ALPHA),
            Self::Rgba16 => (16, TRUECOLOR_WITH_ALPHA),
        }
    }

    pub fn channel_count(&self) -> usize {
        match self {
            Self::Gray8 | Self::Gray16 => 1,
            Self::Rgba8 | Self::Rgba16 => 4,
        }
    }

    pub fn sample_width(&self) -> usize {
        match self {
            Self::Gray8 | Self::Rgba8 => 1,
            Self::Gray16 | Self::Rgba16 => 2,
        }
    }

    /// Bytes per complete pixel, also the lookback distance of the row filters.
    pub fn bytes_per_pixel(&self) -> usize {
        self.channel_count() * self.sample_width()
    }

    /// Appends one normalized height in `[0, 1]` per pixel of a reconstructed row.
    ///
    /// Colour pixels are reduced to their luma; alpha is ignored.
    pub fn normalize_row(&self, row: &[u8], heights: &mut Vec<f32>) {
        match self {
            Self::Gray8 => heights.extend(row.iter().map(|&v| f32::from(v) / 255.0)),
            Self::Gray16 => heights.extend(
                row.chunks_exact(2)
                    .map(|s| f32::from(u16::from_be_bytes([s[0], s[1]])) / 65535.0),
            ),
            Self::Rgba8 => heights.extend(row.chunks_exact(4).map(|p| {
                luma(p[0].into(), p[1].into(), p[2].into(), 255.0)
            })),
            Self::Rgba16 => heights.extend(row.chunks_exact(8).map(|p| {
                let r = u16::from_be_bytes([p[0], p[1]]);
                let g = u16::from_be_bytes([p[2], p[3]]);
                let b = u16::from_be_bytes([p[4], p[5]]);
                luma(r.into(), g.into(), b.into(), 65535.0)
            })),
        }
    }
}

fn luma(r: f64, g: f64, b: f64, max: f64) -> f32 {
    ((0.299 * r + 0.587 * g + 0.114 * b) / max) as f32
}
