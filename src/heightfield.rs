/// Normalized heights in `[0, 1]`, stored row by row from the top of the image.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightField {
    width: usize,
    height: usize,
    values: Vec<f32>,
}
impl HeightField {
    /// Wraps row-major values; both sides must be non-zero and
    /// `values.len()` must equal `width * height`.
    pub fn new(width: usize, height: usize, values: Vec<f32>) -> Option<Self> {
        let area = width.checked_mul(height)?;
        (area > 0 && area == values.len()).then_some(Self {
            width,
            height,
            values,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Height at column `x` of row `z`.
    pub fn get(&self, x: usize, z: usize) -> Option<f32> {
        if x < self.width && z < self.height {
            Some(self.values[z * self.width + x])
        } else {
            None
        }
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, f32> {
        self.values.chunks_exact(self.width)
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}
