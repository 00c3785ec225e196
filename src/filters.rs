/// The five per-row prediction filters of filter method 0.
///
/// `x` is the byte being filtered, `a` the byte one pixel to the left, `b`
/// the byte directly above and `c` the byte above and to the left. Bytes
/// outside the image count as zero and all arithmetic wraps modulo 256.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}
impl Filter {
    pub const ALL: [Filter; 5] = [
        Filter::None,
        Filter::Sub,
        Filter::Up,
        Filter::Average,
        Filter::Paeth,
    ];

    pub fn filter(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        x.wrapping_sub(self.predict(a, b, c))
    }

    pub fn reconstruct(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        x.wrapping_add(self.predict(a, b, c))
    }

    fn predict(&self, a: u8, b: u8, c: u8) -> u8 {
        match self {
            Filter::None => 0,
            Filter::Sub => a,
            Filter::Up => b,
            Filter::Average => ((u16::from(a) + u16::from(b)) / 2) as u8,
            Filter::Paeth => paeth_predictor(a, b, c),
        }
    }

    /// Recovers a row from its filtered bytes and the reconstructed row above it.
    pub fn reconstruct_row(&self, raw: &[u8], prev: &[u8], bpp: usize) -> Vec<u8> {
        let mut recon = Vec::with_capacity(raw.len());
        for (i, (&x, &b)) in raw.iter().zip(prev).enumerate() {
            let (a, c) = if i >= bpp {
                (recon[i - bpp], prev[i - bpp])
            } else {
                (0, 0)
            };
            recon.push(self.reconstruct(x, a, b, c));
        }
        recon
    }

    /// Filters an unfiltered row given the unfiltered row above it.
    pub fn filter_row(&self, row: &[u8], prev: &[u8], bpp: usize) -> Vec<u8> {
        row.iter()
            .zip(prev)
            .enumerate()
            .map(|(i, (&x, &b))| {
                let (a, c) = if i >= bpp {
                    (row[i - bpp], prev[i - bpp])
                } else {
                    (0, 0)
                };
                self.filter(x, a, b, c)
            })
            .collect()
    }
}
impl TryFrom<u8> for Filter {
    type Error = u8;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            i => Err(i),
        }
    }
}

// Ties go to a, then b, then c.
fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let p = i16::from(a) + i16::from(b) - i16::from(c);
    let pa = (p - i16::from(a)).abs();
    let pb = (p - i16::from(b)).abs();
    let pc = (p - i16::from(c)).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}
