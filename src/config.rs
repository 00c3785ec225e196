use std::num::NonZeroUsize;

use anyhow::ensure;

/// Maps normalized heights and pixel positions into world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldScale {
    /// Span of the whole padded heightmap along both horizontal axes.
    pub world_width: f64,
    /// World height of a pixel with normalized height 1.0.
    pub max_height: f64,
}
impl WorldScale {
    pub const DEFAULT_WORLD_WIDTH: f64 = 150_000.0;
    pub const DEFAULT_MAX_HEIGHT: f64 = 2_753.0;

    pub fn new(world_width: f64, max_height: f64) -> anyhow::Result<Self> {
        ensure!(
            world_width.is_finite() && world_width > 0.0,
            "world width must be a positive number, got {world_width}"
        );
        ensure!(
            max_height.is_finite(),
            "max height must be a finite number, got {max_height}"
        );
        Ok(Self {
            world_width,
            max_height,
        })
    }
}
impl Default for WorldScale {
    fn default() -> Self {
        Self {
            world_width: Self::DEFAULT_WORLD_WIDTH,
            max_height: Self::DEFAULT_MAX_HEIGHT,
        }
    }
}

/// Everything needed to cut a height field into vertex chunks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileConfig {
    /// Edge length of a chunk in source pixels.
    pub chunk_size: NonZeroUsize,
    pub scale: WorldScale,
}
impl TileConfig {
    pub const DEFAULT_CHUNK_SIZE: usize = 250;

    pub fn new(chunk_size: usize, world_width: f64, max_height: f64) -> anyhow::Result<Self> {
        let chunk_size = NonZeroUsize::new(chunk_size)
            .ok_or_else(|| anyhow::anyhow!("chunk size must be at least 1"))?;
        Ok(Self {
            chunk_size,
            scale: WorldScale::new(world_width, max_height)?,
        })
    }
}
impl Default for TileConfig {
    fn default() -> Self {
        Self {
            chunk_size: NonZeroUsize::MIN.saturating_add(Self::DEFAULT_CHUNK_SIZE - 1),
            scale: WorldScale::default(),
        }
    }
}
