use std::num::NonZeroUsize;

use rayon::prelude::*;

use crate::{config::WorldScale, heightfield::HeightField, utils::round_up};

/// A point on the terrain surface in world units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

/// One `chunk_size x chunk_size` block of vertices, stored row-major
/// (z outer, x inner).
#[derive(Debug, Clone, PartialEq)]
pub struct ChunkTile {
    pub cx: usize,
    pub cz: usize,
    pub size: usize,
    pub vertices: Vec<Vertex>,
}
impl ChunkTile {
    pub fn rows(&self) -> std::slice::ChunksExact<'_, Vertex> {
        self.vertices.chunks_exact(self.size)
    }
}

/// A height field extended with zeros to a whole number of chunks.
pub struct PaddedHeightField<'a> {
    field: &'a HeightField,
    chunk_size: usize,
    width: usize,
    height: usize,
}
impl<'a> PaddedHeightField<'a> {
    pub fn new(field: &'a HeightField, chunk_size: NonZeroUsize) -> Self {
        let chunk_size = chunk_size.get();
        Self {
            field,
            chunk_size,
            width: round_up(field.width(), chunk_size),
            height: round_up(field.height(), chunk_size),
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Number of chunks along x and z.
    pub fn chunk_counts(&self) -> (usize, usize) {
        (self.width / self.chunk_size, self.height / self.chunk_size)
    }

    /// Height at padded position `(x, z)`; zero outside the source image.
    pub fn get(&self, x: usize, z: usize) -> f32 {
        self.field.get(x, z).unwrap_or(0.0)
    }

    /// Chunk coordinates from the top-left, row by row.
    pub fn tile_coords(&self) -> Vec<(usize, usize)> {
        let (chunks_x, chunks_z) = self.chunk_counts();
        (0..chunks_z)
            .flat_map(|cz| (0..chunks_x).map(move |cx| (cx, cz)))
            .collect()
    }

    pub fn tile(&self, cx: usize, cz: usize, scale: &WorldScale) -> ChunkTile {
        let size = self.chunk_size;
        let (width, height) = (self.width as f64, self.height as f64);
        let mut vertices = Vec::with_capacity(size * size);
        for z in cz * size..(cz + 1) * size {
            for x in cx * size..(cx + 1) * size {
                vertices.push(Vertex {
                    x: x as f64 * scale.world_width / width,
                    y: f64::from(self.get(x, z)) * scale.max_height,
                    z: z as f64 * scale.world_width / height,
                });
            }
        }
        ChunkTile {
            cx,
            cz,
            size,
            vertices,
        }
    }

    /// Builds every tile, spreading the work over the rayon pool.
    pub fn tiles(&self, scale: &WorldScale) -> Vec<ChunkTile> {
        self.tile_coords()
            .into_par_iter()
            .map(|(cx, cz)| self.tile(cx, cz, scale))
            .collect()
    }
}
