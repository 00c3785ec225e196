mod chunks;
mod config;
mod decoder;
mod encoder;
mod error;
mod export;
mod filters;
mod heightfield;
mod heightmap;
mod image_data;
pub mod lua;
mod pixel;
mod scanlines;
mod tiler;
mod utils;

pub use chunks::ihdr::ImageHeader;
pub use config::{TileConfig, WorldScale};
pub use decoder::DecodeOptions;
pub use encoder::{encode, EncodeOptions};
pub use error::{DecodeError, FormatError, UnsupportedFormatError};
pub use export::{export_height_table, export_vector_chunks, MANIFEST_FILE};
pub use filters::Filter;
pub use heightfield::HeightField;
pub use heightmap::Heightmap;
pub use pixel::PixelFormat;
pub use tiler::{ChunkTile, PaddedHeightField, Vertex};
