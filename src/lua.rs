//! Lua module sources for the scene-building scripts.

use crate::{heightfield::HeightField, tiler::ChunkTile};

pub fn chunk_file_name(cx: usize, cz: usize) -> String {
    format!("Chunk_{cx}_{cz}.lua")
}

/// A module returning the tile's vertex rows as `{x=, y=, z=}` tables.
pub fn vector_chunk_source(tile: &ChunkTile) -> String {
    let mut lines = vec![
        format!("-- {}", chunk_file_name(tile.cx, tile.cz)),
        "return {".to_owned(),
    ];
    for row in tile.rows() {
        let vertices: Vec<_> = row
            .iter()
            .map(|v| format!("{{x={:.2}, y={:.2}, z={:.2}}}", v.x, v.y, v.z))
            .collect();
        lines.push(format!("    {{{}}},", vertices.join(", ")));
    }
    lines.push("}".to_owned());
    lines.join("\n")
}

/// A module returning every normalized height, one table per image row.
pub fn height_table_source(field: &HeightField) -> String {
    let mut source = String::from("-- HeightmapData.lua\n-- Auto-converted from PNG\n\nreturn {\n");
    for row in field.rows() {
        let values: Vec<_> = row.iter().map(|value| format!("{value:.4}")).collect();
        source.push_str(&format!("    {{{}}},\n", values.join(", ")));
    }
    source.push_str("}\n");
    source
}
