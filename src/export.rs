use std::{fs, path::Path};

use anyhow::Context;
use log::info;
use rayon::prelude::*;

use crate::{
    config::TileConfig,
    heightfield::HeightField,
    lua,
    tiler::PaddedHeightField,
};

pub const MANIFEST_FILE: &str = "manifest.json";

/// Writes one Lua vector module per chunk into `output_dir`, plus a manifest.
///
/// Tiles are built and written in parallel; each task owns its tile and file.
/// Returns the chunk file names in row order.
pub fn export_vector_chunks(
    field: &HeightField,
    config: &TileConfig,
    source: &Path,
    output_dir: &Path,
) -> anyhow::Result<Vec<String>> {
    fs::create_dir_all(output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;
    let padded = PaddedHeightField::new(field, config.chunk_size);
    info!("Size padded to {}x{}", padded.width(), padded.height());

    let files = padded
        .tile_coords()
        .into_par_iter()
        .map(|(cx, cz)| -> anyhow::Result<String> {
            let tile = padded.tile(cx, cz, &config.scale);
            let file_name = lua::chunk_file_name(cx, cz);
            let path = output_dir.join(&file_name);
            fs::write(&path, lua::vector_chunk_source(&tile))
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Exported {file_name}");
            Ok(file_name)
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    write_manifest(field, &padded, config, source, &files, output_dir)?;
    Ok(files)
}

fn write_manifest(
    field: &HeightField,
    padded: &PaddedHeightField,
    config: &TileConfig,
    source: &Path,
    files: &[String],
    output_dir: &Path,
) -> anyhow::Result<()> {
    let now = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Iso8601::DEFAULT)?;
    let (chunks_x, chunks_z) = padded.chunk_counts();
    let manifest = serde_json::json!({
        "date": now,
        "source": source.display().to_string(),
        "width": field.width(),
        "height": field.height(),
        "padded_width": padded.width(),
        "padded_height": padded.height(),
        "chunk_size": padded.chunk_size(),
        "chunks_x": chunks_x,
        "chunks_z": chunks_z,
        "world_width": config.scale.world_width,
        "max_height": config.scale.max_height,
        "chunks": files,
    });
    let path = output_dir.join(MANIFEST_FILE);
    fs::write(&path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("Failed to write {}", path.display()))
}

/// Writes the whole height field as a single Lua table module.
pub fn export_height_table(field: &HeightField, output: &Path) -> anyhow::Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    fs::write(output, lua::height_table_source(field))
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Saved {} ({} x {} pixels)",
        output.display(),
        field.width(),
        field.height()
    );
    Ok(())
}
