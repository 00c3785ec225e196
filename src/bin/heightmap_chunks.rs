use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use heightmap_chunks::{
    export_height_table, export_vector_chunks, DecodeOptions, Heightmap, TileConfig, WorldScale,
};

/// Convert a PNG heightmap into Lua modules for a scene-building script.
#[derive(Parser, Debug)]
#[command(name = "heightmap-chunks", version)]
struct Args {
    /// 8 or 16-bit greyscale or RGBA PNG to read.
    input: PathBuf,

    /// Log more (-v for progress, -vv for chunk-level detail).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Reject files whose chunk CRCs don't match.
    #[arg(long, global = true)]
    verify_crc: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Split the heightmap into Chunk_<cx>_<cz>.lua vertex modules.
    Vectors {
        /// Chunk edge length in pixels.
        #[arg(long, default_value_t = TileConfig::DEFAULT_CHUNK_SIZE)]
        chunk_size: usize,

        /// World span of the whole (padded) heightmap.
        #[arg(long, default_value_t = WorldScale::DEFAULT_WORLD_WIDTH)]
        world_width: f64,

        /// World height of the brightest pixel.
        #[arg(
            long,
            default_value_t = WorldScale::DEFAULT_MAX_HEIGHT,
            allow_negative_numbers = true
        )]
        max_height: f64,

        #[arg(long, default_value = "vector_chunks")]
        output_dir: PathBuf,
    },
    /// Write every normalized height into a single Lua table.
    Table {
        #[arg(long, default_value = "HeightmapData.lua")]
        output: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let verbosity = match args.verbose {
        0 => log::LevelFilter::Error,
        1 => log::LevelFilter::Info,
        _ => log::LevelFilter::Debug,
    };
    pretty_env_logger::formatted_builder()
        .filter_level(verbosity)
        .init();

    let input = std::fs::read(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let options = DecodeOptions {
        verify_crc: args.verify_crc,
    };
    let heightmap = Heightmap::from_bytes_with(&input, options)
        .with_context(|| format!("Failed to decode {}", args.input.display()))?;

    match args.command {
        Command::Vectors {
            chunk_size,
            world_width,
            max_height,
            output_dir,
        } => {
            let config = TileConfig::new(chunk_size, world_width, max_height)?;
            let files = export_vector_chunks(&heightmap.field, &config, &args.input, &output_dir)?;
            println!(
                "Exported {} chunks to {}",
                files.len(),
                output_dir.display()
            );
        }
        Command::Table { output } => {
            export_height_table(&heightmap.field, &output)?;
            println!("Saved {}", output.display());
        }
    }
    Ok(())
}
