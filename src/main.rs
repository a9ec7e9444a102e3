//! Tilemap Viewer - Entry Point

use clap::Parser;
use std::path::PathBuf;
use tracing::info;

/// Tilemap Viewer - pan and zoom across a very large tile grid in the terminal
#[derive(Parser, Debug)]
#[command(name = "tmv")]
#[command(version)]
#[command(about = "Terminal viewer for very large tile maps")]
pub struct Args {
    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Tileset image (tiles_per_row x tiles_per_row tiles); built-in palette if omitted
    #[arg(short, long)]
    pub tileset: Option<PathBuf>,

    /// Seed for the random grid
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Map width in tiles
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub map_width: Option<u32>,

    /// Map height in tiles
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub map_height: Option<u32>,

    /// Tile edge length in pixels
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub tile_size: Option<u32>,
}

impl Args {
    fn overrides(&self) -> tmv::config::CliOverrides {
        tmv::config::CliOverrides {
            tileset: self.tileset.clone(),
            seed: self.seed,
            map_width: self.map_width,
            map_height: self.map_height,
            tile_size: self.tile_size,
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Load configuration with full precedence chain:
    // Defaults → Config File → Env Vars → CLI Args
    let config = {
        // 1. Load config file (or None if missing)
        let config_file = tmv::config::load_config_with_precedence(args.config.clone())?;

        // 2. Merge with defaults
        let merged = tmv::config::merge_config(config_file);

        // 3. Apply environment variable overrides
        let with_env = tmv::config::apply_env_overrides(merged)?;

        // 4. Apply CLI argument overrides (only flags the user set)
        tmv::config::apply_cli_overrides(with_env, args.overrides())
    };
    config.validate()?;

    tmv::logging::init(&config.log_file_path)?;

    info!(
        config = ?config,
        "Configuration loaded and resolved"
    );

    tmv::view::run(&config)?;

    Ok(())
}
