//! Atlas loaders: decode a tileset from disk, or build one in memory.

use crate::model::atlas::Atlas;
use crate::model::error::AtlasError;
use crate::render::drawer::AtlasLoader;
use crate::view_state::types::GridGeometry;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Loads a tileset image file and converts it to RGBA8.
#[derive(Debug, Clone)]
pub struct ImageAtlasLoader {
    path: PathBuf,
}

impl ImageAtlasLoader {
    /// Loader for the image at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl AtlasLoader for ImageAtlasLoader {
    fn load(&mut self) -> Result<Atlas, AtlasError> {
        if !self.path.exists() {
            return Err(AtlasError::NotFound {
                path: self.path.clone(),
            });
        }
        debug!(path = %self.path.display(), "Decoding tileset");
        let img = image::open(&self.path).map_err(|e| AtlasError::Decode {
            path: self.path.clone(),
            reason: e.to_string(),
        })?;
        let width = img.width();
        let height = img.height();
        Atlas::new(width, height, img.to_rgba8().into_raw())
    }
}

/// Builds a deterministic palette atlas when no tileset file is configured.
///
/// Each tile is a flat colour spread around the hue wheel with a darker
/// one-pixel border.
#[derive(Debug, Clone, Copy)]
pub struct ProceduralAtlasLoader {
    geometry: GridGeometry,
}

impl ProceduralAtlasLoader {
    /// Loader producing an atlas that exactly fits `geometry`.
    pub fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    /// Colour of tile `index` out of `count`.
    pub fn tile_colour(index: u32, count: u32) -> [u8; 3] {
        let hue = f64::from(index) / f64::from(count.max(1)) * 6.0;
        let sector = hue.floor();
        let f = hue - sector;
        let (r, g, b) = match sector as u32 % 6 {
            0 => (1.0, f, 0.0),
            1 => (1.0 - f, 1.0, 0.0),
            2 => (0.0, 1.0, f),
            3 => (0.0, 1.0 - f, 1.0),
            4 => (f, 0.0, 1.0),
            _ => (1.0, 0.0, 1.0 - f),
        };
        let scale = |c: f64| (60.0 + c * 160.0).round() as u8;
        [scale(r), scale(g), scale(b)]
    }
}

impl AtlasLoader for ProceduralAtlasLoader {
    fn load(&mut self) -> Result<Atlas, AtlasError> {
        let tile = self.geometry.tile_size();
        let cols = self.geometry.tiles_per_row();
        let count = self.geometry.tile_count();
        let side = tile.saturating_mul(cols);
        let mut pixels = Vec::with_capacity(side as usize * side as usize * 4);
        for y in 0..side {
            for x in 0..side {
                let index = (y / tile) * cols + x / tile;
                let [r, g, b] = Self::tile_colour(index, count);
                let border = x % tile == 0 || y % tile == 0;
                let shade = |c: u8| if border { c / 2 } else { c };
                pixels.extend_from_slice(&[shade(r), shade(g), shade(b), 255]);
            }
        }
        Atlas::new(side, side, pixels)
    }
}
