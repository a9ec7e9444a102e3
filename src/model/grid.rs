//! Dense tile grid storage.

use super::error::GridError;
use crate::view_state::types::TileCoord;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Index of a tile in the tileset atlas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileId(u32);

impl TileId {
    /// Wrap a raw index.
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw index.
    pub fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Immutable row-major grid of tile ids.
///
/// # Invariants
/// - `cells.len() == width * height`
/// - every id is `< tile_count`
#[derive(Clone, PartialEq, Eq)]
pub struct TileGrid {
    width: u32,
    height: u32,
    tile_count: u32,
    cells: Vec<TileId>,
}

impl TileGrid {
    /// Fill a `width × height` grid with ids drawn uniformly from
    /// `[0, tile_count)`, reproducible for a given `seed`.
    pub fn generate(width: u32, height: u32, tile_count: u32, seed: u64) -> Result<Self, GridError> {
        let len = Self::checked_len(width, height)?;
        if tile_count == 0 {
            return Err(GridError::NoTiles);
        }
        let mut rng = StdRng::seed_from_u64(seed);
        let cells = (0..len)
            .map(|_| TileId(rng.random_range(0..tile_count)))
            .collect();
        Ok(Self {
            width,
            height,
            tile_count,
            cells,
        })
    }

    /// Build a grid from externally supplied row-major ids.
    pub fn from_cells(
        width: u32,
        height: u32,
        tile_count: u32,
        cells: Vec<TileId>,
    ) -> Result<Self, GridError> {
        let len = Self::checked_len(width, height)?;
        if tile_count == 0 {
            return Err(GridError::NoTiles);
        }
        if cells.len() != len {
            return Err(GridError::CellCountMismatch {
                expected: len,
                actual: cells.len(),
            });
        }
        if let Some(index) = cells.iter().position(|id| id.0 >= tile_count) {
            return Err(GridError::TileOutOfRange {
                x: (index % width as usize) as u32,
                y: (index / width as usize) as u32,
                id: cells[index].0,
                tile_count,
            });
        }
        Ok(Self {
            width,
            height,
            tile_count,
            cells,
        })
    }

    fn checked_len(width: u32, height: u32) -> Result<usize, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroDimension { width, height });
        }
        Ok(width as usize * height as usize)
    }

    /// Width in tiles.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in tiles.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Exclusive upper bound of stored ids.
    pub fn tile_count(&self) -> u32 {
        self.tile_count
    }

    /// Tile at `coord`, or `None` outside the grid.
    pub fn get(&self, coord: TileCoord) -> Option<TileId> {
        if coord.x >= self.width || coord.y >= self.height {
            return None;
        }
        let index = coord.y as usize * self.width as usize + coord.x as usize;
        self.cells.get(index).copied()
    }
}

// The cell buffer can hold 10^8 entries; keep Debug output readable.
impl fmt::Debug for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TileGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("tile_count", &self.tile_count)
            .finish_non_exhaustive()
    }
}
