//! Visible range calculation result

use super::types::TileCoord;

/// Half-open tile rectangle to draw this frame, plus the LOD stride.
///
/// Computed by [`ViewportCuller`](super::culler::ViewportCuller) every
/// frame; never cached, since the transform can change between frames.
///
/// # Invariants
/// - `tile_x0 <= tile_x1` and `tile_y0 <= tile_y1`
/// - `tile_x1 <= map_width`, `tile_y1 <= map_height` of the culled grid
/// - `step >= 1`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleRange {
    /// First visible column (inclusive).
    pub tile_x0: u32,
    /// First visible row (inclusive).
    pub tile_y0: u32,
    /// Last visible column (exclusive).
    pub tile_x1: u32,
    /// Last visible row (exclusive).
    pub tile_y1: u32,
    /// Stride between drawn cells; each drawn quad covers `step × step` cells.
    pub step: u32,
}

impl VisibleRange {
    /// Create new visible range.
    ///
    /// # Panics
    /// In debug builds, panics if a lower bound exceeds its upper bound or
    /// `step` is zero.
    pub fn new(tile_x0: u32, tile_y0: u32, tile_x1: u32, tile_y1: u32, step: u32) -> Self {
        debug_assert!(tile_x0 <= tile_x1, "tile_x0 {tile_x0} > tile_x1 {tile_x1}");
        debug_assert!(tile_y0 <= tile_y1, "tile_y0 {tile_y0} > tile_y1 {tile_y1}");
        debug_assert!(step >= 1, "step must be >= 1");
        Self {
            tile_x0,
            tile_y0,
            tile_x1,
            tile_y1,
            step,
        }
    }

    /// The empty range.
    pub fn empty() -> Self {
        Self::new(0, 0, 0, 0, 1)
    }

    /// True if no cell will be visited.
    pub fn is_empty(&self) -> bool {
        self.tile_x0 >= self.tile_x1 || self.tile_y0 >= self.tile_y1
    }

    /// Number of columns visited (after stepping).
    pub fn visited_columns(&self) -> u32 {
        (self.tile_x1 - self.tile_x0).div_ceil(self.step)
    }

    /// Number of rows visited (after stepping).
    pub fn visited_rows(&self) -> u32 {
        (self.tile_y1 - self.tile_y0).div_ceil(self.step)
    }

    /// Number of cells the iteration visits, i.e. the quad count.
    pub fn visited_count(&self) -> u64 {
        u64::from(self.visited_columns()) * u64::from(self.visited_rows())
    }

    /// Check if a tile lies inside the rectangle (ignores stepping).
    pub fn contains(&self, tile: TileCoord) -> bool {
        (self.tile_x0..self.tile_x1).contains(&tile.x)
            && (self.tile_y0..self.tile_y1).contains(&tile.y)
    }

    /// Iterate visited cells row by row, stepping by `step` on both axes.
    pub fn cells(&self) -> impl Iterator<Item = TileCoord> {
        let step = self.step as usize;
        let (x0, x1) = (self.tile_x0, self.tile_x1);
        (self.tile_y0..self.tile_y1)
            .step_by(step)
            .flat_map(move |y| (x0..x1).step_by(step).map(move |x| TileCoord::new(x, y)))
    }
}

impl Default for VisibleRange {
    fn default() -> Self {
        Self::empty()
    }
}
