//! Core view-state value types shared by the transform, culler and picker.

use thiserror::Error;

/// A point in screen space (viewport pixels, origin at top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPoint {
    /// Horizontal pixel coordinate.
    pub x: f64,
    /// Vertical pixel coordinate.
    pub y: f64,
}

impl ScreenPoint {
    /// Create a new screen point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A point in world space (grid pixels at zoom 1).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldPoint {
    /// Horizontal world coordinate.
    pub x: f64,
    /// Vertical world coordinate.
    pub y: f64,
}

impl WorldPoint {
    /// Create a new world point.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Integer coordinate of a single grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct TileCoord {
    /// Column index.
    pub x: u32,
    /// Row index.
    pub y: u32,
}

impl TileCoord {
    /// Create a new tile coordinate.
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// Viewport size in screen pixels.
///
/// A zero dimension is legal (resize transients) and culls to nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl ViewportSize {
    /// Create new viewport dimensions.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Axis-aligned rectangle in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorldRect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width (non-negative).
    pub width: f64,
    /// Height (non-negative).
    pub height: f64,
}

impl WorldRect {
    /// Create a new world rectangle.
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Square of side `size` with its top-left corner at `(x, y)`.
    pub fn square(x: f64, y: f64, size: f64) -> Self {
        Self::new(x, y, size, size)
    }

    /// Right edge (exclusive).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }
}

/// Uniform-scale affine map `screen = world * scale + offset`.
///
/// This is the render-time form of a view transform, pushed onto a
/// drawer's transform stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2 {
    /// Horizontal translation in pixels.
    pub offset_x: f64,
    /// Vertical translation in pixels.
    pub offset_y: f64,
    /// Uniform scale factor.
    pub scale: f64,
}

impl Affine2 {
    /// The identity map.
    pub const IDENTITY: Self = Self {
        offset_x: 0.0,
        offset_y: 0.0,
        scale: 1.0,
    };

    /// Map a world point through this transform.
    pub fn apply(&self, point: WorldPoint) -> ScreenPoint {
        ScreenPoint::new(
            point.x * self.scale + self.offset_x,
            point.y * self.scale + self.offset_y,
        )
    }

    /// Compose: the result applies `inner` first, then `self`.
    pub fn then_inner(&self, inner: Affine2) -> Affine2 {
        Affine2 {
            offset_x: self.offset_x + self.scale * inner.offset_x,
            offset_y: self.offset_y + self.scale * inner.offset_y,
            scale: self.scale * inner.scale,
        }
    }
}

impl Default for Affine2 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Error returned when grid geometry has a zero dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidGeometry {
    /// Tile pixel size was zero.
    #[error("tile size must be >= 1")]
    ZeroTileSize,
    /// Map width or height was zero.
    #[error("map dimensions must be >= 1 (got {width}x{height})")]
    ZeroMapSize {
        /// Requested width in tiles.
        width: u32,
        /// Requested height in tiles.
        height: u32,
    },
    /// Tileset column count was zero.
    #[error("tiles per row must be >= 1")]
    ZeroTilesPerRow,
    /// `tiles_per_row²` does not fit in a `u32` tile id.
    #[error("tiles per row {0} is too large")]
    TilesetTooLarge(u32),
}

/// Fixed dimensions of the grid and its tileset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    tile_size: u32,
    map_width: u32,
    map_height: u32,
    tiles_per_row: u32,
}

impl GridGeometry {
    /// Smart constructor that rejects zero dimensions.
    pub fn new(
        tile_size: u32,
        map_width: u32,
        map_height: u32,
        tiles_per_row: u32,
    ) -> Result<Self, InvalidGeometry> {
        if tile_size == 0 {
            return Err(InvalidGeometry::ZeroTileSize);
        }
        if map_width == 0 || map_height == 0 {
            return Err(InvalidGeometry::ZeroMapSize {
                width: map_width,
                height: map_height,
            });
        }
        if tiles_per_row == 0 {
            return Err(InvalidGeometry::ZeroTilesPerRow);
        }
        if tiles_per_row.checked_mul(tiles_per_row).is_none() {
            return Err(InvalidGeometry::TilesetTooLarge(tiles_per_row));
        }
        Ok(Self {
            tile_size,
            map_width,
            map_height,
            tiles_per_row,
        })
    }

    /// Tile edge length in world pixels.
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// Map width in tiles.
    pub fn map_width(&self) -> u32 {
        self.map_width
    }

    /// Map height in tiles.
    pub fn map_height(&self) -> u32 {
        self.map_height
    }

    /// Tileset atlas column count.
    pub fn tiles_per_row(&self) -> u32 {
        self.tiles_per_row
    }

    /// Number of distinct tile ids, `tiles_per_row²`.
    pub fn tile_count(&self) -> u32 {
        self.tiles_per_row * self.tiles_per_row
    }

    /// Full map width in world pixels.
    pub fn world_width(&self) -> f64 {
        f64::from(self.map_width) * f64::from(self.tile_size)
    }

    /// Full map height in world pixels.
    pub fn world_height(&self) -> f64 {
        f64::from(self.map_height) * f64::from(self.tile_size)
    }
}

impl Default for GridGeometry {
    fn default() -> Self {
        Self {
            tile_size: 16,
            map_width: 10_000,
            map_height: 10_000,
            tiles_per_row: 8,
        }
    }
}
