//! Decoded tileset atlas.

use super::error::AtlasError;
use super::grid::TileId;
use crate::view_state::types::GridGeometry;

/// Normalised texture rectangle inside the atlas.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct UvRect {
    /// Left edge in `[0, 1]`.
    pub u: f64,
    /// Top edge in `[0, 1]`.
    pub v: f64,
    /// Width.
    pub du: f64,
    /// Height.
    pub dv: f64,
}

/// RGBA8 tileset image.
///
/// Tile `i` sits in atlas cell `(i % tiles_per_row, i / tiles_per_row)`.
#[derive(Clone, PartialEq, Eq)]
pub struct Atlas {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl Atlas {
    /// Wrap a row-major RGBA8 buffer.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self, AtlasError> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(AtlasError::PixelBufferMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Check the image holds `tiles_per_row²` tiles of `tile_size`.
    pub fn validate_for(&self, geometry: &GridGeometry) -> Result<(), AtlasError> {
        let required = geometry.tiles_per_row().saturating_mul(geometry.tile_size());
        if self.width < required || self.height < required {
            return Err(AtlasError::TooSmall {
                width: self.width,
                height: self.height,
                required,
            });
        }
        Ok(())
    }

    /// Texture rectangle of `tile`.
    pub fn uv_for(&self, tile: TileId, geometry: &GridGeometry) -> UvRect {
        let cols = geometry.tiles_per_row();
        let size = f64::from(geometry.tile_size());
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        UvRect {
            u: f64::from(tile.get() % cols) * size / w,
            v: f64::from(tile.get() / cols) * size / h,
            du: size / w,
            dv: size / h,
        }
    }

    /// RGBA at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = (y as usize * self.width as usize + x as usize) * 4;
        let p = self.pixels.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// Mean RGB over the pixels covered by `uv`.
    ///
    /// Returns black for a rectangle that covers no pixels.
    pub fn average_rgb(&self, uv: UvRect) -> [u8; 3] {
        let w = f64::from(self.width);
        let h = f64::from(self.height);
        let x0 = (uv.u * w).floor().max(0.0) as u32;
        let y0 = (uv.v * h).floor().max(0.0) as u32;
        let x1 = ((uv.u + uv.du) * w).ceil().min(w) as u32;
        let y1 = ((uv.v + uv.dv) * h).ceil().min(h) as u32;

        let mut sum = [0u64; 3];
        let mut count = 0u64;
        for y in y0..y1 {
            for x in x0..x1 {
                if let Some([r, g, b, _]) = self.pixel(x, y) {
                    sum[0] += u64::from(r);
                    sum[1] += u64::from(g);
                    sum[2] += u64::from(b);
                    count += 1;
                }
            }
        }
        if count == 0 {
            return [0, 0, 0];
        }
        [
            (sum[0] / count) as u8,
            (sum[1] / count) as u8,
            (sum[2] / count) as u8,
        ]
    }
}

impl std::fmt::Debug for Atlas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Atlas")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}
