//! Viewport culling and level-of-detail stepping.
//!
//! Maps the viewport rectangle back into tile space through the shared
//! [`ViewTransform`] and picks a stride so that no drawn quad is smaller
//! than a minimum on-screen size. O(1) regardless of map size.

use super::transform::ViewTransform;
use super::types::{GridGeometry, ScreenPoint, ViewportSize};
use super::visible_range::VisibleRange;
use thiserror::Error;

/// Error returned for an unusable LOD threshold.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("minimum visible pixels must be finite and > 0 (got {0})")]
pub struct InvalidLodThreshold(pub f64);

/// Computes the tile rectangle and LOD stride for a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportCuller {
    geometry: GridGeometry,
    min_visible_pixels: f64,
}

impl ViewportCuller {
    /// Default on-screen size below which tiles get merged into blocks.
    pub const DEFAULT_MIN_VISIBLE_PIXELS: f64 = 4.0;

    /// Create a culler for `geometry`.
    pub fn new(geometry: GridGeometry, min_visible_pixels: f64) -> Result<Self, InvalidLodThreshold> {
        if !min_visible_pixels.is_finite() || min_visible_pixels <= 0.0 {
            return Err(InvalidLodThreshold(min_visible_pixels));
        }
        Ok(Self {
            geometry,
            min_visible_pixels,
        })
    }

    /// Grid geometry this culler clamps against.
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// LOD threshold in screen pixels.
    pub fn min_visible_pixels(&self) -> f64 {
        self.min_visible_pixels
    }

    /// Tile range and stride covering `viewport` under `transform`.
    ///
    /// A zero-area viewport yields an empty range.
    pub fn visible_range(&self, transform: &ViewTransform, viewport: ViewportSize) -> VisibleRange {
        if viewport.is_degenerate() {
            return VisibleRange::empty();
        }

        let top_left = transform.screen_to_world(ScreenPoint::new(0.0, 0.0));
        let bottom_right = transform.screen_to_world(ScreenPoint::new(
            f64::from(viewport.width),
            f64::from(viewport.height),
        ));

        let tile = f64::from(self.geometry.tile_size());
        let Some((x0, x1)) = tile_span(top_left.x, bottom_right.x, tile, self.geometry.map_width())
        else {
            return VisibleRange::empty();
        };
        let Some((y0, y1)) = tile_span(top_left.y, bottom_right.y, tile, self.geometry.map_height())
        else {
            return VisibleRange::empty();
        };

        VisibleRange::new(x0, y0, x1, y1, self.lod_step(transform.zoom()))
    }

    /// Stride so each drawn quad is at least `min_visible_pixels` wide.
    ///
    /// Non-decreasing as zoom decreases; always `>= 1`.
    pub fn lod_step(&self, zoom: f64) -> u32 {
        let pixels_per_tile = f64::from(self.geometry.tile_size()) * zoom;
        let raw = (self.min_visible_pixels / pixels_per_tile).ceil();
        if raw.is_nan() {
            return 1;
        }
        // Float→int `as` saturates, so huge ratios pin to u32::MAX.
        (raw as u32).max(1)
    }
}

/// Clamp `[floor(lo/tile), ceil(hi/tile))` into `[0, limit]`.
///
/// Returns `None` when either bound is not finite.
fn tile_span(lo_world: f64, hi_world: f64, tile: f64, limit: u32) -> Option<(u32, u32)> {
    let lo = (lo_world / tile).floor();
    let hi = (hi_world / tile).ceil();
    if !lo.is_finite() || !hi.is_finite() {
        return None;
    }
    let limit_f = f64::from(limit);
    let start = lo.clamp(0.0, limit_f) as u32;
    let end = hi.clamp(0.0, limit_f) as u32;
    Some((start, end.max(start)))
}

#[cfg(test)]
#[path = "culler_tests.rs"]
mod tests;
