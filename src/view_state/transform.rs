//! Pan/zoom view transform.
//!
//! One `ViewTransform` is shared by culling, hit-testing, scroll sync and
//! rendering. Every screen↔world conversion in the crate goes through
//! [`ViewTransform::screen_to_world`] or [`ViewTransform::world_to_screen`].

use super::types::{Affine2, ScreenPoint, WorldPoint};
use thiserror::Error;
use tracing::{debug, warn};

/// Rejected transform mutation.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransformError {
    /// Zoom factor was zero, negative, NaN or infinite.
    #[error("zoom factor must be finite and > 0 (got {0})")]
    InvalidZoomFactor(f64),

    /// Initial zoom was zero, negative, NaN or infinite.
    #[error("zoom must be finite and > 0 (got {0})")]
    InvalidZoom(f64),

    /// Offset component was NaN or infinite.
    #[error("offset must be finite (got {x}, {y})")]
    NonFiniteOffset {
        /// Horizontal offset.
        x: f64,
        /// Vertical offset.
        y: f64,
    },
}

/// Error returned by [`ZoomLimits::new`] for unusable bounds.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
#[error("zoom limits must satisfy 0 < min <= max and be finite (got min={min}, max={max})")]
pub struct InvalidZoomLimits {
    /// Requested lower bound.
    pub min: f64,
    /// Requested upper bound.
    pub max: f64,
}

/// Inclusive zoom bounds enforced at every mutation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomLimits {
    min: f64,
    max: f64,
}

impl ZoomLimits {
    /// Default lower bound: a 10k-tile map fits in a few hundred pixels.
    pub const DEFAULT_MIN: f64 = 1e-4;

    /// Default upper bound.
    pub const DEFAULT_MAX: f64 = 256.0;

    /// Smart constructor.
    pub fn new(min: f64, max: f64) -> Result<Self, InvalidZoomLimits> {
        if !min.is_finite() || !max.is_finite() || min <= 0.0 || min > max {
            return Err(InvalidZoomLimits { min, max });
        }
        Ok(Self { min, max })
    }

    /// Lower bound.
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Clamp a zoom value into the bounds.
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min, self.max)
    }
}

impl Default for ZoomLimits {
    fn default() -> Self {
        Self {
            min: Self::DEFAULT_MIN,
            max: Self::DEFAULT_MAX,
        }
    }
}

/// Current pan offset and zoom factor.
///
/// # Invariants
/// - `zoom` is finite and within `limits` (so always `> 0`)
/// - offsets are finite
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewTransform {
    offset_x: f64,
    offset_y: f64,
    zoom: f64,
    limits: ZoomLimits,
}

impl ViewTransform {
    /// Identity transform (offset 0, zoom 1 clamped into `limits`).
    pub fn new(limits: ZoomLimits) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: limits.clamp(1.0),
            limits,
        }
    }

    /// Build a transform from explicit parts.
    ///
    /// The zoom is clamped into `limits`; non-positive or non-finite values
    /// are rejected rather than clamped.
    pub fn from_parts(
        offset_x: f64,
        offset_y: f64,
        zoom: f64,
        limits: ZoomLimits,
    ) -> Result<Self, TransformError> {
        if !offset_x.is_finite() || !offset_y.is_finite() {
            return Err(TransformError::NonFiniteOffset {
                x: offset_x,
                y: offset_y,
            });
        }
        if !zoom.is_finite() || zoom <= 0.0 {
            return Err(TransformError::InvalidZoom(zoom));
        }
        Ok(Self {
            offset_x,
            offset_y,
            zoom: limits.clamp(zoom),
            limits,
        })
    }

    /// Horizontal pixel offset of the grid origin.
    pub fn offset_x(&self) -> f64 {
        self.offset_x
    }

    /// Vertical pixel offset of the grid origin.
    pub fn offset_y(&self) -> f64 {
        self.offset_y
    }

    /// Current zoom factor.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Zoom bounds in force.
    pub fn limits(&self) -> ZoomLimits {
        self.limits
    }

    /// Translate the view by a screen-space delta.
    ///
    /// Non-finite deltas are ignored so the offsets stay finite.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        if dx.is_finite() {
            self.offset_x += dx;
        }
        if dy.is_finite() {
            self.offset_y += dy;
        }
    }

    /// Set the horizontal offset absolutely (scrollbar path).
    pub fn set_offset_x(&mut self, offset_x: f64) {
        if offset_x.is_finite() {
            self.offset_x = offset_x;
        }
    }

    /// Set the vertical offset absolutely (scrollbar path).
    pub fn set_offset_y(&mut self, offset_y: f64) {
        if offset_y.is_finite() {
            self.offset_y = offset_y;
        }
    }

    /// Multiply zoom by `factor`, keeping the world point under `anchor`
    /// at the same screen position.
    ///
    /// The new zoom is clamped to the limits; the anchor is preserved
    /// either way.
    ///
    /// # Errors
    /// `InvalidZoomFactor` if `factor` is not finite and positive. The
    /// transform is left untouched.
    pub fn zoom_at(&mut self, anchor: ScreenPoint, factor: f64) -> Result<(), TransformError> {
        if !factor.is_finite() || factor <= 0.0 {
            warn!(factor, "Rejected zoom factor");
            return Err(TransformError::InvalidZoomFactor(factor));
        }

        let world = self.screen_to_world(anchor);
        let requested = self.zoom * factor;
        let new_zoom = self.limits.clamp(requested);
        if new_zoom != requested {
            debug!(requested, clamped = new_zoom, "Zoom clamped to limits");
        }

        self.zoom = new_zoom;
        self.offset_x = anchor.x - world.x * new_zoom;
        self.offset_y = anchor.y - world.y * new_zoom;
        Ok(())
    }

    /// Back to offset 0 and zoom 1 (clamped).
    pub fn reset(&mut self) {
        *self = Self::new(self.limits);
    }

    /// Screen pixel → world coordinate.
    pub fn screen_to_world(&self, point: ScreenPoint) -> WorldPoint {
        WorldPoint::new(
            (point.x - self.offset_x) / self.zoom,
            (point.y - self.offset_y) / self.zoom,
        )
    }

    /// World coordinate → screen pixel.
    pub fn world_to_screen(&self, point: WorldPoint) -> ScreenPoint {
        self.affine().apply(point)
    }

    /// Render-time form: translate by offset, then scale by zoom.
    pub fn affine(&self) -> Affine2 {
        Affine2 {
            offset_x: self.offset_x,
            offset_y: self.offset_y,
            scale: self.zoom,
        }
    }
}

impl Default for ViewTransform {
    fn default() -> Self {
        Self::new(ZoomLimits::default())
    }
}

#[cfg(test)]
#[path = "transform_tests.rs"]
mod tests;
