//! Scrollbar synchronisation
//!
//! Two one-way paths between the view transform and the scrollbar widgets:
//!
//! - transform → scrollbar: [`ScrollSync::ranges`], called after every
//!   transform mutation that did not come from a scrollbar.
//! - scrollbar → transform: [`ScrollSync::apply_position`], which only
//!   writes the offset and never recomputes ranges, so a drag cannot feed
//!   back into itself.

use super::transform::ViewTransform;
use super::types::{GridGeometry, ViewportSize};

/// Scroll direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Left/right.
    Horizontal,
    /// Up/down.
    Vertical,
}

/// Parameters of one scrollbar widget, in screen pixels.
///
/// # Invariants
/// - `min == 0`
/// - `max >= page_size` (content never reported smaller than the viewport)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollRange {
    /// Current thumb position.
    pub position: i64,
    /// Visible extent (the viewport size on this axis).
    pub page_size: i64,
    /// Lower bound.
    pub min: i64,
    /// Content extent.
    pub max: i64,
}

impl ScrollRange {
    /// Largest position a widget accepts, `max - page_size` (never below `min`).
    pub fn max_position(&self) -> i64 {
        (self.max - self.page_size).max(self.min)
    }

    /// Clamp `position` into `[min, max - page_size]`.
    pub fn clamp_position(&self, position: i64) -> i64 {
        position.clamp(self.min, self.max_position())
    }

    /// This range with its position replaced by a clamped `position`.
    pub fn with_position(self, position: i64) -> Self {
        Self {
            position: self.clamp_position(position),
            ..self
        }
    }
}

/// Both scrollbar ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollRanges {
    /// Horizontal scrollbar.
    pub horizontal: ScrollRange,
    /// Vertical scrollbar.
    pub vertical: ScrollRange,
}

impl ScrollRanges {
    /// Range for `axis`.
    pub fn get(&self, axis: Axis) -> ScrollRange {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }

    /// Mutable range for `axis`.
    pub fn get_mut(&mut self, axis: Axis) -> &mut ScrollRange {
        match axis {
            Axis::Horizontal => &mut self.horizontal,
            Axis::Vertical => &mut self.vertical,
        }
    }
}

/// Converts between [`ViewTransform`] and scrollbar parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollSync {
    geometry: GridGeometry,
}

impl ScrollSync {
    /// Create a sync helper for `geometry`.
    pub fn new(geometry: GridGeometry) -> Self {
        Self { geometry }
    }

    /// Scrollbar parameters for both axes.
    pub fn ranges(&self, transform: &ViewTransform, viewport: ViewportSize) -> ScrollRanges {
        ScrollRanges {
            horizontal: self.axis_range(Axis::Horizontal, transform, viewport),
            vertical: self.axis_range(Axis::Vertical, transform, viewport),
        }
    }

    /// Scrollbar parameters for one axis.
    ///
    /// `position = trunc(-offset)`, `page_size = viewport`,
    /// `max = max(viewport, trunc(content))`. The position is reported
    /// unclamped; widgets clamp it with [`ScrollRange::clamp_position`].
    pub fn axis_range(
        &self,
        axis: Axis,
        transform: &ViewTransform,
        viewport: ViewportSize,
    ) -> ScrollRange {
        let (offset, extent, world) = match axis {
            Axis::Horizontal => (
                transform.offset_x(),
                viewport.width,
                self.geometry.world_width(),
            ),
            Axis::Vertical => (
                transform.offset_y(),
                viewport.height,
                self.geometry.world_height(),
            ),
        };
        let page_size = i64::from(extent);
        // `as` truncates toward zero and saturates, matching integer scrollbars.
        let content = (world * transform.zoom()) as i64;
        ScrollRange {
            position: (-offset) as i64,
            page_size,
            min: 0,
            max: page_size.max(content),
        }
    }

    /// Scrollbar moved: set the offset on `axis` to `-position`.
    ///
    /// Absolute, and leaves scrollbar ranges alone.
    pub fn apply_position(&self, axis: Axis, position: i64, transform: &mut ViewTransform) {
        let offset = -(position as f64);
        match axis {
            Axis::Horizontal => transform.set_offset_x(offset),
            Axis::Vertical => transform.set_offset_y(offset),
        }
    }
}
