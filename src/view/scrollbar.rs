//! Scrollbar widgets around the grid canvas.
//!
//! Rendering goes through ratatui's [`Scrollbar`]. Pointer input on the
//! track is turned back into a scroll position for the
//! scrollbar → transform path.

use crate::view_state::scroll::{Axis, ScrollRange};
use ratatui::buffer::Buffer;
use ratatui::layout::{Position, Rect};
use ratatui::widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget};

/// One scrollbar bound to a screen area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScrollbarWidget {
    axis: Axis,
    area: Rect,
}

impl ScrollbarWidget {
    /// Scrollbar for `axis` occupying `area`.
    pub fn new(axis: Axis, area: Rect) -> Self {
        Self { axis, area }
    }

    /// Axis this widget scrolls.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Screen area of the track.
    pub fn area(&self) -> Rect {
        self.area
    }

    /// Whether the terminal cell `(column, row)` is on the track.
    pub fn contains(&self, column: u16, row: u16) -> bool {
        self.area.contains(Position::new(column, row))
    }

    fn track_len(&self) -> u16 {
        match self.axis {
            Axis::Horizontal => self.area.width,
            Axis::Vertical => self.area.height,
        }
    }

    /// Scroll position for a pointer at `(column, row)`.
    ///
    /// The first track cell maps to `min`, the last to `max - page_size`,
    /// linearly in between. Points past either end clamp.
    pub fn position_at(&self, column: u16, row: u16, range: &ScrollRange) -> i64 {
        let len = self.track_len();
        if len <= 1 {
            return range.min;
        }
        let cell = match self.axis {
            Axis::Horizontal => column.saturating_sub(self.area.x),
            Axis::Vertical => row.saturating_sub(self.area.y),
        }
        .min(len - 1);

        let span = (range.max_position() - range.min) as f64;
        let fraction = f64::from(cell) / f64::from(len - 1);
        range.clamp_position(range.min + (span * fraction).round() as i64)
    }

    /// Draw the track and thumb for `range`.
    pub fn render(&self, range: &ScrollRange, buf: &mut Buffer) {
        let orientation = match self.axis {
            Axis::Horizontal => ScrollbarOrientation::HorizontalBottom,
            Axis::Vertical => ScrollbarOrientation::VerticalRight,
        };
        let scrollable = (range.max_position() - range.min).max(0) as usize;
        let mut state = ScrollbarState::new(scrollable + 1)
            .position((range.position - range.min).max(0) as usize)
            .viewport_content_length(range.page_size.max(0) as usize);
        Scrollbar::new(orientation)
            .begin_symbol(None)
            .end_symbol(None)
            .render(self.area, buf, &mut state);
    }
}
