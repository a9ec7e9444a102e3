//! Screen layout: canvas, scrollbars and status bar.
//!
//! ```text
//! +----------------------------+-+
//! |                            |v|
//! |          canvas            |s|
//! |                            | |
//! +----------------------------+-+
//! | horizontal scrollbar       | |
//! +----------------------------+-+
//! | status                       |
//! +------------------------------+
//! ```

use crate::model::error::AtlasError;
use crate::render::frame::FrameReport;
use crate::view::canvas::TerminalCanvas;
use crate::view::scrollbar::ScrollbarWidget;
use crate::view_state::scroll::{Axis, ScrollRanges};
use crate::view_state::types::{TileCoord, ViewportSize};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Title shown before the first FPS report.
pub const DEFAULT_TITLE: &str = "Tilemap Viewer";

/// Areas of one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewLayout {
    /// Grid canvas.
    pub canvas: Rect,
    /// Vertical scrollbar (right edge).
    pub vertical: ScrollbarWidget,
    /// Horizontal scrollbar (below the canvas).
    pub horizontal: ScrollbarWidget,
    /// Status line.
    pub status: Rect,
}

impl ViewLayout {
    /// Split `area` into canvas, scrollbars and status line.
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(0),    // Canvas + vertical scrollbar
                Constraint::Length(1), // Horizontal scrollbar
                Constraint::Length(1), // Status bar
            ])
            .split(area);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(rows[0]);

        let bottom = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(rows[1]);

        Self {
            canvas: top[0],
            vertical: ScrollbarWidget::new(Axis::Vertical, top[1]),
            horizontal: ScrollbarWidget::new(Axis::Horizontal, bottom[0]),
            status: rows[2],
        }
    }

    /// Canvas size in screen pixels: one column wide, two pixels per row.
    pub fn viewport(&self) -> ViewportSize {
        ViewportSize::new(
            u32::from(self.canvas.width),
            u32::from(self.canvas.height) * 2,
        )
    }

    /// Scrollbar under the terminal cell `(column, row)`, if any.
    pub fn scrollbar_at(&self, column: u16, row: u16) -> Option<ScrollbarWidget> {
        [self.vertical, self.horizontal]
            .into_iter()
            .find(|bar| bar.contains(column, row))
    }

    /// Scrollbar for `axis`.
    pub fn scrollbar(&self, axis: Axis) -> ScrollbarWidget {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// Everything the status line shows.
#[derive(Debug, Clone, Copy)]
pub struct StatusLine<'a> {
    /// Last title reported by the renderer.
    pub title: &'a str,
    /// Current zoom factor.
    pub zoom: f64,
    /// Tile under the pointer.
    pub hover: Option<TileCoord>,
    /// Last frame's work.
    pub report: Option<FrameReport>,
    /// Atlas failure, shown in place of the counters.
    pub diagnostic: Option<&'a AtlasError>,
}

/// Render a full frame.
pub fn render_layout(
    frame: &mut Frame,
    layout: &ViewLayout,
    canvas: &TerminalCanvas,
    scrollbars: &ScrollRanges,
    status: StatusLine<'_>,
) {
    canvas.blit(frame.buffer_mut(), layout.canvas);
    layout
        .vertical
        .render(&scrollbars.vertical, frame.buffer_mut());
    layout
        .horizontal
        .render(&scrollbars.horizontal, frame.buffer_mut());
    render_status_bar(frame, layout.status, status);
}

fn render_status_bar(frame: &mut Frame, area: Rect, status: StatusLine<'_>) {
    let mut spans = vec![Span::styled(
        status.title.to_string(),
        Style::default().add_modifier(Modifier::BOLD),
    )];

    if let Some(err) = status.diagnostic {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("atlas error: {err}"),
            Style::default().fg(Color::Red),
        ));
    } else {
        spans.push(Span::raw(format!("  zoom {:.1}%", status.zoom * 100.0)));
        if let Some(report) = status.report {
            spans.push(Span::raw(format!(
                "  step {}  quads {}",
                report.range.step, report.drawn_quads
            )));
        }
        if let Some(tile) = status.hover {
            spans.push(Span::styled(
                format!("  tile ({}, {})", tile.x, tile.y),
                Style::default().fg(Color::Yellow),
            ));
        }
    }

    let paragraph =
        Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}
