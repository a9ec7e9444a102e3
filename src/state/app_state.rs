//! Application state and transitions.
//!
//! AppState is the root state type containing all interactive view state.
//! Transitions are pure functions in the sibling handler modules.

use crate::view_state::hit_test::HoverPicker;
use crate::view_state::scroll::{ScrollRanges, ScrollSync};
use crate::view_state::transform::{ViewTransform, ZoomLimits};
use crate::view_state::types::{GridGeometry, ScreenPoint, TileCoord, ViewportSize};

/// Tunables for interactive navigation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewSettings {
    /// Multiplier applied on zoom-in (wheel up, `+`).
    pub zoom_in_factor: f64,
    /// Multiplier applied on zoom-out (wheel down, `-`).
    pub zoom_out_factor: f64,
    /// Keyboard pan distance in screen pixels.
    pub pan_step: f64,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            zoom_in_factor: 1.1,
            zoom_out_factor: 0.9,
            pan_step: 8.0,
        }
    }
}

/// Left-button drag tracking.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// Dragging; `last` is the previous pointer position.
    Dragging {
        /// Pointer position at the last drag step.
        last: ScreenPoint,
    },
}

/// Application state. Pure data, no side effects.
///
/// # State Machine
///
/// - **Drag**: Idle → Dragging (left press) → Idle (any release)
/// - **Hover**: recomputed on pointer move only, so it reflects the
///   transform at the time of that move
/// - **Scrollbars**: recomputed after every transform change that did not
///   come from a scrollbar
#[derive(Debug, Clone)]
pub struct AppState {
    /// Shared pan/zoom.
    pub transform: ViewTransform,

    /// Tile under the pointer at the last move.
    pub hover: Option<TileCoord>,

    /// Drag tracking.
    pub drag: DragState,

    /// Last known pointer position in screen pixels.
    pub pointer: Option<ScreenPoint>,

    /// Scrollbar widget parameters.
    pub scrollbars: ScrollRanges,

    /// Navigation tunables.
    pub settings: ViewSettings,

    viewport: ViewportSize,
    picker: HoverPicker,
    sync: ScrollSync,
}

impl AppState {
    /// Create state for a grid of `geometry` with an identity transform.
    pub fn new(geometry: GridGeometry, limits: ZoomLimits, settings: ViewSettings) -> Self {
        Self {
            transform: ViewTransform::new(limits),
            hover: None,
            drag: DragState::Idle,
            pointer: None,
            scrollbars: ScrollRanges::default(),
            settings,
            viewport: ViewportSize::default(),
            picker: HoverPicker::new(geometry),
            sync: ScrollSync::new(geometry),
        }
    }

    /// Current drawable area in screen pixels.
    pub fn viewport(&self) -> ViewportSize {
        self.viewport
    }

    /// Record a new viewport size and refresh the scrollbars.
    pub fn set_viewport(&mut self, viewport: ViewportSize) {
        self.viewport = viewport;
        self.sync_scrollbars();
    }

    /// Centre of the viewport in screen pixels.
    pub fn viewport_centre(&self) -> ScreenPoint {
        ScreenPoint::new(
            f64::from(self.viewport.width) / 2.0,
            f64::from(self.viewport.height) / 2.0,
        )
    }

    /// Hover picker for this grid.
    pub fn picker(&self) -> &HoverPicker {
        &self.picker
    }

    /// Scroll sync helper for this grid.
    pub fn scroll_sync(&self) -> &ScrollSync {
        &self.sync
    }

    /// Transform → scrollbar path.
    pub fn sync_scrollbars(&mut self) {
        self.scrollbars = self.sync.ranges(&self.transform, self.viewport);
    }

    /// Recompute hover from `pointer` under the current transform.
    pub fn update_hover(&mut self, pointer: ScreenPoint) {
        self.pointer = Some(pointer);
        self.hover = self.picker.pick(&self.transform, pointer);
    }
}
