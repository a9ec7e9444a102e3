//! Pointer event handler.
//!
//! Pure functions that transform AppState in response to pointer events
//! on the grid canvas. Coordinates are screen pixels.

use crate::state::app_state::DragState;
use crate::state::AppState;
use crate::view_state::types::ScreenPoint;
use tracing::trace;

/// Mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    /// Primary button; drags pan the view.
    Left,
    /// Secondary button.
    Right,
    /// Middle button.
    Middle,
}

/// Wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WheelDirection {
    /// Away from the user; zooms in.
    Up,
    /// Towards the user; zooms out.
    Down,
}

/// Pointer input on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    /// Button pressed.
    Down {
        /// Pointer position.
        at: ScreenPoint,
        /// Which button.
        button: PointerButton,
    },
    /// Pointer moved with a button held.
    Drag {
        /// Pointer position.
        at: ScreenPoint,
        /// Which button.
        button: PointerButton,
    },
    /// Button released.
    Up {
        /// Pointer position.
        at: ScreenPoint,
        /// Which button.
        button: PointerButton,
    },
    /// Pointer moved with no button held.
    Move {
        /// Pointer position.
        at: ScreenPoint,
    },
    /// Wheel notch.
    Wheel {
        /// Pointer position; the zoom anchor.
        at: ScreenPoint,
        /// Notch direction.
        direction: WheelDirection,
    },
}

/// Apply one pointer event.
///
/// # Behavior
/// - Left press starts a drag; any release ends it
/// - Drag pans by the pointer delta since the last drag step
/// - Wheel zooms at the pointer by the configured factor
/// - Move recomputes hover
///
/// Drag and wheel re-synchronise the scrollbars.
pub fn handle_pointer_event(mut state: AppState, event: PointerEvent) -> AppState {
    match event {
        PointerEvent::Down {
            at,
            button: PointerButton::Left,
        } => {
            state.drag = DragState::Dragging { last: at };
            state.pointer = Some(at);
        }
        PointerEvent::Down { at, .. } => {
            state.pointer = Some(at);
        }
        PointerEvent::Drag { at, .. } => {
            state.pointer = Some(at);
            if let DragState::Dragging { last } = state.drag {
                state.transform.pan_by(at.x - last.x, at.y - last.y);
                state.drag = DragState::Dragging { last: at };
                state.sync_scrollbars();
            }
        }
        PointerEvent::Up { at, .. } => {
            state.pointer = Some(at);
            state.drag = DragState::Idle;
        }
        PointerEvent::Move { at } => {
            state.update_hover(at);
        }
        PointerEvent::Wheel { at, direction } => {
            state.pointer = Some(at);
            let factor = match direction {
                WheelDirection::Up => state.settings.zoom_in_factor,
                WheelDirection::Down => state.settings.zoom_out_factor,
            };
            if state.transform.zoom_at(at, factor).is_ok() {
                trace!(zoom = state.transform.zoom(), "Wheel zoom");
                state.sync_scrollbars();
            }
        }
    }
    state
}

#[cfg(test)]
#[path = "mouse_handler_tests.rs"]
mod tests;
