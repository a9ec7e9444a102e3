//! UI state machine (pure).
//!
//! All state transitions are pure functions testable without TUI.

pub mod app_state;
pub mod mouse_handler;
pub mod scrollbar_handler;
pub mod view_handler;

// Re-export for convenience
pub use app_state::{AppState, DragState, ViewSettings};
pub use mouse_handler::{handle_pointer_event, PointerButton, PointerEvent, WheelDirection};
pub use scrollbar_handler::handle_scrollbar_position;
pub use view_handler::handle_view_action;
