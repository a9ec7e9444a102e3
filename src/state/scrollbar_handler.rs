//! Scrollbar event handler.
//!
//! The scrollbar → transform path. Writes the widget's own position and the
//! transform offset, and never recomputes the ranges, so a drag cannot
//! oscillate.

use crate::state::AppState;
use crate::view_state::scroll::Axis;

/// The user moved the `axis` scrollbar to `position`.
///
/// The position is clamped the way the widget clamps it, stored on the
/// widget, then applied as `offset = -position`.
pub fn handle_scrollbar_position(mut state: AppState, axis: Axis, position: i64) -> AppState {
    let range = state.scrollbars.get_mut(axis);
    let clamped = range.clamp_position(position);
    range.position = clamped;
    let sync = *state.scroll_sync();
    sync.apply_position(axis, clamped, &mut state.transform);
    state
}
