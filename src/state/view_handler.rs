//! Keyboard navigation handler.
//!
//! Pure functions that transform AppState in response to view actions.

use crate::model::KeyAction;
use crate::state::AppState;

/// Apply a navigation action.
///
/// Pans move by `pan_step` screen pixels, zooms anchor at the viewport
/// centre. Every change re-synchronises the scrollbars. `Quit` is left to
/// the event loop and is a no-op here.
pub fn handle_view_action(mut state: AppState, action: KeyAction) -> AppState {
    if let Some((dx, dy)) = action.pan_direction() {
        let step = state.settings.pan_step;
        state.transform.pan_by(dx * step, dy * step);
        state.sync_scrollbars();
        return state;
    }

    match action {
        KeyAction::ZoomIn | KeyAction::ZoomOut => {
            let factor = if action == KeyAction::ZoomIn {
                state.settings.zoom_in_factor
            } else {
                state.settings.zoom_out_factor
            };
            let centre = state.viewport_centre();
            if state.transform.zoom_at(centre, factor).is_ok() {
                state.sync_scrollbars();
            }
        }
        KeyAction::ResetView => {
            state.transform.reset();
            state.sync_scrollbars();
        }
        _ => {}
    }
    state
}
