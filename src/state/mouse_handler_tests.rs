//! Tests for pointer event handling.

use super::*;
use crate::state::app_state::ViewSettings;
use crate::view_state::transform::ZoomLimits;
use crate::view_state::types::{GridGeometry, TileCoord, ViewportSize};

// ===== Test Helpers =====

fn state() -> AppState {
    let mut s = AppState::new(
        GridGeometry::default(),
        ZoomLimits::default(),
        ViewSettings::default(),
    );
    s.set_viewport(ViewportSize::new(800, 600));
    s
}

fn at(x: f64, y: f64) -> ScreenPoint {
    ScreenPoint::new(x, y)
}

fn left_down(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Down {
        at: at(x, y),
        button: PointerButton::Left,
    }
}

fn left_drag(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Drag {
        at: at(x, y),
        button: PointerButton::Left,
    }
}

fn left_up(x: f64, y: f64) -> PointerEvent {
    PointerEvent::Up {
        at: at(x, y),
        button: PointerButton::Left,
    }
}

fn assert_close(actual: f64, expected: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff < 1e-9 * expected.abs().max(1.0),
        "expected {expected}, got {actual}"
    );
}

// ===== Drag =====

mod drag {
    use super::*;

    #[test]
    fn drag_pans_by_pointer_delta() {
        let mut s = state();
        s = handle_pointer_event(s, left_down(100.0, 100.0));
        s = handle_pointer_event(s, left_drag(130.0, 90.0));
        s = handle_pointer_event(s, left_drag(140.0, 95.0));
        assert_eq!(s.transform.offset_x(), 40.0);
        assert_eq!(s.transform.offset_y(), -5.0);
    }

    #[test]
    fn drag_updates_scrollbars() {
        let mut s = state();
        s = handle_pointer_event(s, left_down(500.0, 500.0));
        s = handle_pointer_event(s, left_drag(300.0, 200.0));
        assert_eq!(s.scrollbars.horizontal.position, 200);
        assert_eq!(s.scrollbars.vertical.position, 300);
    }

    #[test]
    fn release_ends_drag() {
        let mut s = state();
        s = handle_pointer_event(s, left_down(0.0, 0.0));
        s = handle_pointer_event(s, left_up(0.0, 0.0));
        s = handle_pointer_event(s, left_drag(50.0, 50.0));
        assert_eq!(s.transform.offset_x(), 0.0);
        assert_eq!(s.drag, DragState::Idle);
    }

    #[test]
    fn right_button_does_not_start_drag() {
        let mut s = state();
        s = handle_pointer_event(
            s,
            PointerEvent::Down {
                at: at(0.0, 0.0),
                button: PointerButton::Right,
            },
        );
        s = handle_pointer_event(
            s,
            PointerEvent::Drag {
                at: at(10.0, 10.0),
                button: PointerButton::Right,
            },
        );
        assert_eq!(s.transform.offset_x(), 0.0);
    }

    #[test]
    fn drag_does_not_touch_hover() {
        let mut s = state();
        s = handle_pointer_event(s, PointerEvent::Move { at: at(8.0, 8.0) });
        assert_eq!(s.hover, Some(TileCoord::new(0, 0)));
        s = handle_pointer_event(s, left_down(8.0, 8.0));
        s = handle_pointer_event(s, left_drag(-800.0, 8.0));
        assert_eq!(s.hover, Some(TileCoord::new(0, 0)));
    }
}

// ===== Wheel =====

mod wheel {
    use super::*;

    #[test]
    fn two_zoom_ins_keep_anchor_pixel() {
        let mut s = state();
        let anchor = at(400.0, 300.0);
        let world = s.transform.screen_to_world(anchor);
        for _ in 0..2 {
            s = handle_pointer_event(
                s,
                PointerEvent::Wheel {
                    at: anchor,
                    direction: WheelDirection::Up,
                },
            );
        }
        let screen = s.transform.world_to_screen(world);
        assert_close(screen.x, 400.0);
        assert_close(screen.y, 300.0);
        assert_close(s.transform.zoom(), 1.1 * 1.1);
    }

    #[test]
    fn wheel_down_zooms_out() {
        let mut s = state();
        s = handle_pointer_event(
            s,
            PointerEvent::Wheel {
                at: at(0.0, 0.0),
                direction: WheelDirection::Down,
            },
        );
        assert_close(s.transform.zoom(), 0.9);
    }

    #[test]
    fn wheel_updates_scrollbar_content() {
        let mut s = state();
        s = handle_pointer_event(
            s,
            PointerEvent::Wheel {
                at: at(0.0, 0.0),
                direction: WheelDirection::Down,
            },
        );
        assert_eq!(s.scrollbars.horizontal.max, (160_000.0 * 0.9) as i64);
    }
}

// ===== Move =====

mod hover {
    use super::*;

    #[test]
    fn move_sets_hover() {
        let mut s = state();
        s.transform.pan_by(-500.0, -500.0);
        s = handle_pointer_event(s, PointerEvent::Move { at: at(0.0, 0.0) });
        assert_eq!(s.hover, Some(TileCoord::new(31, 31)));
    }

    #[test]
    fn move_off_grid_clears_hover() {
        let mut s = state();
        s = handle_pointer_event(s, PointerEvent::Move { at: at(5.0, 5.0) });
        assert!(s.hover.is_some());
        s.transform.pan_by(100.0, 0.0);
        s = handle_pointer_event(s, PointerEvent::Move { at: at(5.0, 5.0) });
        assert_eq!(s.hover, None);
    }
}
