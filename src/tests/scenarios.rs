//! End-to-end navigation scenarios on the default 10,000 x 10,000 grid.
//!
//! These go through the state handlers the event loop uses, without
//! allocating the grid itself.

use crate::model::KeyAction;
use crate::state::{
    handle_pointer_event, handle_scrollbar_position, handle_view_action, AppState, PointerEvent,
    ViewSettings, WheelDirection,
};
use crate::view_state::culler::ViewportCuller;
use crate::view_state::scroll::Axis;
use crate::view_state::transform::ZoomLimits;
use crate::view_state::types::{GridGeometry, ScreenPoint, TileCoord, ViewportSize, WorldPoint};
use crate::view_state::visible_range::VisibleRange;

fn state() -> AppState {
    let mut s = AppState::new(
        GridGeometry::default(),
        ZoomLimits::default(),
        ViewSettings::default(),
    );
    s.set_viewport(ViewportSize::new(800, 600));
    s
}

fn culler() -> ViewportCuller {
    ViewportCuller::new(GridGeometry::default(), 4.0).expect("valid threshold")
}

#[test]
fn initial_view_covers_top_left_block() {
    let s = state();
    let range = culler().visible_range(&s.transform, s.viewport());
    assert_eq!(range, VisibleRange::new(0, 0, 50, 38, 1));
    assert_eq!(range.visited_count(), 50 * 38);
}

#[test]
fn zooming_out_coarsens_lod() {
    let mut s = state();
    let mut last_step = 1;
    // Wheel down until zoom is below 0.05.
    while s.transform.zoom() > 0.05 {
        s = handle_pointer_event(
            s,
            PointerEvent::Wheel {
                at: ScreenPoint::new(0.0, 0.0),
                direction: WheelDirection::Down,
            },
        );
        let step = culler().lod_step(s.transform.zoom());
        assert!(step >= last_step, "LOD must not get finer while zooming out");
        last_step = step;
    }
    assert!(last_step >= 5);

    let range = culler().visible_range(&s.transform, s.viewport());
    // Bounded by viewport pixels / min visible pixels per axis, plus one.
    assert!(range.visited_columns() <= 800 / 4 + 1);
    assert!(range.visited_rows() <= 600 / 4 + 1);
}

#[test]
fn scrolled_view_picks_tile_under_pointer() {
    let s = handle_scrollbar_position(state(), Axis::Horizontal, 500);
    let s = handle_scrollbar_position(s, Axis::Vertical, 500);
    assert_eq!(s.transform.offset_x(), -500.0);
    assert_eq!(s.transform.offset_y(), -500.0);

    let s = handle_pointer_event(
        s,
        PointerEvent::Move {
            at: ScreenPoint::new(0.0, 0.0),
        },
    );
    assert_eq!(s.hover, Some(TileCoord::new(31, 31)));
}

#[test]
fn repeated_wheel_zoom_keeps_anchor_fixed() {
    let anchor = ScreenPoint::new(400.0, 300.0);
    let mut s = state();
    let world = s.transform.screen_to_world(anchor);
    assert_eq!(world, WorldPoint::new(400.0, 300.0));

    for _ in 0..2 {
        s = handle_pointer_event(
            s,
            PointerEvent::Wheel {
                at: anchor,
                direction: WheelDirection::Up,
            },
        );
    }

    let back = s.transform.world_to_screen(world);
    assert!((back.x - 400.0).abs() < 1e-9);
    assert!((back.y - 300.0).abs() < 1e-9);
    assert!((s.transform.zoom() - 1.21).abs() < 1e-12);
}

#[test]
fn keyboard_and_scrollbars_agree_after_zoom() {
    let s = handle_view_action(state(), KeyAction::ZoomIn);
    let s = handle_view_action(s, KeyAction::PanRight);
    let expected = s.scroll_sync().ranges(&s.transform, s.viewport());
    assert_eq!(s.scrollbars, expected);
    assert_eq!(s.scrollbars.horizontal.max, (160_000.0 * 1.1) as i64);
}
