//! Property-based tests for viewport culling and level of detail.
//!
//! Tests validate:
//! 1. Every tile under a viewport pixel is inside the visible range
//! 2. The range never leaves the grid
//! 3. Quads per axis stay bounded by viewport / min visible pixels
//! 4. LOD never gets finer as zoom decreases

use proptest::prelude::*;
use tmv::view_state::{
    GridGeometry, HoverPicker, ScreenPoint, ViewTransform, ViewportCuller, ViewportSize,
    ZoomLimits,
};

const MIN_VISIBLE_PIXELS: f64 = 4.0;

fn culler() -> ViewportCuller {
    ViewportCuller::new(GridGeometry::default(), MIN_VISIBLE_PIXELS).unwrap()
}

fn transform(offset_x: f64, offset_y: f64, zoom: f64) -> ViewTransform {
    ViewTransform::from_parts(offset_x, offset_y, zoom, ZoomLimits::default()).unwrap()
}

prop_compose! {
    fn arb_view()(
        offset_x in -200_000.0f64..200_000.0,
        offset_y in -200_000.0f64..200_000.0,
        zoom in 1e-4f64..256.0,
        width in 1u32..2_000,
        height in 1u32..2_000,
    ) -> (ViewTransform, ViewportSize) {
        (transform(offset_x, offset_y, zoom), ViewportSize::new(width, height))
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn tile_under_any_pixel_is_in_range(
        (t, viewport) in arb_view(),
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
    ) {
        let range = culler().visible_range(&t, viewport);
        // Pixel centre, so the sample is strictly inside the viewport.
        let px = (fx * f64::from(viewport.width)).floor() + 0.5;
        let py = (fy * f64::from(viewport.height)).floor() + 0.5;
        let picker = HoverPicker::new(GridGeometry::default());
        if let Some(tile) = picker.pick(&t, ScreenPoint::new(px, py)) {
            prop_assert!(
                range.contains(tile),
                "tile {:?} at pixel ({}, {}) missing from {:?}",
                tile, px, py, range
            );
        }
    }

    #[test]
    fn range_stays_inside_grid((t, viewport) in arb_view()) {
        let geometry = GridGeometry::default();
        let range = culler().visible_range(&t, viewport);
        prop_assert!(range.tile_x0 <= range.tile_x1);
        prop_assert!(range.tile_y0 <= range.tile_y1);
        prop_assert!(range.tile_x1 <= geometry.map_width());
        prop_assert!(range.tile_y1 <= geometry.map_height());
        prop_assert!(range.step >= 1);
        for cell in range.cells().take(64) {
            prop_assert!(cell.x < geometry.map_width() && cell.y < geometry.map_height());
        }
    }

    #[test]
    fn quads_per_axis_are_bounded((t, viewport) in arb_view()) {
        let range = culler().visible_range(&t, viewport);
        let max_cols = f64::from(viewport.width) / MIN_VISIBLE_PIXELS + 3.0;
        let max_rows = f64::from(viewport.height) / MIN_VISIBLE_PIXELS + 3.0;
        prop_assert!(f64::from(range.visited_columns()) <= max_cols);
        prop_assert!(f64::from(range.visited_rows()) <= max_rows);
    }

    #[test]
    fn lod_is_monotonic_in_zoom(a in 1e-4f64..256.0, b in 1e-4f64..256.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        let c = culler();
        prop_assert!(c.lod_step(low) >= c.lod_step(high));
    }
}

#[test]
fn degenerate_viewport_culls_to_nothing() {
    let range = culler().visible_range(&transform(0.0, 0.0, 1.0), ViewportSize::new(0, 600));
    assert!(range.is_empty());
    assert_eq!(range.visited_count(), 0);
}
