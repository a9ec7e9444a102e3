//! Tests for per-frame orchestration.

use super::*;
use crate::model::grid::TileId;
use crate::render::recording::{DrawCommand, RecordingDrawer, RecordingTitle, StaticAtlasLoader};
use crate::view_state::transform::ZoomLimits;
use std::time::Duration;

fn solid_atlas(size: u32) -> Atlas {
    Atlas::new(size, size, vec![255; size as usize * size as usize * 4]).unwrap()
}

fn renderer(geometry: GridGeometry, loader: StaticAtlasLoader) -> FrameRenderer<StaticAtlasLoader> {
    FrameRenderer::new(ViewportCuller::new(geometry, 4.0).unwrap(), loader)
}

fn transform(offset_x: f64, offset_y: f64, zoom: f64) -> ViewTransform {
    ViewTransform::from_parts(offset_x, offset_y, zoom, ZoomLimits::default()).unwrap()
}

fn input<'a>(
    grid: &'a TileGrid,
    transform: &'a ViewTransform,
    viewport: ViewportSize,
    hover: Option<TileCoord>,
    now: Instant,
) -> FrameInput<'a> {
    FrameInput {
        grid,
        transform,
        viewport,
        hover,
        now,
    }
}

mod draw_sequence {
    use super::*;

    fn tiny_scene() -> (GridGeometry, TileGrid) {
        let geometry = GridGeometry::new(16, 4, 3, 2).unwrap();
        let cells = [0, 3, 1, 2, 2, 1, 0, 3, 3, 3, 3, 3]
            .into_iter()
            .map(TileId::new)
            .collect();
        let grid = TileGrid::from_cells(4, 3, 4, cells).unwrap();
        (geometry, grid)
    }

    #[test]
    fn first_frame_with_hover() {
        let (geometry, grid) = tiny_scene();
        let mut r = renderer(geometry, StaticAtlasLoader::ok(solid_atlas(32)));
        let mut drawer = RecordingDrawer::new();
        let mut title = RecordingTitle::new();
        let t = ViewTransform::default();

        let report = r.render(
            &mut drawer,
            &mut title,
            input(&grid, &t, ViewportSize::new(32, 16), Some(TileCoord::new(1, 0)), Instant::now()),
        );

        insta::assert_snapshot!(drawer.transcript(), @r"
        projection 32x16
        bind_atlas 32x32
        clear #1a1a1a
        push translate(0, 0) scale(1)
        quad tile=0 at (0, 0) size 16 uv (0, 0, 0.5, 0.5)
        quad tile=3 at (16, 0) size 16 uv (0.5, 0.5, 0.5, 0.5)
        texturing off
        outline (16, 0) 16x16 #ff0000
        texturing on
        pop
        ");
        assert_eq!(report.drawn_quads, 2);
        assert_eq!(report.status, RenderStatus::Drawn);
    }

    #[test]
    fn no_hover_means_no_texturing_toggle() {
        let (geometry, grid) = tiny_scene();
        let mut r = renderer(geometry, StaticAtlasLoader::ok(solid_atlas(32)));
        let mut drawer = RecordingDrawer::new();
        let t = ViewTransform::default();
        r.render(
            &mut drawer,
            &mut RecordingTitle::new(),
            input(&grid, &t, ViewportSize::new(64, 48), None, Instant::now()),
        );
        assert!(!drawer
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::SetTexturing(_) | DrawCommand::Outline(..))));
        assert_eq!(drawer.quad_count(), 12);
        assert_eq!(drawer.commands().last(), Some(&DrawCommand::PopTransform));
    }

    #[test]
    fn pushed_transform_is_the_view_affine() {
        let (geometry, grid) = tiny_scene();
        let mut r = renderer(geometry, StaticAtlasLoader::ok(solid_atlas(32)));
        let mut drawer = RecordingDrawer::new();
        let t = transform(-8.0, 4.0, 2.0);
        r.render(
            &mut drawer,
            &mut RecordingTitle::new(),
            input(&grid, &t, ViewportSize::new(32, 16), None, Instant::now()),
        );
        assert!(drawer
            .commands()
            .contains(&DrawCommand::PushTransform(t.affine())));
    }
}

mod lifecycle {
    use super::*;

    #[test]
    fn atlas_loads_once_and_projection_is_not_repeated() {
        let geometry = GridGeometry::new(16, 8, 8, 2).unwrap();
        let grid = TileGrid::generate(8, 8, 4, 0).unwrap();
        let mut r = renderer(geometry, StaticAtlasLoader::ok(solid_atlas(32)));
        let mut drawer = RecordingDrawer::new();
        let mut title = RecordingTitle::new();
        let t = ViewTransform::default();
        let now = Instant::now();
        let viewport = ViewportSize::new(64, 64);

        r.render(&mut drawer, &mut title, input(&grid, &t, viewport, None, now));
        drawer.clear_commands();
        r.render(&mut drawer, &mut title, input(&grid, &t, viewport, None, now));

        assert_eq!(drawer.commands()[0], DrawCommand::Clear(Rgb::BACKGROUND));
        assert!(!drawer
            .commands()
            .iter()
            .any(|c| matches!(c, DrawCommand::SetProjection(_) | DrawCommand::BindAtlas { .. })));
        assert!(r.atlas().is_some());
    }

    #[test]
    fn resize_resets_projection_only() {
        let geometry = GridGeometry::new(16, 8, 8, 2).unwrap();
        let grid = TileGrid::generate(8, 8, 4, 0).unwrap();
        let mut r = renderer(geometry, StaticAtlasLoader::ok(solid_atlas(32)));
        let mut drawer = RecordingDrawer::new();
        let mut title = RecordingTitle::new();
        let t = ViewTransform::default();
        let now = Instant::now();

        r.render(&mut drawer, &mut title, input(&grid, &t, ViewportSize::new(64, 64), None, now));
        drawer.clear_commands();
        r.render(&mut drawer, &mut title, input(&grid, &t, ViewportSize::new(32, 80), None, now));

        assert_eq!(
            &drawer.commands()[..2],
            &[
                DrawCommand::SetProjection(ViewportSize::new(32, 80)),
                DrawCommand::Clear(Rgb::BACKGROUND)
            ]
        );
    }
}

mod atlas_failure {
    use super::*;

    fn missing() -> AtlasError {
        AtlasError::NotFound {
            path: "tileset.png".into(),
        }
    }

    #[test]
    fn failure_disables_drawing_and_is_reported() {
        let geometry = GridGeometry::new(16, 8, 8, 2).unwrap();
        let grid = TileGrid::generate(8, 8, 4, 0).unwrap();
        let mut r = renderer(geometry, StaticAtlasLoader::failing(missing()));
        let mut drawer = RecordingDrawer::new();
        let t = ViewTransform::default();

        let report = r.render(
            &mut drawer,
            &mut RecordingTitle::new(),
            input(&grid, &t, ViewportSize::new(64, 64), Some(TileCoord::new(0, 0)), Instant::now()),
        );

        assert_eq!(report.status, RenderStatus::Disabled);
        assert_eq!(report.drawn_quads, 0);
        assert!(report.range.is_empty());
        assert_eq!(r.diagnostic(), Some(&missing()));
        assert_eq!(
            drawer.commands(),
            &[
                DrawCommand::SetProjection(ViewportSize::new(64, 64)),
                DrawCommand::Clear(Rgb::BACKGROUND)
            ]
        );
    }

    #[test]
    fn later_frames_keep_running_without_reloading() {
        let geometry = GridGeometry::new(16, 8, 8, 2).unwrap();
        let grid = TileGrid::generate(8, 8, 4, 0).unwrap();
        let mut r = renderer(geometry, StaticAtlasLoader::failing(missing()));
        let mut drawer = RecordingDrawer::new();
        let mut title = RecordingTitle::new();
        let t = ViewTransform::default();
        let t0 = Instant::now();

        for i in 0..3 {
            let report = r.render(
                &mut drawer,
                &mut title,
                input(&grid, &t, ViewportSize::new(64, 64), None, t0 + Duration::from_millis(i * 600)),
            );
            assert_eq!(report.status, RenderStatus::Disabled);
        }
        assert_eq!(r.loader.calls(), 1);
        assert_eq!(title.last(), Some("Tilemap Viewer - FPS: 3"));
    }

    #[test]
    fn undersized_atlas_is_a_failure() {
        let geometry = GridGeometry::new(16, 8, 8, 2).unwrap();
        let grid = TileGrid::generate(8, 8, 4, 0).unwrap();
        let mut r = renderer(geometry, StaticAtlasLoader::ok(solid_atlas(16)));
        let mut drawer = RecordingDrawer::new();
        let t = ViewTransform::default();
        r.render(
            &mut drawer,
            &mut RecordingTitle::new(),
            input(&grid, &t, ViewportSize::new(64, 64), None, Instant::now()),
        );
        assert!(matches!(r.diagnostic(), Some(AtlasError::TooSmall { .. })));
        assert_eq!(drawer.quad_count(), 0);
    }
}

mod culling_and_lod {
    use super::*;

    #[test]
    fn unit_zoom_draws_50_by_38() {
        let geometry = GridGeometry::new(16, 64, 64, 8).unwrap();
        let grid = TileGrid::generate(64, 64, 64, 3).unwrap();
        let mut r = renderer(geometry, StaticAtlasLoader::ok(solid_atlas(128)));
        let mut drawer = RecordingDrawer::new();
        let t = ViewTransform::default();
        let report = r.render(
            &mut drawer,
            &mut RecordingTitle::new(),
            input(&grid, &t, ViewportSize::new(800, 600), None, Instant::now()),
        );
        assert_eq!(report.range, VisibleRange::new(0, 0, 50, 38, 1));
        assert_eq!(report.drawn_quads, 50 * 38);
    }

    #[test]
    fn zoomed_out_draws_stepped_blocks() {
        let geometry = GridGeometry::new(16, 200, 200, 8).unwrap();
        let grid = TileGrid::generate(200, 200, 64, 3).unwrap();
        let mut r = renderer(geometry, StaticAtlasLoader::ok(solid_atlas(128)));
        let mut drawer = RecordingDrawer::new();
        let t = transform(0.0, 0.0, 0.05);
        let report = r.render(
            &mut drawer,
            &mut RecordingTitle::new(),
            input(&grid, &t, ViewportSize::new(800, 600), None, Instant::now()),
        );
        assert_eq!(report.range.step, 5);
        assert_eq!(report.drawn_quads, 40 * 40);
        let first = drawer
            .commands()
            .iter()
            .find_map(|c| match c {
                DrawCommand::Quad(q) => Some(*q),
                _ => None,
            })
            .unwrap();
        assert_eq!(first.dest, WorldRect::square(0.0, 0.0, 80.0));
        assert_eq!(first.tile, grid.get(TileCoord::new(0, 0)).unwrap());
    }
}

mod fps {
    use super::*;

    #[test]
    fn title_only_after_one_second() {
        let geometry = GridGeometry::new(16, 4, 4, 2).unwrap();
        let grid = TileGrid::generate(4, 4, 4, 0).unwrap();
        let mut r = renderer(geometry, StaticAtlasLoader::ok(solid_atlas(32)));
        let mut drawer = RecordingDrawer::new();
        let mut title = RecordingTitle::new();
        let t = ViewTransform::default();
        let t0 = Instant::now();
        let viewport = ViewportSize::new(64, 64);

        for i in 0..10 {
            let report = r.render(
                &mut drawer,
                &mut title,
                input(&grid, &t, viewport, None, t0 + Duration::from_millis(i * 100)),
            );
            assert_eq!(report.fps, None);
        }
        assert!(title.titles().is_empty());

        let report = r.render(
            &mut drawer,
            &mut title,
            input(&grid, &t, viewport, None, t0 + Duration::from_millis(1_000)),
        );
        assert_eq!(report.fps, Some(11));
        assert_eq!(title.titles(), &["Tilemap Viewer - FPS: 11".to_string()]);
    }
}
