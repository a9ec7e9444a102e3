//! Snapshot tests for the rendered terminal frame
//!
//! Uses insta + ratatui TestBackend. Canvas cells are reduced to one letter
//! per colour so the snapshots show what tile landed where.

use crate::config::keybindings::KeyBindings;
use crate::model::atlas::Atlas;
use crate::model::grid::{TileGrid, TileId};
use crate::render::drawer::AtlasLoader;
use crate::render::frame::FrameRenderer;
use crate::render::recording::StaticAtlasLoader;
use crate::state::{AppState, ViewSettings};
use crate::view::{TuiApp, ViewerParts};
use crate::view_state::culler::ViewportCuller;
use crate::view_state::transform::ZoomLimits;
use crate::view_state::types::GridGeometry;
use crossterm::event::{KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::backend::TestBackend;
use ratatui::style::Color;
use ratatui::Terminal;

// ===== Test Helpers =====

/// 4x4 atlas of 2x2 tiles: red, green / blue, white.
fn atlas() -> Atlas {
    let colours = [[255, 0, 0], [0, 255, 0], [0, 0, 255], [255, 255, 255]];
    let mut pixels = Vec::new();
    for y in 0..4u32 {
        for x in 0..4u32 {
            let [r, g, b] = colours[((y / 2) * 2 + x / 2) as usize];
            pixels.extend_from_slice(&[r, g, b, 255]);
        }
    }
    Atlas::new(4, 4, pixels).expect("valid atlas")
}

/// 4x2 grid, tiles 0..4 then 3..0.
fn parts() -> ViewerParts {
    let geometry = GridGeometry::new(2, 4, 2, 2).expect("valid geometry");
    let cells = [0, 1, 2, 3, 3, 2, 1, 0].map(TileId::new).to_vec();
    let loader: Box<dyn AtlasLoader> = Box::new(StaticAtlasLoader::ok(atlas()));
    ViewerParts {
        state: AppState::new(geometry, ZoomLimits::default(), ViewSettings::default()),
        grid: TileGrid::from_cells(4, 2, 4, cells).expect("valid grid"),
        renderer: FrameRenderer::new(
            ViewportCuller::new(geometry, 1.0).expect("valid threshold"),
            loader,
        ),
    }
}

fn app(width: u16, height: u16) -> TuiApp<TestBackend> {
    let terminal = Terminal::new(TestBackend::new(width, height)).expect("test terminal");
    TuiApp::new_for_test(terminal, parts(), KeyBindings::default())
}

fn letter(color: Color) -> char {
    match color {
        Color::Rgb(255, 0, 0) => 'R',
        Color::Rgb(0, 255, 0) => 'G',
        Color::Rgb(0, 0, 255) => 'B',
        Color::Rgb(255, 255, 255) => 'W',
        Color::Rgb(26, 26, 26) => '.',
        _ => '?',
    }
}

/// Top and bottom pixel letters for the first `columns` canvas cells of each row.
fn colour_map(app: &TuiApp<TestBackend>, columns: u16) -> String {
    let buffer = app.terminal().backend().buffer();
    let canvas = app.layout().expect("drawn").canvas;
    let mut lines = Vec::new();
    for y in canvas.top()..canvas.bottom() {
        let top: String = (0..columns).map(|x| letter(buffer[(x, y)].fg)).collect();
        let bottom: String = (0..columns).map(|x| letter(buffer[(x, y)].bg)).collect();
        lines.push(format!("{top} / {bottom}"));
    }
    lines.join("\n")
}

fn status_line(app: &TuiApp<TestBackend>) -> String {
    let buffer = app.terminal().backend().buffer();
    let y = app.layout().expect("drawn").status.y;
    (0..buffer.area.width)
        .map(|x| buffer[(x, y)].symbol())
        .collect::<String>()
        .trim_end()
        .to_string()
}

// ===== Snapshots =====

#[test]
fn snapshot_tiles_at_identity_view() {
    let mut app = app(60, 4);
    app.render_test().expect("frame renders");

    insta::assert_snapshot!(colour_map(&app, 10), @r"
    RRGGBBWW.. / RRGGBBWW..
    WWBBGGRR.. / WWBBGGRR..
    ");
    insta::assert_snapshot!(status_line(&app), @"Tilemap Viewer  zoom 100.0%  step 1  quads 8");
}

#[test]
fn snapshot_hover_outline() {
    let mut app = app(60, 4);
    app.render_test().expect("first frame sets the layout");
    // Cell (3, 1) is pixel (3, 2): tile (1, 1).
    app.handle_mouse_test(MouseEvent {
        kind: MouseEventKind::Moved,
        column: 3,
        row: 1,
        modifiers: KeyModifiers::NONE,
    });
    app.render_test().expect("frame renders");

    insta::assert_snapshot!(colour_map(&app, 10), @r"
    RRGGBBWW.. / RRGGBBWW..
    WWRRGGRR.. / WWRRGGRR..
    ");
    insta::assert_snapshot!(
        status_line(&app),
        @"Tilemap Viewer  zoom 100.0%  step 1  quads 8  tile (1, 1)"
    );
}
