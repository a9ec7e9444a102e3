//! TUI rendering and terminal management (impure shell)

pub mod canvas;
pub mod layout;
pub mod scrollbar;
pub mod title;

pub use canvas::TerminalCanvas;
pub use layout::{render_layout, StatusLine, ViewLayout};
pub use scrollbar::ScrollbarWidget;
pub use title::TerminalTitle;

use crate::atlas::{ImageAtlasLoader, ProceduralAtlasLoader};
use crate::config::keybindings::KeyBindings;
use crate::config::loader::{ConfigError, ResolvedConfig};
use crate::model::{AppError, KeyAction, TileGrid};
use crate::render::{AtlasLoader, FrameInput, FrameRenderer, FrameReport};
use crate::state::{
    handle_pointer_event, handle_scrollbar_position, handle_view_action, AppState, DragState,
    PointerButton, PointerEvent, WheelDirection,
};
use crate::view_state::culler::ViewportCuller;
use crate::view_state::scroll::Axis;
use crate::view_state::types::ScreenPoint;
use crossterm::{
    event::{
        self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::layout::{Position, Rect};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Stdout};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Application error
    #[error("Application error: {0}")]
    App(#[from] AppError),
}

/// Renderer with the atlas source chosen at startup.
pub type ViewerRenderer = FrameRenderer<Box<dyn AtlasLoader>>;

/// Everything the viewer needs besides a terminal.
pub struct ViewerParts {
    /// Interactive state.
    pub state: AppState,
    /// Tile data.
    pub grid: TileGrid,
    /// Per-frame orchestration.
    pub renderer: ViewerRenderer,
}

impl ViewerParts {
    /// Build grid, renderer and state from a resolved configuration.
    ///
    /// Generates the grid up front, so this is the expensive step of startup.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self, AppError> {
        config.validate()?;
        let geometry = config.geometry()?;

        let grid = TileGrid::generate(
            geometry.map_width(),
            geometry.map_height(),
            geometry.tile_count(),
            config.seed,
        )?;
        info!(
            width = grid.width(),
            height = grid.height(),
            tiles = grid.tile_count(),
            seed = config.seed,
            "Tile grid generated"
        );

        let culler = ViewportCuller::new(geometry, config.min_visible_pixels).map_err(|e| {
            ConfigError::Invalid {
                field: "min_visible_pixels",
                reason: e.to_string(),
            }
        })?;

        let loader: Box<dyn AtlasLoader> = match &config.tileset {
            Some(path) => Box::new(ImageAtlasLoader::new(path)),
            None => Box::new(ProceduralAtlasLoader::new(geometry)),
        };

        Ok(Self {
            state: AppState::new(geometry, config.zoom_limits()?, config.view_settings()),
            grid,
            renderer: FrameRenderer::new(culler, loader),
        })
    }
}

/// Translate a crossterm mouse event into a pointer event on `canvas`.
///
/// Column `c`, row `r` maps to screen pixel `(c, 2r)` relative to the
/// canvas origin.
pub fn translate_mouse(mouse: MouseEvent, canvas: Rect) -> Option<PointerEvent> {
    let at = ScreenPoint::new(
        f64::from(mouse.column) - f64::from(canvas.x),
        (f64::from(mouse.row) - f64::from(canvas.y)) * 2.0,
    );
    let button = |b: MouseButton| match b {
        MouseButton::Left => PointerButton::Left,
        MouseButton::Right => PointerButton::Right,
        MouseButton::Middle => PointerButton::Middle,
    };
    match mouse.kind {
        MouseEventKind::Down(b) => Some(PointerEvent::Down { at, button: button(b) }),
        MouseEventKind::Drag(b) => Some(PointerEvent::Drag { at, button: button(b) }),
        MouseEventKind::Up(b) => Some(PointerEvent::Up { at, button: button(b) }),
        MouseEventKind::Moved => Some(PointerEvent::Move { at }),
        MouseEventKind::ScrollUp => Some(PointerEvent::Wheel {
            at,
            direction: WheelDirection::Up,
        }),
        MouseEventKind::ScrollDown => Some(PointerEvent::Wheel {
            at,
            direction: WheelDirection::Down,
        }),
        _ => None,
    }
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    terminal: Terminal<B>,
    state: AppState,
    grid: TileGrid,
    renderer: ViewerRenderer,
    canvas: TerminalCanvas,
    title: TerminalTitle,
    key_bindings: KeyBindings,
    frame_interval: Duration,
    /// Areas of the last drawn frame (for mouse hit detection)
    layout: Option<ViewLayout>,
    /// Scrollbar currently captured by a left-button drag
    scroll_drag: Option<Axis>,
    last_report: Option<FrameReport>,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Create and initialize a new TUI application
    ///
    /// Sets up terminal in raw mode with alternate screen and mouse capture
    pub fn new(
        parts: ViewerParts,
        key_bindings: KeyBindings,
        frame_interval: Duration,
    ) -> Result<Self, TuiError> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(crossterm::event::EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        Ok(Self::assemble(
            terminal,
            parts,
            key_bindings,
            frame_interval,
            TerminalTitle::attached(),
        ))
    }

    /// Run the main event loop
    ///
    /// Redraws once per frame interval and after every input event.
    /// Returns when user quits (q, Esc or Ctrl+C)
    pub fn run(&mut self) -> Result<(), TuiError> {
        self.draw()?;

        loop {
            if event::poll(self.frame_interval)? {
                match event::read()? {
                    Event::Key(key) => {
                        if self.handle_key(key) {
                            return Ok(());
                        }
                    }
                    Event::Mouse(mouse) => self.handle_mouse(mouse),
                    Event::Resize(width, height) => {
                        // Layout and projection follow on the next draw
                        debug!(width, height, "Terminal resized");
                    }
                    _ => {}
                }
            }
            self.draw()?;
        }
    }
}

impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    fn assemble(
        terminal: Terminal<B>,
        parts: ViewerParts,
        key_bindings: KeyBindings,
        frame_interval: Duration,
        title: TerminalTitle,
    ) -> Self {
        let canvas = TerminalCanvas::new(parts.renderer.geometry());
        Self {
            terminal,
            state: parts.state,
            grid: parts.grid,
            renderer: parts.renderer,
            canvas,
            title,
            key_bindings,
            frame_interval,
            layout: None,
            scroll_drag: None,
            last_report: None,
        }
    }

    /// Handle a single keyboard event
    ///
    /// Returns true if app should quit
    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.kind == KeyEventKind::Release {
            return false;
        }

        // Bindings are keyed on press events; repeats count as presses.
        let Some(action) = self
            .key_bindings
            .get(KeyEvent::new(key.code, key.modifiers))
        else {
            return false;
        };

        if action == KeyAction::Quit {
            return true;
        }

        self.state = handle_view_action(self.state.clone(), action);
        false
    }

    /// Handle a single mouse event
    ///
    /// Scrollbar presses capture the pointer until release; everything else
    /// on the canvas becomes a pointer event.
    fn handle_mouse(&mut self, mouse: MouseEvent) {
        let Some(layout) = self.layout else {
            return;
        };

        if let Some(axis) = self.scroll_drag {
            match mouse.kind {
                MouseEventKind::Drag(MouseButton::Left) => {
                    self.scroll_to(layout.scrollbar(axis), mouse.column, mouse.row);
                    return;
                }
                MouseEventKind::Up(_) => {
                    self.scroll_drag = None;
                    return;
                }
                _ => {}
            }
        }

        if mouse.kind == MouseEventKind::Down(MouseButton::Left) {
            if let Some(bar) = layout.scrollbar_at(mouse.column, mouse.row) {
                self.scroll_drag = Some(bar.axis());
                self.scroll_to(bar, mouse.column, mouse.row);
                return;
            }
        }

        let on_canvas = layout
            .canvas
            .contains(Position::new(mouse.column, mouse.row));
        let dragging = matches!(self.state.drag, DragState::Dragging { .. });
        if !on_canvas && !dragging {
            if mouse.kind == MouseEventKind::Moved {
                self.state.hover = None;
            }
            return;
        }

        if let Some(event) = translate_mouse(mouse, layout.canvas) {
            self.state = handle_pointer_event(self.state.clone(), event);
        }
    }

    fn scroll_to(&mut self, bar: ScrollbarWidget, column: u16, row: u16) {
        let axis = bar.axis();
        let range = self.state.scrollbars.get(axis);
        let position = bar.position_at(column, row, &range);
        self.state = handle_scrollbar_position(self.state.clone(), axis, position);
    }

    /// Render the current frame
    ///
    /// Recomputes the layout, follows viewport changes, runs the frame
    /// renderer into the canvas, then hands the result to the terminal.
    fn draw(&mut self) -> Result<(), TuiError> {
        let size = self.terminal.size()?;
        let layout = ViewLayout::compute(Rect::new(0, 0, size.width, size.height));
        let viewport = layout.viewport();
        if self.state.viewport() != viewport {
            self.state.set_viewport(viewport);
        }
        self.layout = Some(layout);

        let report = self.renderer.render(
            &mut self.canvas,
            &mut self.title,
            FrameInput {
                grid: &self.grid,
                transform: &self.state.transform,
                viewport,
                hover: self.state.hover,
                now: Instant::now(),
            },
        );
        self.last_report = Some(report);

        let status = StatusLine {
            title: self.title.current(),
            zoom: self.state.transform.zoom(),
            hover: self.state.hover,
            report: Some(report),
            diagnostic: self.renderer.diagnostic(),
        };
        let canvas = &self.canvas;
        let scrollbars = &self.state.scrollbars;
        self.terminal.draw(|frame| {
            render_layout(frame, &layout, canvas, scrollbars, status);
        })?;

        Ok(())
    }
}

// ===== Test Helpers =====
//
// The following methods are ONLY for testing and benchmarking within the crate.
// They are gated with cfg to ensure they're not accessible from outside the crate.

#[cfg(any(test, feature = "bench-internals"))]
#[allow(dead_code)] // Not all helpers used in every context (tests vs benchmarks)
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for testing without touching the real terminal.
    pub(crate) fn new_for_test(
        terminal: Terminal<B>,
        parts: ViewerParts,
        key_bindings: KeyBindings,
    ) -> Self {
        Self::assemble(
            terminal,
            parts,
            key_bindings,
            Duration::from_millis(16),
            TerminalTitle::detached(),
        )
    }

    /// Current state (test-only accessor)
    pub(crate) fn app_state(&self) -> &AppState {
        &self.state
    }

    /// Frame renderer (test-only accessor)
    pub(crate) fn renderer(&self) -> &ViewerRenderer {
        &self.renderer
    }

    /// Report from the most recent draw (test-only accessor)
    pub(crate) fn last_report(&self) -> Option<FrameReport> {
        self.last_report
    }

    /// Layout of the most recent draw (test-only accessor)
    pub(crate) fn layout(&self) -> Option<ViewLayout> {
        self.layout
    }

    /// Handle a single keyboard event (test-only accessor)
    ///
    /// Returns true if app should quit.
    pub(crate) fn handle_key_test(&mut self, key: KeyEvent) -> bool {
        self.handle_key(key)
    }

    /// Handle a single mouse event (test-only accessor)
    pub(crate) fn handle_mouse_test(&mut self, mouse: MouseEvent) {
        self.handle_mouse(mouse)
    }

    /// Render a single frame (test-only accessor)
    pub(crate) fn render_test(&mut self) -> Result<(), TuiError> {
        self.draw()
    }

    /// Terminal (test-only accessor)
    pub(crate) fn terminal(&self) -> &Terminal<B> {
        &self.terminal
    }
}

// ===== Benchmark Helpers =====

#[cfg(feature = "bench-internals")]
impl<B> TuiApp<B>
where
    B: ratatui::backend::Backend,
{
    /// Create TuiApp for benchmarking (benchmark-only constructor)
    pub fn new_for_bench(
        terminal: Terminal<B>,
        parts: ViewerParts,
        key_bindings: KeyBindings,
    ) -> Self {
        Self::new_for_test(terminal, parts, key_bindings)
    }

    /// Handle a single mouse event (benchmark-only accessor)
    pub fn handle_mouse_bench(&mut self, mouse: MouseEvent) {
        self.handle_mouse_test(mouse)
    }

    /// Handle a single keyboard event (benchmark-only accessor)
    pub fn handle_key_bench(&mut self, key: KeyEvent) -> bool {
        self.handle_key_test(key)
    }

    /// Render a single frame (benchmark-only accessor)
    pub fn render_bench(&mut self) -> Result<(), TuiError> {
        self.render_test()
    }
}

/// Initialize and run the TUI application
///
/// Builds the grid and renderer from `config`, sets up the terminal, runs
/// the event loop, and restores the terminal even when the loop fails.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run(config: &ResolvedConfig) -> Result<(), TuiError> {
    let parts = ViewerParts::from_config(config)?;
    let mut app = TuiApp::new(parts, KeyBindings::default(), config.frame_interval())?;

    let result = app.run();

    // Always restore terminal state
    restore_terminal()?;

    result
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
pub fn restore_terminal() -> Result<(), TuiError> {
    disable_raw_mode()?;
    io::stdout().execute(crossterm::event::DisableMouseCapture)?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}
