//! Per-frame orchestration.

use super::drawer::{AtlasLoader, QuadDrawer, Rgb, TexturedQuad, WindowTitle};
use super::stats::FrameStats;
use crate::model::atlas::Atlas;
use crate::model::error::AtlasError;
use crate::model::grid::TileGrid;
use crate::view_state::culler::ViewportCuller;
use crate::view_state::transform::ViewTransform;
use crate::view_state::types::{GridGeometry, TileCoord, ViewportSize, WorldRect};
use crate::view_state::visible_range::VisibleRange;
use std::time::Instant;
use tracing::{debug, error, info, trace};

/// Everything one frame reads.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput<'a> {
    /// Tile ids.
    pub grid: &'a TileGrid,
    /// Current pan/zoom.
    pub transform: &'a ViewTransform,
    /// Drawable area in screen pixels.
    pub viewport: ViewportSize,
    /// Tile under the pointer, from the last pointer-move.
    pub hover: Option<TileCoord>,
    /// Frame timestamp for FPS accounting.
    pub now: Instant,
}

/// Whether tiles were drawn this frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Normal frame.
    Drawn,
    /// Atlas failed to load; only the clear was issued.
    Disabled,
}

/// What a frame did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameReport {
    /// Culled range used this frame (empty when disabled).
    pub range: VisibleRange,
    /// Number of textured quads issued.
    pub drawn_quads: u64,
    /// FPS value if a report fell due this frame.
    pub fps: Option<u32>,
    /// Drawn or disabled.
    pub status: RenderStatus,
}

#[derive(Debug)]
enum AtlasState {
    Pending,
    Ready(Atlas),
    Failed(AtlasError),
}

/// Draws the grid, hover outline and FPS title each frame.
///
/// Owns the atlas once loaded, the frame counter and the last projection.
#[derive(Debug)]
pub struct FrameRenderer<L> {
    culler: ViewportCuller,
    loader: L,
    atlas: AtlasState,
    projection: Option<ViewportSize>,
    stats: FrameStats,
}

impl<L: AtlasLoader> FrameRenderer<L> {
    /// Create a renderer; the atlas loads lazily on the first frame.
    pub fn new(culler: ViewportCuller, loader: L) -> Self {
        Self {
            culler,
            loader,
            atlas: AtlasState::Pending,
            projection: None,
            stats: FrameStats::new(),
        }
    }

    /// Grid geometry used for quad placement.
    pub fn geometry(&self) -> GridGeometry {
        self.culler.geometry()
    }

    /// The culler driving this renderer.
    pub fn culler(&self) -> &ViewportCuller {
        &self.culler
    }

    /// Atlas load failure, if any.
    pub fn diagnostic(&self) -> Option<&AtlasError> {
        match &self.atlas {
            AtlasState::Failed(err) => Some(err),
            _ => None,
        }
    }

    /// The loaded atlas, if any.
    pub fn atlas(&self) -> Option<&Atlas> {
        match &self.atlas {
            AtlasState::Ready(atlas) => Some(atlas),
            _ => None,
        }
    }

    /// Render one frame.
    pub fn render<D, T>(&mut self, drawer: &mut D, title: &mut T, input: FrameInput<'_>) -> FrameReport
    where
        D: QuadDrawer + ?Sized,
        T: WindowTitle + ?Sized,
    {
        if self.projection != Some(input.viewport) {
            if let Some(previous) = self.projection {
                debug!(
                    from = ?previous,
                    to = ?input.viewport,
                    "Viewport resized, resetting projection"
                );
            }
            drawer.set_projection(input.viewport);
            self.projection = Some(input.viewport);
        }

        if matches!(self.atlas, AtlasState::Pending) {
            self.atlas = self.load_atlas(drawer);
        }

        drawer.clear(Rgb::BACKGROUND);

        let (range, drawn_quads, status) = match &self.atlas {
            AtlasState::Ready(atlas) => {
                let (range, drawn) = self.draw_scene(drawer, atlas, &input);
                (range, drawn, RenderStatus::Drawn)
            }
            _ => (VisibleRange::empty(), 0, RenderStatus::Disabled),
        };

        let fps = self.stats.record_frame(input.now);
        if let Some(fps) = fps {
            trace!(fps, "FPS report");
            title.set_title(&format!("Tilemap Viewer - FPS: {fps}"));
        }

        FrameReport {
            range,
            drawn_quads,
            fps,
            status,
        }
    }

    fn load_atlas<D: QuadDrawer + ?Sized>(&mut self, drawer: &mut D) -> AtlasState {
        let geometry = self.culler.geometry();
        let loaded = self
            .loader
            .load()
            .and_then(|atlas| atlas.validate_for(&geometry).map(|()| atlas));
        match loaded {
            Ok(atlas) => {
                info!(
                    width = atlas.width(),
                    height = atlas.height(),
                    "Tileset atlas loaded"
                );
                drawer.bind_atlas(&atlas);
                AtlasState::Ready(atlas)
            }
            Err(err) => {
                error!(error = %err, "Tileset atlas failed to load, rendering disabled");
                AtlasState::Failed(err)
            }
        }
    }

    fn draw_scene<D: QuadDrawer + ?Sized>(
        &self,
        drawer: &mut D,
        atlas: &Atlas,
        input: &FrameInput<'_>,
    ) -> (VisibleRange, u64) {
        let geometry = self.culler.geometry();
        let tile = f64::from(geometry.tile_size());

        drawer.push_transform(input.transform.affine());

        let range = self.culler.visible_range(input.transform, input.viewport);
        let block = tile * f64::from(range.step);
        let mut drawn = 0u64;
        for cell in range.cells() {
            let Some(id) = input.grid.get(cell) else {
                continue;
            };
            drawer.draw_textured_quad(TexturedQuad {
                dest: WorldRect::square(f64::from(cell.x) * tile, f64::from(cell.y) * tile, block),
                uv: atlas.uv_for(id, &geometry),
                tile: id,
            });
            drawn += 1;
        }

        if let Some(hover) = input.hover {
            drawer.set_texturing(false);
            drawer.draw_outline(
                WorldRect::square(f64::from(hover.x) * tile, f64::from(hover.y) * tile, tile),
                Rgb::HOVER,
            );
            drawer.set_texturing(true);
        }

        drawer.pop_transform();
        (range, drawn)
    }
}

#[cfg(test)]
#[path = "frame_tests.rs"]
mod tests;
