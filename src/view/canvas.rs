//! Half-block terminal canvas.
//!
//! A [`QuadDrawer`] that rasterizes into an RGB pixel buffer. Each terminal
//! cell shows two vertically stacked pixels with the `▀` glyph: foreground
//! is the upper pixel, background the lower one.

use crate::model::atlas::Atlas;
use crate::model::grid::TileId;
use crate::render::drawer::{QuadDrawer, Rgb, TexturedQuad};
use crate::view_state::types::{Affine2, GridGeometry, ViewportSize, WorldPoint, WorldRect};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

/// Glyph used for every canvas cell.
pub const HALF_BLOCK: &str = "▀";

/// Colour used for untextured quads.
const UNTEXTURED: Rgb = Rgb::new(255, 255, 255);

/// Screen-space pixel span `[start, end)` covered by an edge interval.
///
/// A pixel is covered when its centre lies inside the interval, so adjacent
/// quads share no pixel and leave no gap.
fn covered_span(start: f64, end: f64, limit: u32) -> Option<(u32, u32)> {
    let first = (start - 0.5).ceil().max(0.0);
    let last = (end - 0.5).ceil().min(f64::from(limit));
    if first >= last {
        return None;
    }
    Some((first as u32, last as u32))
}

/// Software rasterizer behind the grid view.
#[derive(Debug, Clone)]
pub struct TerminalCanvas {
    geometry: GridGeometry,
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
    current: Affine2,
    stack: Vec<Affine2>,
    texturing: bool,
    tile_colours: Vec<Rgb>,
}

impl TerminalCanvas {
    /// Empty canvas for tiles described by `geometry`.
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            width: 0,
            height: 0,
            pixels: Vec::new(),
            current: Affine2::IDENTITY,
            stack: Vec::new(),
            texturing: true,
            tile_colours: Vec::new(),
        }
    }

    /// Pixel size of the projection.
    pub fn size(&self) -> ViewportSize {
        ViewportSize::new(self.width, self.height)
    }

    /// Colour at pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// Whether an atlas has been bound.
    pub fn has_atlas(&self) -> bool {
        !self.tile_colours.is_empty()
    }

    /// Copy the pixels into `buf` at `area`, two pixel rows per cell row.
    pub fn blit(&self, buf: &mut Buffer, area: Rect) {
        let area = area.intersection(buf.area);
        for row in 0..area.height {
            for col in 0..area.width {
                let x = u32::from(col);
                let y = u32::from(row) * 2;
                let top = self.pixel(x, y).unwrap_or(Rgb::BACKGROUND);
                let bottom = self.pixel(x, y + 1).unwrap_or(Rgb::BACKGROUND);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(HALF_BLOCK)
                        .set_fg(to_color(top))
                        .set_bg(to_color(bottom));
                }
            }
        }
    }

    fn fill(&mut self, x0: u32, x1: u32, y0: u32, y1: u32, colour: Rgb) {
        let stride = self.width as usize;
        for y in y0..y1 {
            let row = y as usize * stride;
            if let Some(span) = self.pixels.get_mut(row + x0 as usize..row + x1 as usize) {
                span.fill(colour);
            }
        }
    }

    fn to_screen(&self, rect: WorldRect) -> (f64, f64, f64, f64) {
        let top_left = self.current.apply(WorldPoint::new(rect.x, rect.y));
        let bottom_right = self.current.apply(WorldPoint::new(rect.right(), rect.bottom()));
        (top_left.x, top_left.y, bottom_right.x, bottom_right.y)
    }

    fn tile_colour(&self, quad: &TexturedQuad) -> Rgb {
        if !self.texturing {
            return UNTEXTURED;
        }
        self.tile_colours
            .get(quad.tile.get() as usize)
            .copied()
            .unwrap_or(UNTEXTURED)
    }
}

fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.r, rgb.g, rgb.b)
}

impl QuadDrawer for TerminalCanvas {
    fn set_projection(&mut self, viewport: ViewportSize) {
        self.width = viewport.width;
        self.height = viewport.height;
        self.pixels = vec![Rgb::BACKGROUND; viewport.width as usize * viewport.height as usize];
        self.current = Affine2::IDENTITY;
        self.stack.clear();
    }

    fn bind_atlas(&mut self, atlas: &Atlas) {
        // One flat colour per tile: a terminal pixel is far coarser than a texel.
        self.tile_colours = (0..self.geometry.tile_count())
            .map(|i| {
                let uv = atlas.uv_for(TileId::new(i), &self.geometry);
                Rgb::from(atlas.average_rgb(uv))
            })
            .collect();
    }

    fn clear(&mut self, color: Rgb) {
        self.pixels.fill(color);
    }

    fn push_transform(&mut self, transform: Affine2) {
        self.stack.push(self.current);
        self.current = self.current.then_inner(transform);
    }

    fn pop_transform(&mut self) {
        self.current = self.stack.pop().unwrap_or(Affine2::IDENTITY);
    }

    fn set_texturing(&mut self, enabled: bool) {
        self.texturing = enabled;
    }

    fn draw_textured_quad(&mut self, quad: TexturedQuad) {
        let colour = self.tile_colour(&quad);
        let (sx0, sy0, sx1, sy1) = self.to_screen(quad.dest);
        let (Some((x0, x1)), Some((y0, y1))) = (
            covered_span(sx0, sx1, self.width),
            covered_span(sy0, sy1, self.height),
        ) else {
            return;
        };
        self.fill(x0, x1, y0, y1, colour);
    }

    fn draw_outline(&mut self, rect: WorldRect, color: Rgb) {
        let (sx0, sy0, sx1, sy1) = self.to_screen(rect);
        // Edges are one pixel thick and always at least one pixel long.
        let left = sx0.floor();
        let top = sy0.floor();
        let right = (sx1.ceil() - 1.0).max(left);
        let bottom = (sy1.ceil() - 1.0).max(top);

        let w = f64::from(self.width);
        let h = f64::from(self.height);
        if right < 0.0 || bottom < 0.0 || left >= w || top >= h {
            return;
        }

        let cx0 = left.max(0.0) as u32;
        let cx1 = (right + 1.0).min(w) as u32;
        let cy0 = top.max(0.0) as u32;
        let cy1 = (bottom + 1.0).min(h) as u32;

        if top >= 0.0 {
            self.fill(cx0, cx1, top as u32, top as u32 + 1, color);
        }
        if bottom < h {
            self.fill(cx0, cx1, bottom as u32, bottom as u32 + 1, color);
        }
        if left >= 0.0 {
            self.fill(left as u32, left as u32 + 1, cy0, cy1, color);
        }
        if right < w {
            self.fill(right as u32, right as u32 + 1, cy0, cy1, color);
        }
    }
}
