//! Recording stubs for the rendering capabilities.
//!
//! Used by tests and benchmarks to observe exactly what a frame issued
//! without a terminal.

use super::drawer::{AtlasLoader, QuadDrawer, Rgb, TexturedQuad, WindowTitle};
use crate::model::atlas::Atlas;
use crate::model::error::AtlasError;
use crate::view_state::types::{Affine2, ViewportSize, WorldRect};
use std::fmt;

/// One recorded drawer call.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// `set_projection`
    SetProjection(ViewportSize),
    /// `bind_atlas`, by size.
    BindAtlas {
        /// Atlas width.
        width: u32,
        /// Atlas height.
        height: u32,
    },
    /// `clear`
    Clear(Rgb),
    /// `push_transform`
    PushTransform(Affine2),
    /// `pop_transform`
    PopTransform,
    /// `set_texturing`
    SetTexturing(bool),
    /// `draw_textured_quad`
    Quad(TexturedQuad),
    /// `draw_outline`
    Outline(WorldRect, Rgb),
}

impl fmt::Display for DrawCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetProjection(v) => write!(f, "projection {}x{}", v.width, v.height),
            Self::BindAtlas { width, height } => write!(f, "bind_atlas {width}x{height}"),
            Self::Clear(color) => write!(f, "clear {color}"),
            Self::PushTransform(t) => write!(
                f,
                "push translate({}, {}) scale({})",
                t.offset_x, t.offset_y, t.scale
            ),
            Self::PopTransform => write!(f, "pop"),
            Self::SetTexturing(on) => write!(f, "texturing {}", if *on { "on" } else { "off" }),
            Self::Quad(q) => write!(
                f,
                "quad tile={} at ({}, {}) size {} uv ({}, {}, {}, {})",
                q.tile, q.dest.x, q.dest.y, q.dest.width, q.uv.u, q.uv.v, q.uv.du, q.uv.dv
            ),
            Self::Outline(r, color) => write!(
                f,
                "outline ({}, {}) {}x{} {color}",
                r.x, r.y, r.width, r.height
            ),
        }
    }
}

/// [`QuadDrawer`] that records every call.
#[derive(Debug, Clone, Default)]
pub struct RecordingDrawer {
    commands: Vec<DrawCommand>,
}

impl RecordingDrawer {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop recorded calls.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Number of recorded quads.
    pub fn quad_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, DrawCommand::Quad(_)))
            .count()
    }

    /// One command per line, for snapshots.
    pub fn transcript(&self) -> String {
        self.commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl QuadDrawer for RecordingDrawer {
    fn set_projection(&mut self, viewport: ViewportSize) {
        self.commands.push(DrawCommand::SetProjection(viewport));
    }

    fn bind_atlas(&mut self, atlas: &Atlas) {
        self.commands.push(DrawCommand::BindAtlas {
            width: atlas.width(),
            height: atlas.height(),
        });
    }

    fn clear(&mut self, color: Rgb) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn push_transform(&mut self, transform: Affine2) {
        self.commands.push(DrawCommand::PushTransform(transform));
    }

    fn pop_transform(&mut self) {
        self.commands.push(DrawCommand::PopTransform);
    }

    fn set_texturing(&mut self, enabled: bool) {
        self.commands.push(DrawCommand::SetTexturing(enabled));
    }

    fn draw_textured_quad(&mut self, quad: TexturedQuad) {
        self.commands.push(DrawCommand::Quad(quad));
    }

    fn draw_outline(&mut self, rect: WorldRect, color: Rgb) {
        self.commands.push(DrawCommand::Outline(rect, color));
    }
}

/// [`WindowTitle`] that keeps every title it was given.
#[derive(Debug, Clone, Default)]
pub struct RecordingTitle {
    titles: Vec<String>,
}

impl RecordingTitle {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Titles in order.
    pub fn titles(&self) -> &[String] {
        &self.titles
    }

    /// Most recent title.
    pub fn last(&self) -> Option<&str> {
        self.titles.last().map(String::as_str)
    }
}

impl WindowTitle for RecordingTitle {
    fn set_title(&mut self, title: &str) {
        self.titles.push(title.to_string());
    }
}

/// [`AtlasLoader`] returning a fixed result and counting calls.
#[derive(Debug, Clone)]
pub struct StaticAtlasLoader {
    result: Result<Atlas, AtlasError>,
    calls: usize,
}

impl StaticAtlasLoader {
    /// Loader that always succeeds with `atlas`.
    pub fn ok(atlas: Atlas) -> Self {
        Self {
            result: Ok(atlas),
            calls: 0,
        }
    }

    /// Loader that always fails with `err`.
    pub fn failing(err: AtlasError) -> Self {
        Self {
            result: Err(err),
            calls: 0,
        }
    }

    /// Number of `load` calls.
    pub fn calls(&self) -> usize {
        self.calls
    }
}

impl AtlasLoader for StaticAtlasLoader {
    fn load(&mut self) -> Result<Atlas, AtlasError> {
        self.calls += 1;
        self.result.clone()
    }
}
