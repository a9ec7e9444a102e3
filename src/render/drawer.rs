//! Rendering capabilities the frame renderer draws against.
//!
//! The renderer never talks to a terminal or GPU directly. It issues calls
//! on a [`QuadDrawer`], loads the atlas through an [`AtlasLoader`] and
//! reports FPS through a [`WindowTitle`]. The TUI and the test recorder
//! implement these.

use crate::model::atlas::{Atlas, UvRect};
use crate::model::error::AtlasError;
use crate::model::grid::TileId;
use crate::view_state::types::{Affine2, ViewportSize, WorldRect};
use std::fmt;

/// 8-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
}

impl Rgb {
    /// Frame clear colour, 0.1 grey.
    pub const BACKGROUND: Self = Self::new(26, 26, 26);

    /// Hover outline colour.
    pub const HOVER: Self = Self::new(255, 0, 0);

    /// Create a colour.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// One textured quad in world space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TexturedQuad {
    /// Destination rectangle, before the pushed transform is applied.
    pub dest: WorldRect,
    /// Source rectangle in the bound atlas.
    pub uv: UvRect,
    /// Tile the UV rectangle was derived from.
    pub tile: TileId,
}

/// Immediate-mode 2-D drawing backend.
///
/// Calls arrive in frame order. Texturing starts enabled.
pub trait QuadDrawer {
    /// Set up an orthographic projection for a viewport, origin top-left.
    fn set_projection(&mut self, viewport: ViewportSize);

    /// Make `atlas` the texture sampled by subsequent quads.
    fn bind_atlas(&mut self, atlas: &Atlas);

    /// Fill the whole frame with `color`.
    fn clear(&mut self, color: Rgb);

    /// Push a world→screen transform.
    fn push_transform(&mut self, transform: Affine2);

    /// Pop the last pushed transform.
    fn pop_transform(&mut self);

    /// Toggle texture sampling.
    fn set_texturing(&mut self, enabled: bool);

    /// Draw one textured quad under the current transform.
    fn draw_textured_quad(&mut self, quad: TexturedQuad);

    /// Draw a one-pixel rectangle outline under the current transform.
    fn draw_outline(&mut self, rect: WorldRect, color: Rgb);
}

/// Source of the tileset atlas.
pub trait AtlasLoader {
    /// Decode the atlas. Called once, on the first frame.
    fn load(&mut self) -> Result<Atlas, AtlasError>;
}

impl<T: AtlasLoader + ?Sized> AtlasLoader for Box<T> {
    fn load(&mut self) -> Result<Atlas, AtlasError> {
        (**self).load()
    }
}

/// Sink for the window title (FPS readout).
pub trait WindowTitle {
    /// Replace the title.
    fn set_title(&mut self, title: &str);
}
