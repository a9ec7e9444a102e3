//! Frame rendering against abstract drawing capabilities.
//!
//! # Module Structure
//!
//! - `drawer`: QuadDrawer / AtlasLoader / WindowTitle capabilities
//! - `frame`: FrameRenderer - per-frame orchestration
//! - `stats`: FrameStats - FPS counter
//! - `recording`: Recording stubs for tests and benchmarks

pub mod drawer;
pub mod frame;
pub mod recording;
pub mod stats;

pub use drawer::{AtlasLoader, QuadDrawer, Rgb, TexturedQuad, WindowTitle};
pub use frame::{FrameInput, FrameRenderer, FrameReport, RenderStatus};
pub use stats::FrameStats;
