//! Domain model types (pure).
//!
//! All types in this module are pure data with smart constructors.

pub mod atlas;
pub mod error;
pub mod grid;
pub mod key_action;

// Re-export for convenience
pub use atlas::{Atlas, UvRect};
pub use error::{AppError, AtlasError, GridError};
pub use grid::{TileGrid, TileId};
pub use key_action::KeyAction;
