//! Error types for the tilemap viewer.
//!
//! Hierarchical taxonomy built with `thiserror`. Domain errors convert into
//! [`AppError`] via `From`, so startup code composes with `?`.
//!
//! # Error Hierarchy
//!
//! - [`AppError`] - Top-level error returned from `main`
//!   - [`ConfigError`] - Config file read/parse/validation failures
//!   - [`LoggingError`] - Log file setup failures
//!   - [`GridError`] - Grid construction failures
//!   - `std::io::Error` - Terminal failures
//!
//! # Recovery Strategy
//!
//! [`AtlasError`] is deliberately absent from `AppError`: a missing or
//! corrupt tileset disables rendering but does not stop the viewer.

use crate::config::loader::ConfigError;
use crate::logging::LoggingError;
use crate::view_state::types::InvalidGeometry;
use std::path::PathBuf;
use thiserror::Error;

/// Top-level application error.
///
/// Everything here is fatal: the terminal is restored and the message is
/// written to stderr.
#[derive(Debug, Error)]
pub enum AppError {
    /// Configuration could not be loaded or is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Log file could not be set up.
    #[error("Logging error: {0}")]
    Logging(#[from] LoggingError),

    /// Grid could not be built.
    #[error("Grid error: {0}")]
    Grid(#[from] GridError),

    /// Terminal or TUI rendering error.
    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Errors building a [`TileGrid`](crate::model::grid::TileGrid).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// Width or height was zero.
    #[error("Grid dimensions must be >= 1 (got {width}x{height})")]
    ZeroDimension {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Tile id range was empty.
    #[error("Tile count must be >= 1")]
    NoTiles,

    /// Supplied cell buffer does not match `width * height`.
    #[error("Expected {expected} cells, got {actual}")]
    CellCountMismatch {
        /// `width * height`.
        expected: usize,
        /// Length of the supplied buffer.
        actual: usize,
    },

    /// A cell references a tile outside the tileset.
    #[error("Tile id {id} at ({x}, {y}) is out of range (tile count {tile_count})")]
    TileOutOfRange {
        /// Column of the offending cell.
        x: u32,
        /// Row of the offending cell.
        y: u32,
        /// The stored id.
        id: u32,
        /// Number of tiles in the tileset.
        tile_count: u32,
    },

    /// Geometry itself was invalid.
    #[error("Invalid geometry: {0}")]
    Geometry(#[from] InvalidGeometry),
}

/// Errors loading the tileset atlas.
///
/// Recoverable: the renderer logs it once and shows it as a diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AtlasError {
    /// Tileset file does not exist.
    #[error("Tileset not found: {path}")]
    NotFound {
        /// Path that was tried.
        path: PathBuf,
    },

    /// File exists but could not be decoded as an image.
    #[error("Failed to decode tileset {path}: {reason}")]
    Decode {
        /// Path that failed.
        path: PathBuf,
        /// Decoder message.
        reason: String,
    },

    /// Image is smaller than `tiles_per_row * tile_size` on some side.
    #[error("Tileset is {width}x{height}px, need at least {required}x{required}px")]
    TooSmall {
        /// Actual width.
        width: u32,
        /// Actual height.
        height: u32,
        /// Minimum side length.
        required: u32,
    },

    /// Pixel buffer length does not equal `width * height * 4`.
    #[error("Pixel buffer has {actual} bytes, expected {expected}")]
    PixelBufferMismatch {
        /// Expected byte count.
        expected: usize,
        /// Actual byte count.
        actual: usize,
    },
}
