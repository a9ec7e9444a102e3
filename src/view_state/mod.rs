//! View-state layer - transform, culling, hit-testing and scroll sync
//!
//! Everything here is pure: no terminal, no I/O. All four components agree
//! on one screen→world mapping, [`ViewTransform::screen_to_world`].
//!
//! # Module Structure
//!
//! - `types`: Core value types (ScreenPoint, WorldPoint, TileCoord, ViewportSize, GridGeometry)
//! - `transform`: ViewTransform - pan offset + clamped zoom
//! - `visible_range`: VisibleRange - result of culling
//! - `culler`: ViewportCuller - visible tile rectangle and LOD step
//! - `hit_test`: HoverPicker - tile under the pointer
//! - `scroll`: ScrollSync - transform ⇄ scrollbar parameters

pub mod culler;
pub mod scroll;
pub mod transform;
pub mod types;
pub mod visible_range;

pub use culler::{InvalidLodThreshold, ViewportCuller};
pub use hit_test::HoverPicker;
pub use scroll::{Axis, ScrollRange, ScrollRanges, ScrollSync};
pub use transform::{InvalidZoomLimits, TransformError, ViewTransform, ZoomLimits};
pub use types::{
    Affine2, GridGeometry, InvalidGeometry, ScreenPoint, TileCoord, ViewportSize, WorldPoint,
    WorldRect,
};
pub use visible_range::VisibleRange;
