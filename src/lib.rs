//! Tilemap Viewer (tmv)
//!
//! Interactive terminal viewer for very large uniform tile grids, with
//! pan, zoom, pointer hover and scrollbar navigation.
//!
//! Follows a Pure Core / Impure Shell split: `view_state`, `render`,
//! `state` and `model` do no I/O; `view`, `atlas`, `logging` and the
//! binary own the terminal, the filesystem and the log file.

pub mod atlas;
pub mod config;
pub mod logging;
pub mod model;
pub mod render;
pub mod state;
pub mod view;
pub mod view_state;

#[cfg(test)]
mod tests;
