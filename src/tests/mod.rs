//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive `TuiApp` through its crate-private test hooks and
//! check the pure core end to end.

mod scenarios;
mod view_snapshots;
