//! Arenas: static 2D layouts of boundary and obstacle segments.
//!
//! - `Arena`: extents plus obstacles, immutable once built
//! - `NavigationArena`: an arena with start and target regions
//! - presets: hard-coded layouts looked up by name
//! - grid: construction from a cell grid by merging obstacle runs

pub mod arena;
pub mod grid;
pub mod presets;

pub use arena::{Arena, NavigationArena};
pub use grid::{Grid, EMPTY_CELL, OBSTACLE_CELL, START_CELL, TARGET_CELL};
pub use presets::PRESET_NAMES;
