//! Named arena layouts with hard-coded obstacles.
//!
//! All presets are 1 x 1. Robots start near the bottom edge (large `y`),
//! targets sit near the top edge.

use super::{Arena, NavigationArena};
use crate::core::{DoubleRange, SimError, SimResult};
use crate::geometry::{Point, Segment};

/// Keys accepted by [`Arena::preset`] and [`NavigationArena::preset`].
pub const PRESET_NAMES: &[&str] = &[
    "empty",
    "a-barrier",
    "b-barrier",
    "c-barrier",
    "u-barrier",
    "corridor",
    "two-rooms",
    "maze",
];

fn wall(x1: f64, y1: f64, x2: f64, y2: f64) -> Segment {
    Segment::new(Point::new(x1, y1), Point::new(x2, y2))
}

fn preset_obstacles(name: &str) -> Option<Vec<Segment>> {
    let obstacles = match name {
        "empty" => vec![],
        "a-barrier" => vec![wall(0.25, 0.5, 0.75, 0.5)],
        "b-barrier" => vec![wall(0.1, 0.5, 0.9, 0.5)],
        "c-barrier" => vec![
            wall(0.25, 0.5, 0.75, 0.5),
            wall(0.25, 0.5, 0.25, 0.6),
            wall(0.75, 0.5, 0.75, 0.6),
        ],
        "u-barrier" => vec![
            wall(0.25, 0.7, 0.25, 0.3),
            wall(0.25, 0.3, 0.75, 0.3),
            wall(0.75, 0.3, 0.75, 0.7),
        ],
        "corridor" => vec![wall(0.35, 0.25, 0.35, 0.75), wall(0.65, 0.25, 0.65, 0.75)],
        "two-rooms" => vec![wall(0.0, 0.5, 0.6, 0.5), wall(0.8, 0.5, 1.0, 0.5)],
        "maze" => vec![
            wall(0.0, 0.33, 0.7, 0.33),
            wall(0.3, 0.66, 1.0, 0.66),
            wall(0.5, 0.33, 0.5, 0.5),
        ],
        _ => return None,
    };
    Some(obstacles)
}

impl Arena {
    /// Look up a preset layout by name.
    pub fn preset(name: &str) -> SimResult<Self> {
        let obstacles = preset_obstacles(name).ok_or_else(|| SimError::UnknownPreset(name.to_string()))?;
        Arena::new(1.0, 1.0, obstacles)
    }
}

impl NavigationArena {
    /// Look up a preset layout by name, with the default start and target
    /// regions.
    pub fn preset(name: &str) -> SimResult<Self> {
        Ok(NavigationArena::new(
            Arena::preset(name)?,
            DoubleRange::new(0.45, 0.55),
            DoubleRange::new(0.85, 0.9),
            DoubleRange::new(0.45, 0.55),
            DoubleRange::new(0.1, 0.15),
        ))
    }
}
