//! Static arena layouts.

use serde::{Deserialize, Serialize};

use crate::core::{DoubleRange, SimError, SimResult, SimRng};
use crate::geometry::{Point, Segment};

/// Immutable static layout: rectangular extents plus obstacle segments.
///
/// Share between environments as `Arc<Arena>`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    x_extent: f64,
    y_extent: f64,
    obstacles: Vec<Segment>,
}

impl Arena {
    /// Create an arena; fails unless both extents are positive.
    pub fn new(x_extent: f64, y_extent: f64, obstacles: Vec<Segment>) -> SimResult<Self> {
        if x_extent > 0.0 && y_extent > 0.0 {
            Ok(Self {
                x_extent,
                y_extent,
                obstacles,
            })
        } else {
            Err(SimError::InvalidExtent(x_extent, y_extent))
        }
    }

    /// An arena with no obstacles.
    pub fn empty(x_extent: f64, y_extent: f64) -> SimResult<Self> {
        Self::new(x_extent, y_extent, Vec::new())
    }

    #[must_use]
    pub fn x_extent(&self) -> f64 {
        self.x_extent
    }

    #[must_use]
    pub fn y_extent(&self) -> f64 {
        self.y_extent
    }

    #[must_use]
    pub fn obstacles(&self) -> &[Segment] {
        &self.obstacles
    }

    /// Length of the arena diagonal, the largest possible in-arena distance.
    #[must_use]
    pub fn diagonal(&self) -> f64 {
        self.x_extent.hypot(self.y_extent)
    }

    /// The four boundary walls, a closed loop around `[0, x] x [0, y]`.
    #[must_use]
    pub fn boundaries(&self) -> [Segment; 4] {
        let (x, y) = (self.x_extent, self.y_extent);
        [
            Segment::new(Point::new(0.0, 0.0), Point::new(x, 0.0)),
            Segment::new(Point::new(x, 0.0), Point::new(x, y)),
            Segment::new(Point::new(x, y), Point::new(0.0, y)),
            Segment::new(Point::new(0.0, y), Point::new(0.0, 0.0)),
        ]
    }

    /// Boundaries followed by obstacles.
    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.boundaries()
            .into_iter()
            .chain(self.obstacles.iter().copied())
    }

    /// Whether `point` lies inside the extents (boundary included).
    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        (0.0..=self.x_extent).contains(&point.x) && (0.0..=self.y_extent).contains(&point.y)
    }
}

/// An arena with the regions robots start in and targets are placed in.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationArena {
    arena: Arena,
    pub start_x: DoubleRange,
    pub start_y: DoubleRange,
    pub target_x: DoubleRange,
    pub target_y: DoubleRange,
}

impl NavigationArena {
    #[must_use]
    pub fn new(
        arena: Arena,
        start_x: DoubleRange,
        start_y: DoubleRange,
        target_x: DoubleRange,
        target_y: DoubleRange,
    ) -> Self {
        Self {
            arena,
            start_x,
            start_y,
            target_x,
            target_y,
        }
    }

    /// Arena with a fixed start and a fixed target position.
    #[must_use]
    pub fn with_fixed_positions(arena: Arena, start: Point, target: Point) -> Self {
        Self::new(
            arena,
            DoubleRange::point(start.x),
            DoubleRange::point(start.y),
            DoubleRange::point(target.x),
            DoubleRange::point(target.y),
        )
    }

    #[must_use]
    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    /// Draw a start position from the start region.
    pub fn sample_start(&self, rng: &mut SimRng) -> Point {
        Point::new(rng.gen_in(self.start_x), rng.gen_in(self.start_y))
    }

    /// Draw a target position from the target region.
    pub fn sample_target(&self, rng: &mut SimRng) -> Point {
        Point::new(rng.gen_in(self.target_x), rng.gen_in(self.target_y))
    }
}

impl std::ops::Deref for NavigationArena {
    type Target = Arena;

    fn deref(&self) -> &Arena {
        &self.arena
    }
}
