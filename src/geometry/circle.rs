//! Circles and circle/segment intersection.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Point, Segment};
use crate::core::{SimError, SimResult};

/// A circle with strictly positive radius.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    center: Point,
    radius: f64,
}

impl Circle {
    /// Create a circle; fails unless `radius > 0`.
    pub fn new(center: Point, radius: f64) -> SimResult<Self> {
        if radius > 0.0 {
            Ok(Self { center, radius })
        } else {
            Err(SimError::NonPositiveRadius(radius))
        }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    #[must_use]
    pub fn radius(&self) -> f64 {
        self.radius
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }

    /// Points where the segment crosses the circle boundary.
    ///
    /// Substitutes `p1 + t (p2 - p1)` into the circle equation and keeps the
    /// real roots with `t` in `[0, 1]`, ordered by distance from `p1`.
    #[must_use]
    pub fn intersections(&self, segment: &Segment) -> SmallVec<[Point; 2]> {
        let mut points = SmallVec::new();

        let d = segment.p2 - segment.p1;
        let f = segment.p1 - self.center;
        let a = d.dot(d);
        if a == 0.0 {
            return points;
        }
        let b = 2.0 * f.dot(d);
        let c = f.dot(f) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || !discriminant.is_finite() {
            return points;
        }

        let root = discriminant.sqrt();
        let t1 = (-b - root) / (2.0 * a);
        let t2 = (-b + root) / (2.0 * a);

        if (0.0..=1.0).contains(&t1) {
            points.push(segment.point_at(t1));
        }
        if discriminant > 0.0 && (0.0..=1.0).contains(&t2) {
            points.push(segment.point_at(t2));
        }
        points
    }
}
