//! Line segments and segment/segment intersection.

use serde::{Deserialize, Serialize};

use super::Point;

/// A straight segment between two points.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    #[must_use]
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    /// Angle of the vector `p2 - p1`.
    #[must_use]
    pub fn direction(&self) -> f64 {
        (self.p2 - self.p1).direction()
    }

    #[must_use]
    pub fn length(&self) -> f64 {
        self.p1.distance(self.p2)
    }

    /// Point at parameter `t`, where 0 is `p1` and 1 is `p2`.
    #[must_use]
    pub fn point_at(&self, t: f64) -> Point {
        self.p1 + (self.p2 - self.p1) * t
    }

    /// Shortest distance from `point` to any point of the segment.
    #[must_use]
    pub fn distance_to_point(&self, point: Point) -> f64 {
        let d = self.p2 - self.p1;
        let len2 = d.dot(d);
        if len2 == 0.0 {
            return self.p1.distance(point);
        }
        let t = ((point - self.p1).dot(d) / len2).clamp(0.0, 1.0);
        self.point_at(t).distance(point)
    }

    /// Intersection point of two segments.
    ///
    /// Solves the 2x2 system of the two supporting lines with Cramer's rule.
    /// Parallel, coincident and zero-length segments have no intersection.
    /// The solution must fall inside both bounding boxes, each inflated by
    /// `precision / 2` per side.
    #[must_use]
    pub fn intersection(&self, other: &Segment, precision: f64) -> Option<Point> {
        let a1 = self.p2.y - self.p1.y;
        let b1 = self.p1.x - self.p2.x;
        let c1 = a1 * self.p1.x + b1 * self.p1.y;

        let a2 = other.p2.y - other.p1.y;
        let b2 = other.p1.x - other.p2.x;
        let c2 = a2 * other.p1.x + b2 * other.p1.y;

        let det = a1 * b2 - a2 * b1;
        if det == 0.0 || !det.is_finite() {
            return None;
        }

        let candidate = Point::new((b2 * c1 - b1 * c2) / det, (a1 * c2 - a2 * c1) / det);
        if self.bounds_contain(candidate, precision) && other.bounds_contain(candidate, precision) {
            Some(candidate)
        } else {
            None
        }
    }

    /// Whether the two segments intersect.
    #[must_use]
    pub fn intersects(&self, other: &Segment, precision: f64) -> bool {
        self.intersection(other, precision).is_some()
    }

    fn bounds_contain(&self, point: Point, precision: f64) -> bool {
        let half = precision / 2.0;
        let (min_x, max_x) = min_max(self.p1.x, self.p2.x);
        let (min_y, max_y) = min_max(self.p1.y, self.p2.y);
        point.x >= min_x - half
            && point.x <= max_x + half
            && point.y >= min_y - half
            && point.y <= max_y + half
    }
}

fn min_max(a: f64, b: f64) -> (f64, f64) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
