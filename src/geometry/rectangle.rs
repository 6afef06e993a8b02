//! Axis-aligned rectangles.
//!
//! Coordinates follow grid row order: `y` grows downwards, so the top-left
//! corner holds the minimum of both axes.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{Point, Segment};
use crate::core::{SimError, SimResult};

/// An axis-aligned rectangle with positive area.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    top_left: Point,
    bottom_right: Point,
}

impl Rectangle {
    /// Create a rectangle; fails unless `top_left` is strictly above and to
    /// the left of `bottom_right`.
    pub fn new(top_left: Point, bottom_right: Point) -> SimResult<Self> {
        if top_left.x < bottom_right.x && top_left.y < bottom_right.y {
            Ok(Self { top_left, bottom_right })
        } else {
            Err(SimError::InvalidRectangle(
                top_left.x,
                top_left.y,
                bottom_right.x,
                bottom_right.y,
            ))
        }
    }

    /// Rectangle of the given size centered on `center`.
    pub fn centered(center: Point, width: f64, height: f64) -> SimResult<Self> {
        Self::new(
            center.translate(-width / 2.0, -height / 2.0),
            center.translate(width / 2.0, height / 2.0),
        )
    }

    #[must_use]
    pub fn top_left(&self) -> Point {
        self.top_left
    }

    #[must_use]
    pub fn bottom_right(&self) -> Point {
        self.bottom_right
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.bottom_right.x - self.top_left.x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.bottom_right.y - self.top_left.y
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(
            (self.top_left.x + self.bottom_right.x) / 2.0,
            (self.top_left.y + self.bottom_right.y) / 2.0,
        )
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.top_left.x
            && point.x <= self.bottom_right.x
            && point.y >= self.top_left.y
            && point.y <= self.bottom_right.y
    }

    /// The four edges: top, right, bottom, left.
    #[must_use]
    pub fn edges(&self) -> [Segment; 4] {
        let tl = self.top_left;
        let br = self.bottom_right;
        let tr = Point::new(br.x, tl.y);
        let bl = Point::new(tl.x, br.y);
        [
            Segment::new(tl, tr),
            Segment::new(tr, br),
            Segment::new(br, bl),
            Segment::new(bl, tl),
        ]
    }

    /// Hits of `segment` against the edges, nearest to `segment.p1` first.
    ///
    /// A segment through a corner reports that corner once.
    #[must_use]
    pub fn intersections(&self, segment: &Segment, precision: f64) -> SmallVec<[Point; 4]> {
        let mut hits: SmallVec<[Point; 4]> = SmallVec::new();
        if segment.length() == 0.0 {
            return hits;
        }

        for edge in self.edges() {
            if let Some(p) = segment.intersection(&edge, precision) {
                if hits.iter().all(|h| h.distance(p) > precision) {
                    hits.push(p);
                }
            }
        }

        hits.sort_by(|a, b| segment.p1.distance(*a).total_cmp(&segment.p1.distance(*b)));
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::DEFAULT_PRECISION;

    fn unit_square() -> Rectangle {
        Rectangle::new(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap()
    }

    #[test]
    fn test_rejects_inconsistent_corners() {
        assert!(Rectangle::new(Point::new(1.0, 0.0), Point::new(0.0, 1.0)).is_err());
        assert!(Rectangle::new(Point::new(0.0, 1.0), Point::new(1.0, 0.0)).is_err());
        assert!(Rectangle::new(Point::new(0.0, 0.0), Point::new(0.0, 1.0)).is_err());
    }

    #[test]
    fn test_edges_form_closed_loop() {
        let edges = unit_square().edges();
        for i in 0..4 {
            assert_eq!(edges[i].p2, edges[(i + 1) % 4].p1);
        }
        let perimeter: f64 = edges.iter().map(Segment::length).sum();
        assert_eq!(perimeter, 4.0);
    }

    #[test]
    fn test_segment_crossing_two_edges() {
        let s = Segment::new(Point::new(-1.0, 0.5), Point::new(2.0, 0.5));
        let hits = unit_square().intersections(&s, DEFAULT_PRECISION);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance(Point::new(0.0, 0.5)) < 1e-9);
        assert!(hits[1].distance(Point::new(1.0, 0.5)) < 1e-9);
    }

    #[test]
    fn test_segment_from_inside() {
        let s = Segment::new(Point::new(0.5, 0.5), Point::new(0.5, 3.0));
        let hits = unit_square().intersections(&s, DEFAULT_PRECISION);
        assert_eq!(hits.len(), 1);
        assert!(hits[0].distance(Point::new(0.5, 1.0)) < 1e-9);
    }

    #[test]
    fn test_diagonal_through_corners() {
        let s = Segment::new(Point::new(-1.0, -1.0), Point::new(2.0, 2.0));
        let hits = unit_square().intersections(&s, DEFAULT_PRECISION);
        assert_eq!(hits.len(), 2);
        assert!(hits[0].distance(Point::new(0.0, 0.0)) < 1e-9);
    }

    #[test]
    fn test_degenerate_segment() {
        let s = Segment::new(Point::new(0.0, 0.5), Point::new(0.0, 0.5));
        assert!(unit_square().intersections(&s, DEFAULT_PRECISION).is_empty());
    }

    #[test]
    fn test_centered() {
        let r = Rectangle::centered(Point::new(1.0, 1.0), 2.0, 1.0).unwrap();
        assert_eq!(r.top_left(), Point::new(0.0, 0.5));
        assert_eq!(r.width(), 2.0);
        assert_eq!(r.height(), 1.0);
        assert!(r.contains(Point::new(1.5, 1.2)));
    }
}
