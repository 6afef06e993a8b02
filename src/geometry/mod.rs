//! Geometry kernel: points, segments, circles and rectangles.
//!
//! Everything here is an immutable value type. Degenerate inputs (parallel
//! or zero-length segments) produce "no intersection" rather than errors so
//! per-step physics stays total over numeric inputs.

pub mod circle;
pub mod point;
pub mod rectangle;
pub mod segment;

pub use circle::Circle;
pub use point::Point;
pub use rectangle::Rectangle;
pub use segment::Segment;

/// Tolerance used by intersection tests unless a caller supplies its own.
pub const DEFAULT_PRECISION: f64 = 1e-6;

/// Wrap an angle into `(-π, π]`.
#[must_use]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};

    let wrapped = angle.rem_euclid(TAU);
    if wrapped > PI {
        wrapped - TAU
    } else {
        wrapped
    }
}
