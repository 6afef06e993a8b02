//! Closed numeric intervals and rescaling.
//!
//! Controllers work on normalized values while environments work in
//! physical units; `DoubleRange` converts between the two.

use serde::{Deserialize, Serialize};

use super::error::{SimError, SimResult};

/// A closed interval `[min, max]` over `f64`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DoubleRange {
    min: f64,
    max: f64,
}

impl DoubleRange {
    /// The unit interval `[0, 1]`.
    pub const UNIT: DoubleRange = DoubleRange { min: 0.0, max: 1.0 };

    /// The symmetric interval `[-1, 1]`.
    pub const SYMMETRIC_UNIT: DoubleRange = DoubleRange { min: -1.0, max: 1.0 };

    /// Create a new range.
    ///
    /// Panics if `min > max` or either bound is NaN. Use [`DoubleRange::try_new`]
    /// for values coming from configuration.
    #[must_use]
    pub fn new(min: f64, max: f64) -> Self {
        assert!(min <= max, "Range minimum must not exceed maximum");
        Self { min, max }
    }

    /// Create a new range, failing on inverted or NaN bounds.
    pub fn try_new(min: f64, max: f64) -> SimResult<Self> {
        if min <= max {
            Ok(Self { min, max })
        } else {
            Err(SimError::InvalidRange { min, max })
        }
    }

    /// A degenerate range containing a single value.
    #[must_use]
    pub const fn point(value: f64) -> Self {
        Self { min: value, max: value }
    }

    #[must_use]
    pub const fn min(&self) -> f64 {
        self.min
    }

    #[must_use]
    pub const fn max(&self) -> f64 {
        self.max
    }

    /// Width of the interval.
    #[must_use]
    pub fn extent(&self) -> f64 {
        self.max - self.min
    }

    #[must_use]
    pub fn center(&self) -> f64 {
        (self.min + self.max) / 2.0
    }

    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value into the range.
    #[must_use]
    pub fn clip(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Map a value of this range to `[0, 1]`.
    ///
    /// A degenerate range maps everything to 0.5.
    #[must_use]
    pub fn normalize(&self, value: f64) -> f64 {
        let extent = self.extent();
        if extent <= 0.0 {
            return 0.5;
        }
        (value - self.min) / extent
    }

    /// Map a value of `[0, 1]` into this range.
    #[must_use]
    pub fn denormalize(&self, value: f64) -> f64 {
        self.min + value * self.extent()
    }

    /// Linearly map `value` from this range into `target`, clipping the result.
    #[must_use]
    pub fn rescale(&self, value: f64, target: DoubleRange) -> f64 {
        target.clip(target.denormalize(self.normalize(value)))
    }
}

impl Default for DoubleRange {
    fn default() -> Self {
        Self::UNIT
    }
}

impl std::fmt::Display for DoubleRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
