//! Error type shared by every construction and stepping operation.

use thiserror::Error;

/// Errors raised by the simulation engine.
///
/// Construction errors are configuration mistakes and are not worth
/// retrying. `ActionSize` aborts the run that produced it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    #[error("circle radius must be positive, got {0}")]
    NonPositiveRadius(f64),
    #[error("rectangle corners are inconsistent: top-left ({0}, {1}), bottom-right ({2}, {3})")]
    InvalidRectangle(f64, f64, f64, f64),
    #[error("arena extents must be positive, got {0} x {1}")]
    InvalidExtent(f64, f64),
    #[error("unknown grid symbol {symbol:?} at ({x}, {y})")]
    UnknownGridSymbol { symbol: char, x: usize, y: usize },
    #[error("grid must contain exactly one start cell, found {0}")]
    StartCellCount(usize),
    #[error("grid must contain exactly one target cell, found {0}")]
    TargetCellCount(usize),
    #[error("grid is empty")]
    EmptyGrid,
    #[error("grid row {row} has length {len}, expected {expected}")]
    RaggedGrid { row: usize, len: usize, expected: usize },
    #[error("unknown arena preset {0:?}")]
    UnknownPreset(String),
    #[error("invalid range [{min}, {max}]")]
    InvalidRange { min: f64, max: f64 },
    #[error("time step must be positive, got {0}")]
    InvalidTimeStep(f64),
    #[error("action has {actual} elements, expected {expected}")]
    ActionSize { expected: usize, actual: usize },
    #[error("outcome encoding failed: {0}")]
    Encode(String),
}

/// Result alias used throughout the crate.
pub type SimResult<T> = Result<T, SimError>;

/// Fail with `ActionSize` unless `action` has exactly `expected` elements.
pub fn check_action_size(action: &[f64], expected: usize) -> SimResult<()> {
    if action.len() == expected {
        Ok(())
    } else {
        Err(SimError::ActionSize {
            expected,
            actual: action.len(),
        })
    }
}
