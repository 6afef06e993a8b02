//! Core engine types: errors, deterministic RNG, numeric ranges.
//!
//! These are shared by every other module and know nothing about
//! geometry, arenas or environments.

pub mod error;
pub mod range;
pub mod rng;

pub use error::{check_action_size, SimError, SimResult};
pub use range::DoubleRange;
pub use rng::SimRng;
