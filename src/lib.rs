//! # rust-agentsim
//!
//! A time-stepped simulation engine coupling controllers ("agents") to 2D
//! physical environments and recording every step for fitness evaluation.
//!
//! ## Design Principles
//!
//! 1. **Deterministic**: All randomness comes from a seeded `SimRng` owned by
//!    the environment. A run is fully reproducible from its seed.
//!
//! 2. **Total Physics**: Parallel and zero-length segments resolve to "no
//!    intersection". Only construction-time misconfiguration and wrongly
//!    sized actions are errors.
//!
//! 3. **One Loop**: Single-agent, homogeneous two-agent and reward-threaded
//!    runs share the same stepping loop.
//!
//! ## Architecture
//!
//! - **Capability Traits**: `Environment` and `Agent` carry their observation,
//!   action and state types as associated types. Environments are composed
//!   from an arena and a configuration rather than subclassed.
//!
//! - **Shared Arenas**: Arenas are immutable and shared between environments
//!   through `Arc`.
//!
//! - **Persistent Outcomes**: Recorded steps use `im-rs` vectors, so outcomes
//!   clone in O(1) when handed to several consumers.
//!
//! ## Modules
//!
//! - `core`: Errors, RNG, numeric ranges and rescaling
//! - `geometry`: Points, segments, circles, rectangles and their intersections
//! - `arena`: Static layouts, named presets and grid construction
//! - `environment`: The `Environment` trait, navigation and paddle/ball worlds
//! - `agent`: The `Agent` traits plus baseline and linear controllers
//! - `task`: Run drivers, outcomes, stop predicates and fitness measures

pub mod core;
pub mod geometry;
pub mod arena;
pub mod environment;
pub mod agent;
pub mod task;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{DoubleRange, SimError, SimResult, SimRng};

pub use crate::geometry::{Circle, Point, Rectangle, Segment, DEFAULT_PRECISION};

pub use crate::arena::{Arena, Grid, NavigationArena, PRESET_NAMES};

pub use crate::environment::{
    CollisionResponse, Environment, NavigationConfig, NavigationEnvironment, NavigationState,
    PaddleBallConfig, PaddleBallEnvironment, PaddleBallState, PaddleState, PointNavigationConfig,
    PointNavigationEnvironment, Side, VelocityModel,
};

pub use crate::agent::{
    Activation, Agent, ConstantAgent, FnAgent, Freeze, FrozenLinearAgent, LinearAgent,
    LinearParameters, ReinforcementAgent, RewardIgnoring,
};

pub use crate::task::{
    EnvOutcome, HomogeneousPairTask, Outcome, RewardTask, SingleAgentTask, Step, TaskConfig,
    Termination,
};
