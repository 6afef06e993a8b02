//! Point robot navigation.
//!
//! A simplified robot: no sensors, no heading-relative motion. The velocity
//! vector is capped in norm, and a move is blocked outright when it would
//! cross a wall or end within `collision_block` of one. Standing still is
//! never a collision.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::navigation::{nearest_hit, NavigationState};
use super::Environment;
use crate::arena::NavigationArena;
use crate::core::{check_action_size, DoubleRange, SimResult, SimRng};
use crate::geometry::{Point, Segment, DEFAULT_PRECISION};

/// Point navigation configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PointNavigationConfig {
    /// Maximum distance per step; also caps the norm of the velocity.
    pub max_speed: f64,

    /// Moves ending closer than this to a wall are blocked.
    pub collision_block: f64,

    pub rescale_observations: bool,

    pub observation_range: DoubleRange,

    pub precision: f64,
}

impl Default for PointNavigationConfig {
    fn default() -> Self {
        Self {
            max_speed: 0.01,
            collision_block: 0.001,
            rescale_observations: true,
            observation_range: DoubleRange::UNIT,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl PointNavigationConfig {
    #[must_use]
    pub fn with_max_speed(mut self, speed: f64) -> Self {
        self.max_speed = speed;
        self
    }

    #[must_use]
    pub fn with_collision_block(mut self, margin: f64) -> Self {
        self.collision_block = margin;
        self
    }

    #[must_use]
    pub fn with_rescaling(mut self, rescale: bool) -> Self {
        self.rescale_observations = rescale;
        self
    }
}

/// Point robot in a navigation arena.
///
/// Observation: robot `(x, y)` followed by target `(x, y)`.
#[derive(Clone, Debug)]
pub struct PointNavigationEnvironment {
    arena: Arc<NavigationArena>,
    config: PointNavigationConfig,
    rng: SimRng,
    state: NavigationState,
}

impl PointNavigationEnvironment {
    /// Create an environment and reset it.
    pub fn new(arena: Arc<NavigationArena>, config: PointNavigationConfig, seed: u64) -> Self {
        let mut env = Self {
            arena,
            config,
            rng: SimRng::new(seed),
            state: NavigationState {
                robot_position: Point::origin(),
                robot_previous_position: Point::origin(),
                robot_heading: 0.0,
                target_position: Point::origin(),
                collided: false,
            },
        };
        env.reset();
        env
    }

    #[must_use]
    pub fn arena(&self) -> &Arc<NavigationArena> {
        &self.arena
    }

    fn blocked(&self, movement: &Segment) -> bool {
        if movement.length() == 0.0 {
            return false;
        }
        nearest_hit(self.arena.arena(), movement, self.config.precision).is_some()
            || self
                .arena
                .segments()
                .any(|wall| wall.distance_to_point(movement.p2) < self.config.collision_block)
    }

    fn observe(&self) -> Vec<f64> {
        let robot = self.state.robot_position;
        let target = self.state.target_position;
        let raw = [robot.x, robot.y, target.x, target.y];
        if !self.config.rescale_observations {
            return raw.to_vec();
        }

        let xs = DoubleRange::new(0.0, self.arena.x_extent());
        let ys = DoubleRange::new(0.0, self.arena.y_extent());
        let range = self.config.observation_range;
        vec![
            xs.rescale(raw[0], range),
            ys.rescale(raw[1], range),
            xs.rescale(raw[2], range),
            ys.rescale(raw[3], range),
        ]
    }
}

impl Environment for PointNavigationEnvironment {
    type Observation = Vec<f64>;
    type Action = Vec<f64>;
    type State = NavigationState;

    fn reset(&mut self) {
        self.rng.reseed();
        let start = self.arena.sample_start(&mut self.rng);
        let target = self.arena.sample_target(&mut self.rng);
        self.state = NavigationState {
            robot_position: start,
            robot_previous_position: start,
            robot_heading: 0.0,
            target_position: target,
            collided: false,
        };
    }

    fn step(&mut self, t: f64, action: &Vec<f64>) -> SimResult<Vec<f64>> {
        check_action_size(action, 2)?;

        let unit = DoubleRange::SYMMETRIC_UNIT;
        let mut velocity = Point::new(unit.clip(action[0]), unit.clip(action[1])) * self.config.max_speed;
        let speed = velocity.magnitude();
        if speed > self.config.max_speed {
            velocity = velocity * (self.config.max_speed / speed);
        }

        let old = self.state.robot_position;
        let movement = Segment::new(old, old + velocity);
        self.state.robot_previous_position = old;
        if speed > 0.0 {
            self.state.robot_heading = velocity.direction();
        }

        if self.blocked(&movement) {
            tracing::trace!(t, "point robot blocked");
            self.state.collided = true;
        } else {
            self.state.collided = false;
            self.state.robot_position = movement.p2;
        }

        Ok(self.observe())
    }

    fn state(&self) -> NavigationState {
        self.state
    }

    fn default_action(&self) -> Vec<f64> {
        vec![0.0, 0.0]
    }
}
