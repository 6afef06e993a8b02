//! Robot navigation with ranging sensors.
//!
//! The robot moves inside a `NavigationArena`. Each step the action is
//! denormalized into a displacement (and, for the relative model, a turn);
//! the movement segment is tested against every arena segment, and a move
//! that would cross a wall is blocked or clamped.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::Environment;
use crate::arena::{Arena, NavigationArena};
use crate::core::{check_action_size, DoubleRange, SimResult, SimRng};
use crate::geometry::{normalize_angle, Point, Segment, DEFAULT_PRECISION};

/// How the action vector is turned into motion.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityModel {
    /// Action is `(vx, vy)` in arena coordinates.
    Absolute,
    /// Action is `(forward, turn)` relative to the current heading.
    Relative,
}

/// What happens when a move would cross a wall.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionResponse {
    /// Stay at the previous position.
    Block,
    /// Stop at the nearest collision point, backed off by the precision.
    Clamp,
}

/// Navigation environment configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Sensor directions relative to the heading, in radians.
    pub sensor_angles: Vec<f64>,

    /// Maximum distance a sensor can report.
    pub sensor_range: f64,

    /// Append bearing and distance to the target to the observation.
    pub sense_target: bool,

    /// Distance covered per step at full action.
    pub max_speed: f64,

    /// Heading change per step at full turn action (relative model only).
    pub max_turn: f64,

    pub velocity_model: VelocityModel,

    pub collision_response: CollisionResponse,

    /// Rescale observations into `observation_range`.
    pub rescale_observations: bool,

    pub observation_range: DoubleRange,

    /// Intersection tolerance.
    pub precision: f64,

    /// Heading after reset. `None` draws it uniformly.
    pub initial_heading: Option<f64>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            sensor_angles: vec![-FRAC_PI_2, -FRAC_PI_4, 0.0, FRAC_PI_4, FRAC_PI_2],
            sensor_range: 0.5,
            sense_target: true,
            max_speed: 0.01,
            max_turn: PI / 8.0,
            velocity_model: VelocityModel::Absolute,
            collision_response: CollisionResponse::Block,
            rescale_observations: true,
            observation_range: DoubleRange::UNIT,
            precision: DEFAULT_PRECISION,
            initial_heading: None,
        }
    }
}

impl NavigationConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_sensor_angles(mut self, angles: Vec<f64>) -> Self {
        self.sensor_angles = angles;
        self
    }

    #[must_use]
    pub fn with_sensor_range(mut self, range: f64) -> Self {
        self.sensor_range = range;
        self
    }

    #[must_use]
    pub fn with_sense_target(mut self, sense: bool) -> Self {
        self.sense_target = sense;
        self
    }

    #[must_use]
    pub fn with_max_speed(mut self, speed: f64) -> Self {
        self.max_speed = speed;
        self
    }

    #[must_use]
    pub fn with_max_turn(mut self, turn: f64) -> Self {
        self.max_turn = turn;
        self
    }

    #[must_use]
    pub fn with_velocity_model(mut self, model: VelocityModel) -> Self {
        self.velocity_model = model;
        self
    }

    #[must_use]
    pub fn with_collision_response(mut self, response: CollisionResponse) -> Self {
        self.collision_response = response;
        self
    }

    #[must_use]
    pub fn with_rescaling(mut self, rescale: bool) -> Self {
        self.rescale_observations = rescale;
        self
    }

    #[must_use]
    pub fn with_observation_range(mut self, range: DoubleRange) -> Self {
        self.observation_range = range;
        self
    }

    #[must_use]
    pub fn with_initial_heading(mut self, heading: f64) -> Self {
        self.initial_heading = Some(heading);
        self
    }

    /// Number of observation channels.
    #[must_use]
    pub fn observation_size(&self) -> usize {
        self.sensor_angles.len() + if self.sense_target { 2 } else { 0 }
    }
}

/// Snapshot of a navigation run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    pub robot_position: Point,
    pub robot_previous_position: Point,
    pub robot_heading: f64,
    pub target_position: Point,
    /// Whether the last step hit a wall.
    pub collided: bool,
}

impl NavigationState {
    fn at(start: Point, heading: f64, target: Point) -> Self {
        Self {
            robot_position: start,
            robot_previous_position: start,
            robot_heading: heading,
            target_position: target,
            collided: false,
        }
    }

    #[must_use]
    pub fn distance_to_target(&self) -> f64 {
        self.robot_position.distance(self.target_position)
    }
}

/// Nearest intersection of `movement` with any arena segment, measured from
/// `movement.p1`.
///
/// A wall the movement starts within `precision` of does not count when the
/// movement leaves it, so a robot resting against a wall can always back away.
pub(crate) fn nearest_hit(arena: &Arena, movement: &Segment, precision: f64) -> Option<Point> {
    arena
        .segments()
        .filter_map(|wall| {
            let hit = movement.intersection(&wall, precision)?;
            let touching = movement.p1.distance(hit) <= precision;
            (!(touching && departs_from(movement, &wall))).then_some(hit)
        })
        .min_by(|a, b| movement.p1.distance(*a).total_cmp(&movement.p1.distance(*b)))
}

/// Whether `movement` ends further from the line through `wall` than it starts,
/// on the same side.
fn departs_from(movement: &Segment, wall: &Segment) -> bool {
    let along = wall.p2 - wall.p1;
    let normal = Point::new(-along.y, along.x);
    let side = (movement.p1 - wall.p1).dot(normal);
    let motion = (movement.p2 - movement.p1).dot(normal);
    side * motion > 0.0
}

/// Robot with ranging sensors in a navigation arena.
#[derive(Clone, Debug)]
pub struct NavigationEnvironment {
    arena: Arc<NavigationArena>,
    config: NavigationConfig,
    rng: SimRng,
    state: NavigationState,
}

impl NavigationEnvironment {
    /// Create an environment and reset it.
    pub fn new(arena: Arc<NavigationArena>, config: NavigationConfig, seed: u64) -> Self {
        let placeholder = NavigationState::at(Point::origin(), 0.0, Point::origin());
        let mut env = Self {
            arena,
            config,
            rng: SimRng::new(seed),
            state: placeholder,
        };
        env.reset();
        env
    }

    #[must_use]
    pub fn arena(&self) -> &Arc<NavigationArena> {
        &self.arena
    }

    #[must_use]
    pub fn config(&self) -> &NavigationConfig {
        &self.config
    }

    fn displacement(&self, action: &[f64]) -> (Point, f64) {
        let a0 = DoubleRange::SYMMETRIC_UNIT.clip(action[0]);
        let a1 = DoubleRange::SYMMETRIC_UNIT.clip(action[1]);
        let heading = self.state.robot_heading;

        match self.config.velocity_model {
            VelocityModel::Absolute => {
                let displacement = Point::new(a0, a1) * self.config.max_speed;
                let heading = if displacement.magnitude() > 0.0 {
                    displacement.direction()
                } else {
                    heading
                };
                (displacement, heading)
            }
            VelocityModel::Relative => {
                let heading = normalize_angle(heading + a1 * self.config.max_turn);
                (Point::from_polar(heading, a0 * self.config.max_speed), heading)
            }
        }
    }

    /// Distance reading of each sensor, unscaled.
    #[must_use]
    pub fn sensor_readings(&self) -> Vec<f64> {
        let position = self.state.robot_position;
        let range = self.config.sensor_range;
        self.config
            .sensor_angles
            .iter()
            .map(|angle| {
                let ray_end = position + Point::from_polar(self.state.robot_heading + angle, range);
                let ray = Segment::new(position, ray_end);
                nearest_hit(self.arena.arena(), &ray, self.config.precision)
                    .map_or(range, |hit| position.distance(hit).min(range))
            })
            .collect()
    }

    fn observe(&self) -> Vec<f64> {
        let config = &self.config;
        let target = &config.observation_range;
        let rescale = |value: f64, from: DoubleRange| {
            if config.rescale_observations {
                from.rescale(value, *target)
            } else {
                value
            }
        };

        let sensor_range = DoubleRange::new(0.0, config.sensor_range);
        let mut observation: Vec<f64> = self
            .sensor_readings()
            .into_iter()
            .map(|d| rescale(d, sensor_range))
            .collect();

        if config.sense_target {
            let to_target = self.state.target_position - self.state.robot_position;
            let bearing = normalize_angle(to_target.direction() - self.state.robot_heading);
            observation.push(rescale(bearing, DoubleRange::new(-PI, PI)));
            observation.push(rescale(
                to_target.magnitude(),
                DoubleRange::new(0.0, self.arena.diagonal()),
            ));
        }
        observation
    }
}

impl Environment for NavigationEnvironment {
    type Observation = Vec<f64>;
    type Action = Vec<f64>;
    type State = NavigationState;

    fn reset(&mut self) {
        self.rng.reseed();
        let start = self.arena.sample_start(&mut self.rng);
        let target = self.arena.sample_target(&mut self.rng);
        let heading = match self.config.initial_heading {
            Some(heading) => heading,
            None => self.rng.gen_in(DoubleRange::new(-PI, PI)),
        };
        self.state = NavigationState::at(start, heading, target);
    }

    fn step(&mut self, t: f64, action: &Vec<f64>) -> SimResult<Vec<f64>> {
        check_action_size(action, 2)?;

        let (displacement, heading) = self.displacement(action);
        let old = self.state.robot_position;
        let movement = Segment::new(old, old + displacement);

        self.state.robot_previous_position = old;
        self.state.robot_heading = heading;

        match nearest_hit(self.arena.arena(), &movement, self.config.precision) {
            Some(hit) => {
                tracing::trace!(t, x = hit.x, y = hit.y, "robot hit a wall");
                self.state.collided = true;
                self.state.robot_position = match self.config.collision_response {
                    CollisionResponse::Block => old,
                    CollisionResponse::Clamp => {
                        let travelled = old.distance(hit);
                        if travelled <= self.config.precision {
                            old
                        } else {
                            movement.point_at((travelled - self.config.precision) / movement.length())
                        }
                    }
                };
            }
            None => {
                self.state.collided = false;
                self.state.robot_position = movement.p2;
            }
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
