//! Two paddles and a ball in a bounding box.
//!
//! Each step the paddles move first, then the ball travels `velocity * dt`,
//! where `dt` is the time since the previous step. The first step after a
//! reset has `dt = 0`, as does any step repeated at the same time, so a task's
//! first recorded step (taken at `t_min` right after priming) shows the ball
//! where it was served.
//! Of everything the travel segment crosses (either paddle face, the top or
//! the bottom edge) only the hit nearest to the ball's starting position is
//! resolved; the ball stops at that point with its velocity reflected. A hit
//! only counts while the ball moves towards the object, so a ball resting on
//! a face it just bounced off is not hit again.
//!
//! If nothing is hit and the ball has left the box horizontally, the
//! opposite paddle scores and the ball is served again from the center.

use std::f64::consts::FRAC_PI_4;

use serde::{Deserialize, Serialize};

use super::Environment;
use crate::core::{check_action_size, DoubleRange, SimResult, SimRng};
use crate::geometry::{Point, Segment, DEFAULT_PRECISION};

/// Which side of the box a paddle guards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    #[must_use]
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// Paddle/ball configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaddleBallConfig {
    /// Box width (x extent).
    pub width: f64,

    /// Box height (y extent).
    pub height: f64,

    pub paddle_length: f64,

    /// Distance of each paddle face from its side of the box.
    pub paddle_width: f64,

    /// Paddle displacement per step at full action.
    pub max_delta: f64,

    /// Serve speed before any point is scored.
    pub base_speed: f64,

    /// Hard cap on ball speed.
    pub max_speed: f64,

    /// Serve speed grows by this factor per point scored.
    pub acceleration: f64,

    /// Serve direction range in radians, measured from the +x axis.
    pub serve_angle_range: DoubleRange,

    /// Vertical nudge per unit of impact offset from the paddle center.
    /// Zero disables it.
    pub spin: f64,

    /// Speed factor applied on every paddle hit. One disables it.
    pub hit_speedup: f64,

    pub rescale_observations: bool,

    pub observation_range: DoubleRange,

    pub precision: f64,
}

impl Default for PaddleBallConfig {
    fn default() -> Self {
        Self {
            width: 2.0,
            height: 1.0,
            paddle_length: 0.2,
            paddle_width: 0.05,
            max_delta: 0.05,
            base_speed: 0.5,
            max_speed: 0.8,
            acceleration: 1.05,
            serve_angle_range: DoubleRange::new(-FRAC_PI_4, FRAC_PI_4),
            spin: 0.0,
            hit_speedup: 1.0,
            rescale_observations: true,
            observation_range: DoubleRange::UNIT,
            precision: DEFAULT_PRECISION,
        }
    }
}

impl PaddleBallConfig {
    #[must_use]
    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    #[must_use]
    pub fn with_paddle_length(mut self, length: f64) -> Self {
        self.paddle_length = length;
        self
    }

    #[must_use]
    pub fn with_max_delta(mut self, delta: f64) -> Self {
        self.max_delta = delta;
        self
    }

    #[must_use]
    pub fn with_speeds(mut self, base: f64, max: f64) -> Self {
        self.base_speed = base;
        self.max_speed = max;
        self
    }

    #[must_use]
    pub fn with_acceleration(mut self, factor: f64) -> Self {
        self.acceleration = factor;
        self
    }

    #[must_use]
    pub fn with_serve_angle_range(mut self, range: DoubleRange) -> Self {
        self.serve_angle_range = range;
        self
    }

    #[must_use]
    pub fn with_spin(mut self, spin: f64) -> Self {
        self.spin = spin;
        self
    }

    #[must_use]
    pub fn with_hit_speedup(mut self, factor: f64) -> Self {
        self.hit_speedup = factor;
        self
    }

    #[must_use]
    pub fn with_rescaling(mut self, rescale: bool) -> Self {
        self.rescale_observations = rescale;
        self
    }

    /// Number of observation channels per paddle.
    #[must_use]
    pub fn observation_size(&self) -> usize {
        6
    }
}

/// Per-paddle state.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaddleState {
    pub center_y: f64,
    /// Ball hits on this paddle.
    pub collisions: u32,
    pub score: u32,
    pub side: Side,
}

impl PaddleState {
    fn new(side: Side, center_y: f64) -> Self {
        Self {
            center_y,
            collisions: 0,
            score: 0,
            side,
        }
    }
}

/// Snapshot of a paddle/ball run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PaddleBallState {
    pub left: PaddleState,
    pub right: PaddleState,
    pub ball_position: Point,
    pub ball_velocity: Point,
}

impl PaddleBallState {
    #[must_use]
    pub fn paddle(&self, side: Side) -> &PaddleState {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn paddle_mut(&mut self, side: Side) -> &mut PaddleState {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Points scored by both paddles.
    #[must_use]
    pub fn total_score(&self) -> u32 {
        self.left.score + self.right.score
    }

    #[must_use]
    pub fn ball_speed(&self) -> f64 {
        self.ball_velocity.magnitude()
    }
}

/// Objects the ball can hit, in tie-break order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Obstacle {
    Paddle(Side),
    Top,
    Bottom,
}

/// Two-paddle ball environment. Observations and actions come in
/// `(left, right)` pairs.
#[derive(Clone, Debug)]
pub struct PaddleBallEnvironment {
    config: PaddleBallConfig,
    rng: SimRng,
    state: PaddleBallState,
    last_time: Option<f64>,
}

impl PaddleBallEnvironment {
    /// Create an environment and reset it.
    pub fn new(config: PaddleBallConfig, seed: u64) -> Self {
        let center = Point::new(config.width / 2.0, config.height / 2.0);
        let mut env = Self {
            state: PaddleBallState {
                left: PaddleState::new(Side::Left, center.y),
                right: PaddleState::new(Side::Right, center.y),
                ball_position: center,
                ball_velocity: Point::origin(),
            },
            config,
            rng: SimRng::new(seed),
            last_time: None,
        };
        env.reset();
        env
    }

    #[must_use]
    pub fn config(&self) -> &PaddleBallConfig {
        &self.config
    }

    fn face_x(&self, side: Side) -> f64 {
        match side {
            Side::Left => self.config.paddle_width,
            Side::Right => self.config.width - self.config.paddle_width,
        }
    }

    fn face(&self, side: Side) -> Segment {
        let x = self.face_x(side);
        let center = self.state.paddle(side).center_y;
        let half = self.config.paddle_length / 2.0;
        Segment::new(Point::new(x, center - half), Point::new(x, center + half))
    }

    fn obstacle_segment(&self, obstacle: Obstacle) -> Segment {
        let (w, h) = (self.config.width, self.config.height);
        match obstacle {
            Obstacle::Paddle(side) => self.face(side),
            Obstacle::Top => Segment::new(Point::new(0.0, 0.0), Point::new(w, 0.0)),
            Obstacle::Bottom => Segment::new(Point::new(0.0, h), Point::new(w, h)),
        }
    }

    fn approaching(&self, obstacle: Obstacle) -> bool {
        let v = self.state.ball_velocity;
        match obstacle {
            Obstacle::Paddle(Side::Left) => v.x < 0.0,
            Obstacle::Paddle(Side::Right) => v.x > 0.0,
            Obstacle::Top => v.y < 0.0,
            Obstacle::Bottom => v.y > 0.0,
        }
    }

    fn nearest_hit(&self, travel: &Segment) -> Option<(Obstacle, Point)> {
        let candidates = [
            Obstacle::Paddle(Side::Left),
            Obstacle::Paddle(Side::Right),
            Obstacle::Top,
            Obstacle::Bottom,
        ];

        let mut nearest: Option<(Obstacle, Point, f64)> = None;
        for obstacle in candidates {
            if !self.approaching(obstacle) {
                continue;
            }
            let Some(point) = travel.intersection(&self.obstacle_segment(obstacle), self.config.precision) else {
                continue;
            };
            let distance = travel.p1.distance(point);
            if nearest.map_or(true, |(_, _, best)| distance < best) {
                nearest = Some((obstacle, point, distance));
            }
        }
        nearest.map(|(obstacle, point, _)| (obstacle, point))
    }

    fn cap_speed(&self, velocity: Point) -> Point {
        let speed = velocity.magnitude();
        if speed > self.config.max_speed {
            velocity * (self.config.max_speed / speed)
        } else {
            velocity
        }
    }

    fn bounce_off_paddle(&mut self, side: Side, impact: Point) {
        let speed = self.state.ball_speed();
        let mut velocity = Point::new(-self.state.ball_velocity.x, self.state.ball_velocity.y);

        if self.config.spin != 0.0 {
            let half = self.config.paddle_length / 2.0;
            let offset = ((impact.y - self.state.paddle(side).center_y) / half).clamp(-1.0, 1.0);
            velocity.y += self.config.spin * offset * speed;
            let nudged = velocity.magnitude();
            if nudged > 0.0 {
                velocity = velocity * (speed / nudged);
            }
        }

        velocity = self.cap_speed(velocity * self.config.hit_speedup);
        self.state.ball_position = impact;
        self.state.ball_velocity = velocity;
        self.state.paddle_mut(side).collisions += 1;
    }

    /// Put the ball in the center with a freshly drawn velocity.
    fn serve(&mut self) {
        let points = self.state.total_score();
        let speed = (self.config.base_speed * self.config.acceleration.powi(points as i32))
            .min(self.config.max_speed);
        let angle = self.rng.gen_in(self.config.serve_angle_range);
        let mut velocity = Point::from_polar(angle, speed);
        if self.rng.gen_bool(0.5) {
            velocity.x = -velocity.x;
        }

        self.state.ball_position = Point::new(self.config.width / 2.0, self.config.height / 2.0);
        self.state.ball_velocity = velocity;
    }

    fn move_paddle(&mut self, side: Side, delta: f64) {
        let delta = DoubleRange::SYMMETRIC_UNIT.clip(delta) * self.config.max_delta;
        let bounds = DoubleRange::new(0.0, self.config.height);
        let paddle = self.state.paddle_mut(side);
        paddle.center_y = bounds.clip(paddle.center_y + delta);
    }

    fn observe(&self, side: Side) -> Vec<f64> {
        let config = &self.config;
        let own = self.state.paddle(side);
        let other = self.state.paddle(side.opponent());
        let ball = self.state.ball_position;
        let velocity = self.state.ball_velocity;
        let (ball_x, velocity_x) = match side {
            Side::Left => (ball.x, velocity.x),
            Side::Right => (config.width - ball.x, -velocity.x),
        };

        let raw = [own.center_y, other.center_y, ball_x, ball.y, velocity_x, velocity.y];
        if !config.rescale_observations {
            return raw.to_vec();
        }

        let ys = DoubleRange::new(0.0, config.height);
        let xs = DoubleRange::new(0.0, config.width);
        let vs = DoubleRange::new(-config.max_speed, config.max_speed);
        let range = config.observation_range;
        vec![
            ys.rescale(raw[0], range),
            ys.rescale(raw[1], range),
            xs.rescale(raw[2], range),
            ys.rescale(raw[3], range),
            vs.rescale(raw[4], range),
            vs.rescale(raw[5], range),
        ]
    }
}

impl Environment for PaddleBallEnvironment {
    type Observation = (Vec<f64>, Vec<f64>);
    type Action = (Vec<f64>, Vec<f64>);
    type State = PaddleBallState;

    fn reset(&mut self) {
        self.rng.reseed();
        let center_y = self.config.height / 2.0;
        self.state.left = PaddleState::new(Side::Left, center_y);
        self.state.right = PaddleState::new(Side::Right, center_y);
        self.last_time = None;
        self.serve();
    }

    fn step(&mut self, t: f64, action: &Self::Action) -> SimResult<Self::Observation> {
        check_action_size(&action.0, 1)?;
        check_action_size(&action.1, 1)?;

        let dt = self.last_time.map_or(0.0, |last| (t - last).max(0.0));
        self.last_time = Some(t);

        self.move_paddle(Side::Left, action.0[0]);
        self.move_paddle(Side::Right, action.1[0]);

        let start = self.state.ball_position;
        let travel = Segment::new(start, start + self.state.ball_velocity * dt);

        match self.nearest_hit(&travel) {
            Some((Obstacle::Paddle(side), impact)) => {
                tracing::trace!(t, ?side, "ball hit paddle");
                self.bounce_off_paddle(side, impact);
            }
            Some((Obstacle::Top | Obstacle::Bottom, impact)) => {
                self.state.ball_position = impact;
                self.state.ball_velocity.y = -self.state.ball_velocity.y;
            }
            None => {
                self.state.ball_position = travel.p2;
                let scorer = if travel.p2.x < 0.0 {
                    Some(Side::Right)
                } else if travel.p2.x > self.config.width {
                    Some(Side::Left)
                } else {
                    None
                };
                if let Some(side) = scorer {
                    self.state.paddle_mut(side).score += 1;
                    tracing::trace!(t, ?side, total = self.state.total_score(), "point scored");
                    self.serve();
                }
            }
        }

        Ok((self.observe(Side::Left), self.observe(Side::Right)))
    }

    fn state(&self) -> PaddleBallState {
        self.state
    }

    fn default_action(&self) -> Self::Action {
        (vec![0.0], vec![0.0])
    }
}
