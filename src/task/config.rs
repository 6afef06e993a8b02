//! Run configuration.

use serde::{Deserialize, Serialize};

use crate::core::{DoubleRange, SimError, SimResult};

/// Slack allowed when testing `t <= t_max`, relative to `dt`.
const TIME_SLACK: f64 = 1e-9;

/// Time range, step size and agent reset policy for one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TaskConfig {
    /// Inclusive `[t_min, t_max]`.
    pub t_range: DoubleRange,

    /// Time between recorded steps.
    pub dt: f64,

    /// Reset the agent at the start of every run. When false the agent keeps
    /// its internal state across runs.
    pub reset_agent: bool,
}

impl Default for TaskConfig {
    fn default() -> Self {
        Self {
            t_range: DoubleRange::UNIT,
            dt: 0.1,
            reset_agent: true,
        }
    }
}

impl TaskConfig {
    /// Create a validated configuration.
    pub fn new(t_min: f64, t_max: f64, dt: f64) -> SimResult<Self> {
        let config = Self {
            t_range: DoubleRange::try_new(t_min, t_max)?,
            dt,
            reset_agent: true,
        };
        config.validate()?;
        Ok(config)
    }

    #[must_use]
    pub fn with_reset_agent(mut self, reset: bool) -> Self {
        self.reset_agent = reset;
        self
    }

    /// Check `dt > 0` and `t_min <= t_max`.
    ///
    /// Fields are public, so runs re-validate before starting.
    pub fn validate(&self) -> SimResult<()> {
        if !(self.dt > 0.0 && self.dt.is_finite()) {
            return Err(SimError::InvalidTimeStep(self.dt));
        }
        let (min, max) = (self.t_range.min(), self.t_range.max());
        if !(min <= max) {
            return Err(SimError::InvalidRange { min, max });
        }
        Ok(())
    }

    /// Time of the `k`-th step, computed directly so no error accumulates.
    #[must_use]
    pub fn time_at(&self, k: usize) -> f64 {
        self.t_range.min() + k as f64 * self.dt
    }

    /// Whether `t` is still inside the run.
    #[must_use]
    pub fn includes(&self, t: f64) -> bool {
        t <= self.t_range.max() + self.dt * TIME_SLACK
    }

    /// Number of steps a run takes when no stop condition fires.
    #[must_use]
    pub fn max_steps(&self) -> usize {
        let mut k = 0;
        while self.includes(self.time_at(k)) {
            k += 1;
        }
        k
    }
}
