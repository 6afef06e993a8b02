//! Episode runner bindings for Python.

use std::sync::Arc;

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::agent::{Activation, LinearAgent, LinearParameters};
use crate::environment::{PointNavigationConfig, PointNavigationEnvironment};
use crate::task::{fitness, stop, SingleAgentTask, TaskConfig};

use super::py_arena::PyArena;

/// Runs point-robot episodes driven by a linear controller.
///
/// The controller sees `[robot x, robot y, target x, target y]` rescaled to
/// `[0, 1]` and emits a normalized velocity `(vx, vy)`.
#[pyclass(name = "PointNavigationRunner")]
pub struct PyPointNavigationRunner {
    arena: PyArena,
    config: PointNavigationConfig,
    task_config: TaskConfig,
    target_radius: Option<f64>,
    seed: u64,
}

#[pymethods]
impl PyPointNavigationRunner {
    /// Create a runner.
    ///
    /// # Arguments
    /// - arena: Arena to navigate
    /// - max_speed: Distance covered per step at full action
    /// - collision_block: Margin kept from walls
    /// - t_max: Episode length
    /// - dt: Time step
    /// - target_radius: Stop once this close to the target (None = never)
    /// - seed: RNG seed for start and target sampling
    #[new]
    #[pyo3(signature = (
        arena,
        max_speed = 0.01,
        collision_block = 0.001,
        t_max = 10.0,
        dt = 0.1,
        target_radius = None,
        seed = 42
    ))]
    fn new(
        arena: PyArena,
        max_speed: f64,
        collision_block: f64,
        t_max: f64,
        dt: f64,
        target_radius: Option<f64>,
        seed: u64,
    ) -> PyResult<Self> {
        Ok(Self {
            arena,
            config: PointNavigationConfig::default()
                .with_max_speed(max_speed)
                .with_collision_block(collision_block),
            task_config: TaskConfig::new(0.0, t_max, dt)?,
            target_radius,
            seed,
        })
    }

    /// Run one episode.
    ///
    /// Returns `(path, final_distance)` where `path` is an `(n, 2)` array of
    /// robot positions after each step.
    #[pyo3(signature = (weights, bias, tanh = true))]
    fn run<'py>(
        &self,
        py: Python<'py>,
        weights: Vec<Vec<f64>>,
        bias: Vec<f64>,
        tanh: bool,
    ) -> PyResult<(Bound<'py, PyArray2<f64>>, f64)> {
        if weights.len() != 2 || bias.len() != 2 || weights.iter().any(|row| row.len() != 4) {
            return Err(PyValueError::new_err(
                "Expected 2x4 weights and 2 biases",
            ));
        }
        let activation = if tanh { Activation::Tanh } else { Activation::Identity };
        let mut agent = LinearAgent::new(LinearParameters::new(weights, bias, activation));

        let arena = Arc::clone(&self.arena.0);
        let config = self.config.clone();
        let seed = self.seed;
        let mut task = SingleAgentTask::new(
            move || PointNavigationEnvironment::new(Arc::clone(&arena), config.clone(), seed),
            self.task_config.clone(),
        );
        if let Some(radius) = self.target_radius {
            task = task.with_stop_condition(stop::target_reached(radius));
        }

        let outcome = task.run(&mut agent)?;
        let distance = fitness::final_distance_to_target(&outcome).unwrap_or(f64::NAN);

        let flat: Vec<f64> = outcome
            .states()
            .flat_map(|s| [s.robot_position.x, s.robot_position.y])
            .collect();
        let rows = outcome.len();
        let path = PyArray1::from_vec_bound(py, flat)
            .reshape([rows, 2])
            .map_err(|e| PyValueError::new_err(format!("{}", e)))?;
        Ok((path, distance))
    }

    fn __repr__(&self) -> String {
        format!(
            "PointNavigationRunner(max_speed={}, t={}, seed={})",
            self.config.max_speed, self.task_config.t_range, self.seed
        )
    }
}
