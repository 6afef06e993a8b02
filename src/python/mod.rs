//! Python bindings for the rust-agentsim simulation engine.
//!
//! # Quick Start
//!
//! ```python
//! import rust_agentsim as sim
//!
//! arena = sim.Arena.preset("u-barrier")
//! walls = arena.segments()          # (n, 4) array of x1, y1, x2, y2
//!
//! runner = sim.PointNavigationRunner(arena, t_max=5.0, dt=0.1, seed=7)
//! path, distance = runner.run([[0, 0, 1, 0], [0, 0, 0, 1]], [0, 0])
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::SimError;

mod py_arena;
mod py_task;

pub use py_arena::*;
pub use py_task::*;

impl From<SimError> for PyErr {
    fn from(err: SimError) -> PyErr {
        PyValueError::new_err(err.to_string())
    }
}

/// rust-agentsim: agent/environment simulation for evolutionary and RL experiments.
#[pymodule]
fn rust_agentsim(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyArena>()?;
    m.add_class::<PyPointNavigationRunner>()?;
    Ok(())
}
