//! Arena bindings for Python.

use std::sync::Arc;

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::arena::{NavigationArena, PRESET_NAMES};

/// Python wrapper for NavigationArena.
#[pyclass(name = "Arena")]
#[derive(Clone)]
pub struct PyArena(pub Arc<NavigationArena>);

#[pymethods]
impl PyArena {
    /// Build a named preset arena.
    #[staticmethod]
    fn preset(name: &str) -> PyResult<Self> {
        Ok(Self(Arc::new(NavigationArena::preset(name)?)))
    }

    /// Build an arena from a text grid.
    ///
    /// # Arguments
    /// - text: Rows of `.`, `w`, `s`, `t` separated by `|` or newlines
    /// - cell_side: Side length of one grid cell
    /// - diagonals: Merge diagonal runs of wall cells
    #[staticmethod]
    #[pyo3(signature = (text, cell_side = 0.1, diagonals = false))]
    fn from_text_grid(text: &str, cell_side: f64, diagonals: bool) -> PyResult<Self> {
        Ok(Self(Arc::new(NavigationArena::from_text_grid(text, cell_side, diagonals)?)))
    }

    /// Names accepted by `Arena.preset`.
    #[staticmethod]
    fn preset_names() -> Vec<&'static str> {
        PRESET_NAMES.to_vec()
    }

    #[getter]
    fn x_extent(&self) -> f64 {
        self.0.x_extent()
    }

    #[getter]
    fn y_extent(&self) -> f64 {
        self.0.y_extent()
    }

    /// Boundary and obstacle segments as an `(n, 4)` array of `x1, y1, x2, y2`.
    fn segments<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyArray2<f64>>> {
        let flat: Vec<f64> = self
            .0
            .segments()
            .flat_map(|s| [s.p1.x, s.p1.y, s.p2.x, s.p2.y])
            .collect();
        let rows = flat.len() / 4;
        PyArray1::from_vec_bound(py, flat)
            .reshape([rows, 4])
            .map_err(|e| PyValueError::new_err(format!("{}", e)))
    }

    fn __repr__(&self) -> String {
        format!(
            "Arena({}x{}, obstacles={})",
            self.0.x_extent(),
            self.0.y_extent(),
            self.0.obstacles().len()
        )
    }
}
