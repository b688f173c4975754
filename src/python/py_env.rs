//! Environment bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;
use pyo3::types::PyDict;

use crate::env::{CamelEnv, StepInfo};

use super::to_py_err;

/// Python wrapper for CamelEnv.
///
/// Follows the Gymnasium `reset`/`step` return conventions.
#[pyclass(name = "CamelEnv")]
pub struct PyCamelEnv(CamelEnv);

fn info_dict<'py>(py: Python<'py>, info: &StepInfo) -> PyResult<Bound<'py, PyDict>> {
    let dict = PyDict::new_bound(py);
    dict.set_item("mask", PyArray1::from_slice_bound(py, info.mask.as_slice()))?;
    if let Some(error) = &info.error {
        dict.set_item("error", error)?;
    }
    Ok(dict)
}

#[pymethods]
impl PyCamelEnv {
    /// Create an environment with a game dealt from `seed`.
    #[new]
    #[pyo3(signature = (seed=0))]
    fn new(seed: u64) -> PyResult<Self> {
        CamelEnv::new(seed).map(Self).map_err(to_py_err)
    }

    /// Start a new episode. Returns `(obs, info)`.
    #[pyo3(signature = (seed=0))]
    fn reset<'py>(
        &mut self,
        py: Python<'py>,
        seed: u64,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, Bound<'py, PyDict>)> {
        let (obs, info) = self.0.reset(seed).map_err(to_py_err)?;
        Ok((PyArray1::from_vec_bound(py, obs.tensor), info_dict(py, &info)?))
    }

    /// Play one action. Returns `(obs, reward, terminated, truncated, info)`.
    #[allow(clippy::type_complexity)]
    fn step<'py>(
        &mut self,
        py: Python<'py>,
        action: usize,
    ) -> PyResult<(Bound<'py, PyArray1<f32>>, f32, bool, bool, Bound<'py, PyDict>)> {
        let outcome = self.0.step(action).map_err(to_py_err)?;
        let info = info_dict(py, &outcome.info)?;
        Ok((
            PyArray1::from_vec_bound(py, outcome.obs.tensor),
            outcome.reward,
            outcome.terminated,
            outcome.truncated,
            info,
        ))
    }

    /// Legal action slots for the agent as a boolean array.
    fn action_mask<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_slice_bound(py, self.0.action_mask().as_slice())
    }

    /// Current observation as a numpy array.
    fn observation<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_vec_bound(py, self.0.observation().tensor)
    }

    #[getter]
    fn observation_shape(&self) -> Vec<usize> {
        self.0.observation_shape()
    }

    #[getter]
    fn action_space_size(&self) -> usize {
        self.0.action_space_size()
    }

    /// The underlying game, copied.
    fn game(&self) -> super::PyGame {
        super::PyGame(self.0.game().clone())
    }

    fn __repr__(&self) -> String {
        format!(
            "CamelEnv(legs_played={}, finished={})",
            self.0.game().legs_played(),
            self.0.game().is_finished()
        )
    }
}
