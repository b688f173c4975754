//! Python bindings for the camelgo engine.
//!
//! # Quick Start
//!
//! ```python
//! import camelgo
//!
//! env = camelgo.CamelEnv(seed=42)
//! obs, info = env.reset(seed=7)
//! obs, reward, terminated, truncated, info = env.step(0)
//! ```

use pyo3::prelude::*;

mod py_env;
mod py_game;

pub use py_env::*;
pub use py_game::*;

use crate::error::GameError;

/// Convert an engine error into a Python `ValueError`.
pub(crate) fn to_py_err(err: GameError) -> PyErr {
    PyErr::new::<pyo3::exceptions::PyValueError, _>(err.to_string())
}

/// camelgo: a camel racing rules engine for reinforcement learning.
#[pymodule]
fn camelgo(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyCamelEnv>()?;
    m.add_class::<PyGame>()?;

    m.add("ACTION_SPACE_SIZE", crate::core::ACTION_SPACE_SIZE)?;
    m.add("OBSERVATION_DIM", crate::env::OBSERVATION_DIM)?;

    Ok(())
}
