//! Game bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::dice::DiceRoller;
use crate::game::Game;

use super::to_py_err;

/// Python wrapper for Game.
///
/// Actions are passed as integer slots of the 48-wide action space.
#[pyclass(name = "Game")]
#[derive(Clone)]
pub struct PyGame(pub Game);

#[pymethods]
impl PyGame {
    /// Start a game for `players`, with `starting_player` as a seat index.
    #[new]
    #[pyo3(signature = (players, starting_player=0, seed=0))]
    fn new(players: Vec<String>, starting_player: usize, seed: u64) -> PyResult<Self> {
        Game::start_game(&players, starting_player, DiceRoller::new(seed))
            .map(Self)
            .map_err(to_py_err)
    }

    /// Play action slot `index` for `player`. Returns whether the race finished.
    fn play_index(&mut self, player: &str, index: usize) -> PyResult<bool> {
        self.0.play_index(player, index).map_err(to_py_err)
    }

    /// Roll for `player`. Returns `(camel, number, finished)`.
    fn play_roll(&mut self, player: &str) -> PyResult<(String, u8, bool)> {
        let (dice, finished) = self.0.play_roll(player).map_err(to_py_err)?;
        Ok((dice.color().name().to_string(), dice.number(), finished))
    }

    /// Legal action slots for `player` as a boolean array.
    fn action_mask<'py>(&self, py: Python<'py>, player: &str) -> Bound<'py, PyArray1<bool>> {
        PyArray1::from_slice_bound(py, self.0.get_action_mask(player).as_slice())
    }

    /// Points held by `player`, or `ValueError` for an unknown name.
    fn points(&self, player: &str) -> PyResult<i32> {
        self.0.current_player_points(player).map_err(to_py_err)
    }

    #[getter]
    fn next_player(&self) -> Option<String> {
        self.0.next_player().map(str::to_string)
    }

    #[getter]
    fn is_finished(&self) -> bool {
        self.0.is_finished()
    }

    #[getter]
    fn legs_played(&self) -> u32 {
        self.0.legs_played()
    }

    /// Name of the winning player once the race is over.
    #[getter]
    fn winner(&self) -> Option<String> {
        self.0.winner_player().map(|p| p.name.clone())
    }

    /// Serialize the full game state.
    fn to_bytes<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self.0.to_bytes().map_err(to_py_err)?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    /// Restore a game written by `to_bytes`.
    #[staticmethod]
    fn from_bytes(data: &[u8]) -> PyResult<Self> {
        Game::from_bytes(data).map(Self).map_err(to_py_err)
    }

    fn __repr__(&self) -> String {
        format!(
            "Game(players={}, legs_played={}, finished={})",
            self.0.players().len(),
            self.0.legs_played(),
            self.0.is_finished()
        )
    }
}
