use crate::config::SimulationConfig;
use crate::error::ConfigError;
use crate::simulation::{Simulation, SimulationState};
use pyo3::exceptions::{PyIOError, PyValueError};
use pyo3::prelude::*;

/// Python handle on a [`Simulation`].
#[pyclass(name = "Simulation", module = "ants_forage")]
pub struct PySimulation {
    inner: Simulation,
}

#[pymethods]
impl PySimulation {
    /// Creates a new simulation.
    ///
    /// # Arguments
    /// * `config_json` - The configuration as json. If `None`, the reference scenario is used.
    /// * `replay_filename` - The filename to save the replay of the run to. If `None`, no replay will be saved.
    #[new]
    #[pyo3(signature = (config_json=None, replay_filename=None))]
    pub fn new(
        config_json: Option<&str>,
        replay_filename: Option<String>,
    ) -> PyResult<PySimulation> {
        let config = match config_json {
            Some(json) => SimulationConfig::from_json(json).map_err(to_value_error)?,
            None => SimulationConfig::default(),
        };
        let inner = Simulation::new(config, replay_filename).map_err(to_value_error)?;

        Ok(PySimulation { inner })
    }

    /// Advances the simulation by one tick of `dt` units of time.
    pub fn advance_tick(&mut self, dt: f64) -> SimulationState {
        self.inner.advance_tick(dt)
    }

    /// Places a 5x5 block of food at the given world position.
    pub fn place_food(&mut self, x: f64, y: f64) -> usize {
        self.inner.place_food(x, y)
    }

    pub fn state(&self) -> SimulationState {
        self.inner.state()
    }

    pub fn is_finished(&self) -> bool {
        self.inner.is_finished()
    }

    /// Home scent intensities as `height` rows of `width` values.
    pub fn home_pheromone(&self) -> Vec<Vec<f64>> {
        let map = self.inner.home_pheromone();
        rows(map.values(), map.width())
    }

    /// Food scent intensities as `height` rows of `width` values.
    pub fn food_pheromone(&self) -> Vec<Vec<f64>> {
        let map = self.inner.food_pheromone();
        rows(map.values(), map.width())
    }

    /// Food presence as `height` rows of `width` flags.
    pub fn food_grid(&self) -> Vec<Vec<bool>> {
        let food = self.inner.food();
        rows(food.cells(), food.width())
    }

    pub fn save_replay(&self) -> PyResult<()> {
        self.inner
            .save_replay()
            .map_err(|e| PyIOError::new_err(e.to_string()))
    }
}

fn rows<T: Copy>(values: &[T], width: usize) -> Vec<Vec<T>> {
    values.chunks(width).map(<[T]>::to_vec).collect()
}

fn to_value_error(error: ConfigError) -> PyErr {
    PyValueError::new_err(error.to_string())
}
