//! # ants_forage
//!
//! An ant colony foraging simulation driven by pheromone trails.
//!
//! Ants leave the nest in random directions, laying "home" scent as they go. Ants that find
//! food carry it back by following that scent while laying "food" scent, which in turn guides
//! the next foragers. Scent evaporates over time, so short routes end up reinforced the most.

pub mod ant;
pub mod colony;
pub mod config;
pub mod error;
pub mod food;
pub mod grid;
pub mod pheromone;
pub mod rng;
pub mod scenario;
pub mod simulation;

mod replay;

#[cfg(feature = "python")]
mod python;

pub use ant::Ant;
pub use colony::{Colony, ColonyEvent};
pub use config::{AntParams, CollisionParams, SimulationConfig};
pub use error::{ConfigError, ReplayError};
pub use food::FoodField;
pub use grid::GridSpec;
pub use pheromone::{PheromoneMap, Pheromones};
pub use rng::RandomSource;
pub use simulation::{AntView, Simulation, SimulationState};

#[cfg(feature = "python")]
use pyo3::prelude::*;

#[cfg(feature = "python")]
#[pymodule]
fn ants_forage(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PySimulation>()?;
    m.add_class::<SimulationState>()?;
    m.add_class::<AntView>()?;
    Ok(())
}
