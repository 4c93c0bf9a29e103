use crate::colony::{Colony, ColonyEvent};
use crate::config::SimulationConfig;
use crate::error::{ConfigError, ReplayError};
use crate::food::FoodField;
use crate::pheromone::{PheromoneMap, Pheromones};
use crate::replay::{create_replay_logger, ReplayLogger, TickRecord};
use crate::rng::RandomSource;
use rand::Rng;
use serde::Serialize;
use tracing::{debug, error, info};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// The foraging simulation.
/// Main entry point for driving a run.
pub struct Simulation {
    config: SimulationConfig,
    rng: RandomSource,
    pheromones: Pheromones,
    food: FoodField,
    colony: Colony,
    tick: usize,
    elapsed: f64,
    finished: bool,
    replay_logger: Box<dyn ReplayLogger>,
}

/// Position and state of an ant, for drawing.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(feature = "python", pyclass(name = "Ant", module = "ants_forage", get_all))]
pub struct AntView {
    pub x: f64,
    pub y: f64,
    pub carrying_food: bool,
}

/// Represents the state of the simulation after a tick.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[cfg_attr(feature = "python", pyclass(module = "ants_forage", get_all))]
pub struct SimulationState {
    /// Number of ticks run so far.
    pub tick: usize,
    /// Sum of the time steps of every tick.
    pub elapsed: f64,
    /// Total food brought back to the nest.
    pub food_delivered: usize,
    /// Cells still holding food.
    pub food_remaining: usize,
    /// Ants currently carrying food.
    pub carrying: usize,
    /// Every ant, in colony order.
    pub ants: Vec<AntView>,
    /// Whether all food has been collected and delivered.
    pub finished: bool,
}

impl Simulation {
    /// Creates a new simulation.
    ///
    /// # Arguments
    /// * `config` - The world, colony and behaviour parameters. Validated before use.
    /// * `replay_filename` - The file to save a replay of the run to. If `None`, no replay is kept.
    pub fn new(
        config: SimulationConfig,
        replay_filename: Option<String>,
    ) -> Result<Simulation, ConfigError> {
        config.validate()?;

        let mut rng = match config.seed {
            Some(seed) => RandomSource::new(seed),
            None => RandomSource::from_clock(),
        };
        let grid = config.grid();

        info!(
            width = grid.width(),
            height = grid.height(),
            ants = config.ant_count,
            seed = rng.state(),
            "Creating simulation"
        );

        let pheromones = Pheromones::new(grid, config.max_intensity, config.decay_factor);
        let colony = Colony::new(&config, &mut rng);
        let replay_logger = create_replay_logger(replay_filename, &config);

        let mut simulation = Simulation {
            food: FoodField::new(grid),
            config,
            rng,
            pheromones,
            colony,
            tick: 0,
            elapsed: 0.0,
            finished: false,
            replay_logger,
        };

        for (x, y) in simulation.config.food_placements.clone() {
            simulation.place_food(x, y);
        }

        Ok(simulation)
    }

    /// Advances the simulation by one tick of `dt` units of time.
    ///
    /// Moves the colony, resolves collisions and then lets both pheromone maps decay.
    pub fn advance_tick(&mut self, dt: f64) -> SimulationState {
        self.tick += 1;
        self.elapsed += dt;

        let events = self
            .colony
            .update(&mut self.food, &mut self.pheromones, &mut self.rng, dt);
        self.colony.resolve_collisions(&mut self.rng);
        self.pheromones.step(dt);

        for event in events {
            match event {
                ColonyEvent::Pickup { ant, x, y } => {
                    self.replay_logger.log_pickup(self.tick, ant, (x, y))
                }
                ColonyEvent::Delivery { ant } => self.replay_logger.log_delivery(self.tick, ant),
            }
        }

        self.replay_logger.log_tick(TickRecord {
            tick: self.tick,
            elapsed: self.elapsed,
            food_delivered: self.colony.food_delivered(),
            carrying: self.colony.carrying(),
            food_remaining: self.food.remaining(),
        });

        // Only the first tick meeting the end condition finishes the run
        if !self.finished && self.is_finished() {
            self.finished = true;
            info!(
                tick = self.tick,
                elapsed = self.elapsed,
                food_delivered = self.colony.food_delivered(),
                "All food delivered"
            );
            self.replay_logger.log_finished(self.tick);
            if let Err(e) = self.replay_logger.save() {
                error!(error = %e, "Could not save replay");
            }
        }

        self.state()
    }

    /// Places a 5x5 block of food whose top-left cell contains `(x, y)`.
    ///
    /// Returns the number of cells that received food.
    pub fn place_food(&mut self, x: f64, y: f64) -> usize {
        let cells = self.food.add_food(x, y);
        debug!(x, y, cells, "Placed food");
        self.replay_logger.log_food_placed(self.tick, (x, y), cells);

        // New food means the run is no longer over
        if cells > 0 {
            self.finished = false;
        }

        cells
    }

    /// Places `count` blocks of food at random positions in the world.
    pub fn scatter_food(&mut self, count: usize) -> usize {
        let (width, height) = (self.config.world_width(), self.config.world_height());

        let mut cells = 0;
        for _ in 0..count {
            let x = self.rng.gen_range(0.0..width);
            let y = self.rng.gen_range(0.0..height);
            cells += self.place_food(x, y);
        }

        cells
    }

    /// Whether no food is left on the field and no ant is carrying any.
    pub fn is_finished(&self) -> bool {
        self.food.is_empty() && self.colony.carrying() == 0
    }

    /// Writes the replay to disk, a no-op if the simulation was created without a replay file.
    pub fn save_replay(&self) -> Result<(), ReplayError> {
        self.replay_logger.save()
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    pub fn home_pheromone(&self) -> &PheromoneMap {
        &self.pheromones.home
    }

    pub fn food_pheromone(&self) -> &PheromoneMap {
        &self.pheromones.food
    }

    pub fn food(&self) -> &FoodField {
        &self.food
    }

    pub fn colony(&self) -> &Colony {
        &self.colony
    }

    pub fn food_delivered(&self) -> usize {
        self.colony.food_delivered()
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn tick(&self) -> usize {
        self.tick
    }

    pub fn state(&self) -> SimulationState {
        SimulationState {
            tick: self.tick,
            elapsed: self.elapsed,
            food_delivered: self.colony.food_delivered(),
            food_remaining: self.food.remaining(),
            carrying: self.colony.carrying(),
            ants: self
                .colony
                .ants()
                .iter()
                .map(|ant| AntView {
                    x: ant.x(),
                    y: ant.y(),
                    carrying_food: ant.carrying_food(),
                })
                .collect(),
            finished: self.is_finished(),
        }
    }
}
