use crate::error::ConfigError;
use crate::grid::{GridSpec, DEFAULT_CELL_SIZE};
use serde::{Deserialize, Serialize};

/// Behaviour parameters shared by every ant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AntParams {
    /// Probability of keeping the current heading on each axis; the rest of the time the
    /// velocity gets a random nudge.
    pub wander_chance: f64,
    /// Probability per tick of getting bored and ignoring scent for a while.
    pub idle_chance: f64,
    /// Upper bound of the idle ticks added when an ant gets bored.
    pub max_idle_ticks: u32,
    /// Upper bound of the random gain applied when steering along scent.
    pub steering_gain: f64,
    /// Multiplier applied to an ant's scent strength every time it marks a cell.
    pub scent_use_rate: f64,
    /// Scent strength right after leaving the nest or picking up food.
    pub initial_scent: f64,
    /// Distance from the world edges at which ants are turned around.
    pub edge_margin: f64,
}

impl Default for AntParams {
    fn default() -> Self {
        AntParams {
            wander_chance: 0.92,
            idle_chance: 0.01,
            max_idle_ticks: 15,
            steering_gain: 1.5,
            scent_use_rate: 0.995,
            initial_scent: 100.0,
            edge_margin: 2.0,
        }
    }
}

/// Parameters of the ant-ant collision response.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionParams {
    /// Radius of each ant. Two ants collide when their centers are closer than twice this.
    pub radius: f64,
    /// Coefficient of restitution, 0 for perfectly inelastic and 1 for perfectly elastic.
    pub restitution: f64,
}

impl CollisionParams {
    pub fn collision_distance(&self) -> f64 {
        2.0 * self.radius
    }
}

impl Default for CollisionParams {
    fn default() -> Self {
        CollisionParams {
            radius: 4.0,
            restitution: 0.5,
        }
    }
}

/// Everything needed to build a [`crate::Simulation`].
///
/// The default is the reference scenario: a 600x400 world, 100 ants in the middle and
/// four blocks of food.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub cell_size: f64,
    pub max_intensity: f64,
    pub decay_factor: f64,
    pub ant_count: usize,
    pub nest: (f64, f64),
    /// Half side of the square around the nest where food is delivered.
    pub nest_radius: f64,
    pub food_placements: Vec<(f64, f64)>,
    /// `None` seeds the random source from the clock.
    pub seed: Option<u64>,
    pub ant: AntParams,
    pub collision: CollisionParams,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            grid_width: 150,
            grid_height: 100,
            cell_size: DEFAULT_CELL_SIZE,
            max_intensity: 100.0,
            decay_factor: 0.999,
            ant_count: 100,
            nest: (300.0, 200.0),
            nest_radius: 20.0,
            food_placements: vec![(400.0, 300.0), (150.0, 250.0), (300.0, 100.0), (500.0, 200.0)],
            seed: None,
            ant: AntParams::default(),
            collision: CollisionParams::default(),
        }
    }
}

impl SimulationConfig {
    /// Parses a configuration from json. Missing fields take their default values.
    pub fn from_json(contents: &str) -> Result<SimulationConfig, ConfigError> {
        Ok(serde_json::from_str(contents)?)
    }

    pub fn grid(&self) -> GridSpec {
        GridSpec::new(self.grid_width, self.grid_height, self.cell_size)
    }

    pub fn world_width(&self) -> f64 {
        self.grid().world_width()
    }

    pub fn world_height(&self) -> f64 {
        self.grid().world_height()
    }

    /// Checks every parameter is within the range the simulation can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.grid_width == 0 || self.grid_height == 0 {
            return Err(ConfigError::ZeroDimension {
                width: self.grid_width,
                height: self.grid_height,
            });
        }

        let checks = [
            ("cell_size", self.cell_size, self.cell_size > 0.0),
            ("max_intensity", self.max_intensity, self.max_intensity > 0.0),
            (
                "decay_factor",
                self.decay_factor,
                self.decay_factor > 0.0 && self.decay_factor < 1.0,
            ),
            ("nest_radius", self.nest_radius, self.nest_radius >= 0.0),
            ("nest.x", self.nest.0, true),
            ("nest.y", self.nest.1, true),
            (
                "ant.wander_chance",
                self.ant.wander_chance,
                (0.0..=1.0).contains(&self.ant.wander_chance),
            ),
            (
                "ant.idle_chance",
                self.ant.idle_chance,
                (0.0..=1.0).contains(&self.ant.idle_chance),
            ),
            (
                "ant.steering_gain",
                self.ant.steering_gain,
                self.ant.steering_gain >= 0.0,
            ),
            (
                "ant.scent_use_rate",
                self.ant.scent_use_rate,
                self.ant.scent_use_rate > 0.0 && self.ant.scent_use_rate <= 1.0,
            ),
            (
                "ant.initial_scent",
                self.ant.initial_scent,
                self.ant.initial_scent >= 0.0,
            ),
            ("ant.edge_margin", self.ant.edge_margin, self.ant.edge_margin >= 0.0),
            (
                "collision.radius",
                self.collision.radius,
                self.collision.radius >= 0.0,
            ),
            (
                "collision.restitution",
                self.collision.restitution,
                (0.0..=1.0).contains(&self.collision.restitution),
            ),
        ];

        // NaN fails every comparison above, infinities are rejected here
        for (name, value, valid) in checks {
            if !valid || !value.is_finite() {
                return Err(ConfigError::InvalidParameter { name, value });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_using_the_default_config_it_describes_the_reference_scenario_and_is_valid() {
        let config = SimulationConfig::default();

        assert_eq!(config.world_width(), 600.0);
        assert_eq!(config.world_height(), 400.0);
        assert_eq!(config.ant_count, 100);
        assert_eq!(config.food_placements.len(), 4);
        assert_eq!(config.collision.collision_distance(), 8.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn when_the_grid_has_a_zero_dimension_validation_fails() {
        let config = SimulationConfig {
            grid_width: 0,
            ..SimulationConfig::default()
        };

        assert!(matches!(
            config.validate(),
            Err(ConfigError::ZeroDimension { width: 0, height: 100 })
        ));
    }

    #[test]
    fn when_the_decay_factor_is_out_of_range_validation_fails() {
        for decay_factor in [0.0, 1.0, 1.5, -0.2, f64::NAN] {
            let config = SimulationConfig {
                decay_factor,
                ..SimulationConfig::default()
            };

            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidParameter {
                    name: "decay_factor",
                    ..
                })
            ));
        }
    }

    #[test]
    fn when_a_probability_is_out_of_range_validation_fails() {
        let mut config = SimulationConfig::default();
        config.ant.wander_chance = 1.2;

        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidParameter {
                name: "ant.wander_chance",
                ..
            })
        ));
    }

    #[test]
    fn when_the_nest_is_not_finite_validation_fails() {
        let config = SimulationConfig {
            nest: (f64::INFINITY, 10.0),
            ..SimulationConfig::default()
        };

        assert!(config.validate().is_err());
    }

    #[test]
    fn when_parsing_json_missing_fields_take_their_defaults() {
        let config = SimulationConfig::from_json(
            r#"{ "ant_count": 12, "seed": 42, "ant": { "wander_chance": 0.5 } }"#,
        )
        .unwrap();

        assert_eq!(config.ant_count, 12);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.ant.wander_chance, 0.5);
        assert_eq!(config.ant.scent_use_rate, 0.995);
        assert_eq!(config.grid_width, 150);
    }

    #[test]
    fn when_parsing_invalid_json_an_error_is_returned() {
        assert!(matches!(
            SimulationConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
