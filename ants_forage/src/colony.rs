use crate::ant::Ant;
use crate::config::{AntParams, CollisionParams, SimulationConfig};
use crate::food::FoodField;
use crate::pheromone::Pheromones;
use crate::rng::RandomSource;
use serde::Serialize;
use std::f64::consts::TAU;
use tracing::trace;

/// Something that happened to an ant during [`Colony::update`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum ColonyEvent {
    /// The ant at index `ant` picked up food at `(x, y)`.
    Pickup { ant: usize, x: f64, y: f64 },
    /// The ant at index `ant` dropped its food at the nest.
    Delivery { ant: usize },
}

/// A nest and the ants that forage for it.
#[derive(Clone, Debug)]
pub struct Colony {
    nest: (f64, f64),
    nest_radius: f64,
    ants: Vec<Ant>,
    food_delivered: usize,
    ant_params: AntParams,
    collision: CollisionParams,
}

impl Colony {
    /// Creates a colony of `config.ant_count` ants at the nest, each with a random velocity.
    pub fn new(config: &SimulationConfig, rng: &mut RandomSource) -> Colony {
        let grid = config.grid();
        let (x, y) = config.nest;
        let ants = (0..config.ant_count)
            .map(|_| Ant::spawn(x, y, &config.ant, &grid, rng))
            .collect();

        Colony::from_ants(ants, config)
    }

    /// Creates a colony from already placed ants.
    pub fn from_ants(ants: Vec<Ant>, config: &SimulationConfig) -> Colony {
        Colony {
            nest: config.nest,
            nest_radius: config.nest_radius,
            ants,
            food_delivered: 0,
            ant_params: config.ant.clone(),
            collision: config.collision.clone(),
        }
    }

    pub fn nest(&self) -> (f64, f64) {
        self.nest
    }

    pub fn ants(&self) -> &[Ant] {
        &self.ants
    }

    /// Total food brought back to the nest so far.
    pub fn food_delivered(&self) -> usize {
        self.food_delivered
    }

    /// Number of ants currently carrying food.
    pub fn carrying(&self) -> usize {
        self.ants.iter().filter(|ant| ant.carrying_food).count()
    }

    /// Moves every ant, then drops food at the nest and picks food up from the field.
    ///
    /// Ants are processed in order, so an ant can neither deliver twice nor deliver and
    /// pick up in the same tick.
    pub fn update(
        &mut self,
        food: &mut FoodField,
        pheromones: &mut Pheromones,
        rng: &mut RandomSource,
        dt: f64,
    ) -> Vec<ColonyEvent> {
        let mut events = Vec::new();

        for (index, ant) in self.ants.iter_mut().enumerate() {
            ant.step(dt, pheromones, &self.ant_params, rng);

            if ant.carrying_food {
                if within_nest(ant, self.nest, self.nest_radius) {
                    ant.deliver_food(self.ant_params.initial_scent);
                    self.food_delivered += 1;
                    trace!(ant = index, total = self.food_delivered, "Food delivered");
                    events.push(ColonyEvent::Delivery { ant: index });
                }
            } else if food.get_value(ant.x, ant.y) {
                ant.pick_up_food(self.ant_params.initial_scent);
                food.bite(ant.x, ant.y);
                trace!(ant = index, x = ant.x, y = ant.y, "Food picked up");
                events.push(ColonyEvent::Pickup {
                    ant: index,
                    x: ant.x,
                    y: ant.y,
                });
            }
        }

        events
    }

    /// Pushes overlapping ants apart and bounces the ones moving towards each other.
    ///
    /// Every pair is checked once, in collection order.
    pub fn resolve_collisions(&mut self, rng: &mut RandomSource) {
        let collision_distance = self.collision.collision_distance();
        let restitution = self.collision.restitution;

        for i in 0..self.ants.len() {
            for j in (i + 1)..self.ants.len() {
                let (head, tail) = self.ants.split_at_mut(j);
                collide(
                    &mut head[i],
                    &mut tail[0],
                    collision_distance,
                    restitution,
                    rng,
                );
            }
        }
    }
}

fn within_nest(ant: &Ant, nest: (f64, f64), radius: f64) -> bool {
    (ant.x - nest.0).abs() < radius && (ant.y - nest.1).abs() < radius
}

// Equal masses: each ant takes half of the correction and half of the impulse
fn collide(
    a: &mut Ant,
    b: &mut Ant,
    collision_distance: f64,
    restitution: f64,
    rng: &mut RandomSource,
) {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let distance = dx.hypot(dy);

    if distance.is_nan() || distance >= collision_distance {
        return;
    }

    // Ants on top of each other have no direction between them, pick one at random.
    // The overlap stays the full collision distance so they end exactly that far apart.
    let normal = if distance == 0.0 {
        let angle = rng.uniform(0.0, TAU);
        (angle.cos(), angle.sin())
    } else {
        (dx / distance, dy / distance)
    };

    let correction = 0.5 * (collision_distance - distance);
    a.x += correction * normal.0;
    a.y += correction * normal.1;
    b.x -= correction * normal.0;
    b.y -= correction * normal.1;

    let closing_speed = (a.vx - b.vx) * normal.0 + (a.vy - b.vy) * normal.1;
    if closing_speed < 0.0 {
        let impulse = -(1.0 + restitution) * closing_speed / 2.0;
        a.vx += impulse * normal.0;
        a.vy += impulse * normal.1;
        b.vx -= impulse * normal.0;
        b.vy -= impulse * normal.1;
    }
}
