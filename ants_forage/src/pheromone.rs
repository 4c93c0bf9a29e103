use crate::grid::GridSpec;

/// Value returned when reading a pheromone map outside of its grid.
pub const OUT_OF_GRID: f64 = -1.0;

// Offsets of the 8-connected neighborhood, row by row
const NEIGHBORHOOD: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// A grid of non-negative scent intensities that decays exponentially over time.
#[derive(Clone, Debug, PartialEq)]
pub struct PheromoneMap {
    grid: GridSpec,
    max_intensity: f64,
    decay_factor: f64,
    values: Vec<f64>,
}

impl PheromoneMap {
    /// Creates an empty pheromone map.
    ///
    /// # Arguments
    /// * `grid` - The grid dimensions and cell size.
    /// * `max_intensity` - The intensity considered "full" when normalizing for display.
    /// * `decay_factor` - The fraction of scent retained per unit of time, in `(0, 1)`.
    pub fn new(grid: GridSpec, max_intensity: f64, decay_factor: f64) -> PheromoneMap {
        PheromoneMap {
            grid,
            max_intensity,
            decay_factor,
            values: vec![0.0; grid.len()],
        }
    }

    pub fn grid(&self) -> &GridSpec {
        &self.grid
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn max_intensity(&self) -> f64 {
        self.max_intensity
    }

    pub fn decay_factor(&self) -> f64 {
        self.decay_factor
    }

    /// All intensities in row-major order (`height` rows of `width` cells).
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Intensity of a cell addressed by grid coordinates, `None` out of bounds.
    pub fn cell(&self, col: usize, row: usize) -> Option<f64> {
        self.grid
            .index(col as i64, row as i64)
            .map(|index| self.values[index])
    }

    /// Intensity of a cell scaled to `[0, 1]` by the map's maximum intensity.
    pub fn normalized(&self, col: usize, row: usize) -> f64 {
        self.cell(col, row)
            .map_or(0.0, |value| (value / self.max_intensity).clamp(0.0, 1.0))
    }

    /// Raises the cell containing `(x, y)` to `value`.
    ///
    /// Writes never lower a cell, only decay does. Out of bounds writes are ignored.
    pub fn set_value(&mut self, x: f64, y: f64, value: f64) {
        if let Some(index) = self.grid.index_of(x, y) {
            if value > self.values[index] {
                self.values[index] = value;
            }
        }
    }

    /// Intensity of the cell containing `(x, y)`, or `None` outside of the grid.
    pub fn value_at(&self, x: f64, y: f64) -> Option<f64> {
        self.grid.index_of(x, y).map(|index| self.values[index])
    }

    /// Intensity of the cell containing `(x, y)`, or [`OUT_OF_GRID`] outside of the grid.
    pub fn get_value(&self, x: f64, y: f64) -> f64 {
        self.value_at(x, y).unwrap_or(OUT_OF_GRID)
    }

    /// Intensity-weighted average offset towards the neighbors of the cell containing `(x, y)`.
    ///
    /// Returns `(0, 0)` when no in-bounds neighbor carries any scent.
    pub fn weighted_direction(&self, x: f64, y: f64) -> (f64, f64) {
        let Some((col, row)) = self.grid.cell_of(x, y) else {
            return (0.0, 0.0);
        };

        let mut sum_dx = 0.0;
        let mut sum_dy = 0.0;
        let mut total = 0.0;

        for (dx, dy) in NEIGHBORHOOD {
            let neighbor = self
                .grid
                .index(col.saturating_add(dx), row.saturating_add(dy));
            if let Some(index) = neighbor {
                let value = self.values[index];
                sum_dx += dx as f64 * value;
                sum_dy += dy as f64 * value;
                total += value;
            }
        }

        if total > 0.0 {
            (sum_dx / total, sum_dy / total)
        } else {
            (0.0, 0.0)
        }
    }

    /// Decays every cell over `dt` units of time.
    ///
    /// Solves `dP/dt = -k P` with `k = -ln(decay_factor)` in closed form, so one step of `T`
    /// and many steps summing to `T` agree. Non-positive or non-finite steps are ignored.
    pub fn step(&mut self, dt: f64) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }

        let k = -self.decay_factor.ln();
        let retained = (-k * dt).exp();
        self.values.iter_mut().for_each(|value| *value *= retained);
    }
}

/// The two scent channels shared by every ant of a colony.
#[derive(Clone, Debug, PartialEq)]
pub struct Pheromones {
    /// Laid by ants looking for food, followed back by ants carrying food.
    pub home: PheromoneMap,
    /// Laid by ants carrying food, followed by ants looking for food.
    pub food: PheromoneMap,
}

impl Pheromones {
    pub fn new(grid: GridSpec, max_intensity: f64, decay_factor: f64) -> Pheromones {
        Pheromones {
            home: PheromoneMap::new(grid, max_intensity, decay_factor),
            food: PheromoneMap::new(grid, max_intensity, decay_factor),
        }
    }

    /// The map an ant follows given whether it carries food.
    pub fn followed_by(&self, carrying_food: bool) -> &PheromoneMap {
        match carrying_food {
            true => &self.home,
            false => &self.food,
        }
    }

    /// The map an ant marks given whether it carries food.
    pub fn marked_by(&mut self, carrying_food: bool) -> &mut PheromoneMap {
        match carrying_food {
            true => &mut self.food,
            false => &mut self.home,
        }
    }

    pub fn step(&mut self, dt: f64) {
        self.home.step(dt);
        self.food.step(dt);
    }
}
