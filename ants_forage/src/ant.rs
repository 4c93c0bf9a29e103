use crate::config::AntParams;
use crate::grid::GridSpec;
use crate::pheromone::{PheromoneMap, Pheromones};
use crate::rng::RandomSource;

/// A single forager.
///
/// An ant is either looking for food or carrying food back to the nest. While looking it
/// lays "home" scent and follows "food" scent, while carrying it does the opposite.
#[derive(Clone, Debug, PartialEq)]
pub struct Ant {
    pub(crate) x: f64,
    pub(crate) y: f64,
    pub(crate) vx: f64,
    pub(crate) vy: f64,
    pub(crate) last_cell: Option<(i64, i64)>,
    pub(crate) carrying_food: bool,
    pub(crate) home_scent: f64,
    pub(crate) food_scent: f64,
    pub(crate) idle_ticks: u32,
}

impl Ant {
    /// Creates an ant that is looking for food.
    ///
    /// # Arguments
    /// * `x`, `y` - The starting world position.
    /// * `velocity` - The starting velocity.
    /// * `params` - The behaviour parameters, only the initial scent strength is used.
    /// * `grid` - The grid used to track which cell the ant occupies.
    pub fn new(x: f64, y: f64, velocity: (f64, f64), params: &AntParams, grid: &GridSpec) -> Ant {
        Ant {
            x,
            y,
            vx: velocity.0,
            vy: velocity.1,
            last_cell: grid.cell_of(x, y),
            carrying_food: false,
            home_scent: params.initial_scent,
            food_scent: params.initial_scent,
            idle_ticks: 0,
        }
    }

    /// Creates an ant at `(x, y)` with a normally distributed random velocity.
    pub fn spawn(
        x: f64,
        y: f64,
        params: &AntParams,
        grid: &GridSpec,
        rng: &mut RandomSource,
    ) -> Ant {
        let vx = rng.normal(0.0, 1.0);
        let vy = rng.normal(0.0, 1.0);
        Ant::new(x, y, (vx, vy), params, grid)
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn velocity(&self) -> (f64, f64) {
        (self.vx, self.vy)
    }

    pub fn carrying_food(&self) -> bool {
        self.carrying_food
    }

    pub fn home_scent(&self) -> f64 {
        self.home_scent
    }

    pub fn food_scent(&self) -> f64 {
        self.food_scent
    }

    pub fn idle_ticks(&self) -> u32 {
        self.idle_ticks
    }

    /// Advances the ant by `dt`: wander, steer along scent, bounce off the edges, move and mark.
    pub fn step(
        &mut self,
        dt: f64,
        pheromones: &mut Pheromones,
        params: &AntParams,
        rng: &mut RandomSource,
    ) {
        self.wander(dt, params, rng);

        if self.idle_ticks > 0 {
            self.idle_ticks -= 1;
        } else {
            self.steer(dt, pheromones.followed_by(self.carrying_food), params, rng);
        }

        let grid = *pheromones.home.grid();
        self.repel_from_edges(&grid, params.edge_margin);

        self.vx = self.vx.clamp(-1.0, 1.0);
        self.vy = self.vy.clamp(-1.0, 1.0);

        self.x += self.vx * dt;
        self.y += self.vy * dt;

        self.deposit(&grid, pheromones, params);
    }

    pub(crate) fn pick_up_food(&mut self, initial_scent: f64) {
        self.carrying_food = true;
        self.food_scent = initial_scent;
    }

    pub(crate) fn deliver_food(&mut self, initial_scent: f64) {
        self.carrying_food = false;
        self.home_scent = initial_scent;
    }

    fn wander(&mut self, dt: f64, params: &AntParams, rng: &mut RandomSource) {
        if rng.draw01() > params.wander_chance {
            self.vx += rng.normal(0.0, 1.0) * dt;
        }
        if rng.draw01() > params.wander_chance {
            self.vy += rng.normal(0.0, 1.0) * dt;
        }
        if rng.draw01() > 1.0 - params.idle_chance {
            let ticks = rng.randint(0, params.max_idle_ticks as i64) as u32;
            self.idle_ticks = self.idle_ticks.saturating_add(ticks);
        }
    }

    fn steer(&mut self, dt: f64, scent: &PheromoneMap, params: &AntParams, rng: &mut RandomSource) {
        let (dx, dy) = scent.weighted_direction(self.x, self.y);
        self.vx += dx * rng.uniform(0.0, params.steering_gain) * dt;
        self.vy += dy * rng.uniform(0.0, params.steering_gain) * dt;
    }

    fn repel_from_edges(&mut self, grid: &GridSpec, margin: f64) {
        if self.x < margin {
            self.vx = 1.0;
        }
        if self.x > grid.world_width() - margin {
            self.vx = -1.0;
        }
        if self.y < margin {
            self.vy = 1.0;
        }
        if self.y > grid.world_height() - margin {
            self.vy = -1.0;
        }
    }

    // Only mark when entering a new cell, weakening the scent with every mark
    fn deposit(&mut self, grid: &GridSpec, pheromones: &mut Pheromones, params: &AntParams) {
        let cell = grid.cell_of(self.x, self.y);

        if cell != self.last_cell {
            let scent = match self.carrying_food {
                true => &mut self.food_scent,
                false => &mut self.home_scent,
            };
            pheromones
                .marked_by(self.carrying_food)
                .set_value(self.x, self.y, *scent);
            *scent *= params.scent_use_rate;
        }

        self.last_cell = cell;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f64 = 0.45;

    fn grid() -> GridSpec {
        GridSpec::new(150, 100, 4.0)
    }

    fn pheromones() -> Pheromones {
        Pheromones::new(grid(), 100.0, 0.999)
    }

    // Parameters that never wander or idle, so only steering and physics move the ant
    fn calm() -> AntParams {
        AntParams {
            wander_chance: 1.0,
            idle_chance: 0.0,
            ..AntParams::default()
        }
    }

    fn ant(x: f64, y: f64, velocity: (f64, f64)) -> Ant {
        Ant::new(x, y, velocity, &calm(), &grid())
    }

    #[test]
    fn when_spawning_an_ant_its_velocity_comes_from_two_normal_draws() {
        let mut rng = RandomSource::new(42);
        let mut expected = rng.clone();

        let ant = Ant::spawn(300.0, 200.0, &AntParams::default(), &grid(), &mut rng);

        assert_eq!(ant.velocity().0, expected.normal(0.0, 1.0));
        assert_eq!(ant.velocity().1, expected.normal(0.0, 1.0));
        assert_eq!(rng, expected);
        assert!(!ant.carrying_food());
        assert_eq!(ant.home_scent(), 100.0);
        assert_eq!(ant.food_scent(), 100.0);
    }

    #[test]
    fn when_an_ant_is_near_the_left_edge_it_is_pushed_right() {
        let mut ant = ant(1.0, 200.0, (-1.0, 0.0));

        ant.step(DT, &mut pheromones(), &calm(), &mut RandomSource::new(1));

        assert_eq!(ant.velocity().0, 1.0);
        assert!((ant.x() - 1.45).abs() < 1e-12);
    }

    #[test]
    fn when_an_ant_is_near_the_bottom_or_right_edge_it_is_pushed_back() {
        let mut ant = ant(599.0, 399.0, (1.0, 1.0));

        ant.step(DT, &mut pheromones(), &calm(), &mut RandomSource::new(1));

        assert_eq!(ant.velocity(), (-1.0, -1.0));
        assert!(ant.x() < 599.0);
        assert!(ant.y() < 399.0);
    }

    #[test]
    fn when_an_ant_moves_too_fast_its_velocity_is_clamped() {
        let mut ant = ant(300.0, 200.0, (5.0, -7.0));

        ant.step(DT, &mut pheromones(), &calm(), &mut RandomSource::new(1));

        assert_eq!(ant.velocity(), (1.0, -1.0));
        assert!((ant.x() - 300.45).abs() < 1e-12);
        assert!((ant.y() - 199.55).abs() < 1e-12);
    }

    #[test]
    fn when_an_ant_enters_a_new_cell_it_marks_home_scent_and_weakens_it() {
        let mut pheromones = pheromones();
        let mut ant = ant(3.9, 10.0, (1.0, 0.0));

        ant.step(DT, &mut pheromones, &calm(), &mut RandomSource::new(1));

        assert_eq!(pheromones.home.get_value(ant.x(), ant.y()), 100.0);
        assert_eq!(pheromones.food.get_value(ant.x(), ant.y()), 0.0);
        assert!((ant.home_scent() - 99.5).abs() < 1e-12);
    }

    #[test]
    fn when_an_ant_stays_in_its_cell_it_does_not_mark() {
        let mut pheromones = pheromones();
        let mut ant = ant(5.0, 10.0, (1.0, 0.0));

        ant.step(DT, &mut pheromones, &calm(), &mut RandomSource::new(1));

        assert!(pheromones.home.values().iter().all(|value| *value == 0.0));
        assert_eq!(ant.home_scent(), 100.0);
    }

    #[test]
    fn when_an_ant_carrying_food_enters_a_new_cell_it_marks_food_scent() {
        let mut pheromones = pheromones();
        let mut ant = ant(3.9, 10.0, (1.0, 0.0));
        ant.pick_up_food(80.0);

        ant.step(DT, &mut pheromones, &calm(), &mut RandomSource::new(1));

        assert_eq!(pheromones.food.get_value(ant.x(), ant.y()), 80.0);
        assert_eq!(pheromones.home.get_value(ant.x(), ant.y()), 0.0);
        assert!((ant.food_scent() - 80.0 * 0.995).abs() < 1e-12);
    }

    #[test]
    fn when_an_ant_carries_food_it_steers_along_home_scent() {
        let mut pheromones = pheromones();
        // East neighbor of the cell containing (300, 200)
        pheromones.home.set_value(304.0, 200.0, 50.0);
        pheromones.food.set_value(296.0, 200.0, 50.0);
        let mut ant = ant(300.0, 200.0, (0.0, 0.0));
        ant.pick_up_food(100.0);

        ant.step(DT, &mut pheromones, &calm(), &mut RandomSource::new(1));

        assert!(ant.velocity().0 > 0.0);
        assert_eq!(ant.velocity().1, 0.0);
    }

    #[test]
    fn when_an_ant_looks_for_food_it_steers_along_food_scent() {
        let mut pheromones = pheromones();
        pheromones.home.set_value(304.0, 200.0, 50.0);
        pheromones.food.set_value(296.0, 200.0, 50.0);
        let mut ant = ant(300.0, 200.0, (0.0, 0.0));

        ant.step(DT, &mut pheromones, &calm(), &mut RandomSource::new(1));

        assert!(ant.velocity().0 < 0.0);
        assert_eq!(ant.velocity().1, 0.0);
    }

    #[test]
    fn when_an_ant_is_idle_it_ignores_scent_and_counts_down() {
        let mut pheromones = pheromones();
        pheromones.food.set_value(296.0, 200.0, 50.0);
        let mut ant = ant(300.0, 200.0, (0.0, 0.0));
        ant.idle_ticks = 3;

        ant.step(DT, &mut pheromones, &calm(), &mut RandomSource::new(1));

        assert_eq!(ant.idle_ticks(), 2);
        assert_eq!(ant.velocity(), (0.0, 0.0));
    }

    #[test]
    fn when_an_ant_always_gets_bored_it_accumulates_idle_ticks_within_bounds() {
        let params = AntParams {
            wander_chance: 1.0,
            idle_chance: 1.0,
            ..AntParams::default()
        };
        let mut pheromones = pheromones();
        let mut ant = ant(300.0, 200.0, (0.0, 0.0));
        let mut rng = RandomSource::new(5);

        for tick in 1..=10u32 {
            ant.step(DT, &mut pheromones, &params, &mut rng);
            assert!(ant.idle_ticks() <= tick * params.max_idle_ticks);
        }
    }

    #[test]
    fn when_an_ant_gets_bored_with_an_unbounded_idle_limit_the_counter_saturates() {
        let params = AntParams {
            wander_chance: 1.0,
            idle_chance: 1.0,
            max_idle_ticks: u32::MAX,
            ..AntParams::default()
        };
        let mut pheromones = pheromones();
        let mut ant = ant(300.0, 200.0, (0.0, 0.0));
        let mut rng = RandomSource::new(42);

        for _ in 0..50 {
            ant.step(DT, &mut pheromones, &params, &mut rng);
        }

        assert!(ant.idle_ticks() > u32::MAX / 2);
        assert_eq!(ant.velocity(), (0.0, 0.0));
    }

    #[test]
    fn when_an_ant_wanders_its_velocity_stays_within_bounds() {
        let params = AntParams::default();
        let mut pheromones = pheromones();
        let mut rng = RandomSource::new(42);
        let mut ant = Ant::spawn(300.0, 200.0, &params, &grid(), &mut rng);

        for _ in 0..2000 {
            ant.step(DT, &mut pheromones, &params, &mut rng);
            let (vx, vy) = ant.velocity();
            assert!((-1.0..=1.0).contains(&vx));
            assert!((-1.0..=1.0).contains(&vy));
            assert!(ant.x() > -1.0 && ant.x() < 601.0);
            assert!(ant.y() > -1.0 && ant.y() < 401.0);
        }
    }
}
