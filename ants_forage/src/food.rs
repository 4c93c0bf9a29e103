use crate::grid::GridSpec;

/// Side length, in cells, of the square block placed by [`FoodField::add_food`].
pub const FOOD_BLOCK_SIZE: i64 = 5;

/// A grid recording which cells currently hold food.
#[derive(Clone, Debug)]
pub struct FoodField {
    grid: GridSpec,
    present: Vec<bool>,
}

impl FoodField {
    pub fn new(grid: GridSpec) -> FoodField {
        FoodField {
            grid,
            present: vec![false; grid.len()],
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

    /// Presence flags in row-major order (`height` rows of `width` cells).
    pub fn cells(&self) -> &[bool] {
        &self.present
    }

    /// Whether the cell at grid coordinates holds food, `false` out of bounds.
    pub fn cell(&self, col: usize, row: usize) -> bool {
        self.grid
            .index(col as i64, row as i64)
            .is_some_and(|index| self.present[index])
    }

    /// Places a 5x5 block of food whose top-left cell contains `(x, y)`.
    ///
    /// The block is clipped to the grid. Returns how many cells went from empty to full.
    pub fn add_food(&mut self, x: f64, y: f64) -> usize {
        let Some((col, row)) = self.grid.cell_of(x, y) else {
            return 0;
        };

        let mut placed = 0;
        for i in row.max(0)..row.saturating_add(FOOD_BLOCK_SIZE).min(self.height() as i64) {
            for j in col.max(0)..col.saturating_add(FOOD_BLOCK_SIZE).min(self.width() as i64) {
                if let Some(index) = self.grid.index(j, i) {
                    if !self.present[index] {
                        self.present[index] = true;
                        placed += 1;
                    }
                }
            }
        }

        placed
    }

    /// Consumes the food in the single cell containing `(x, y)`.
    ///
    /// Returns whether there was food to consume.
    pub fn bite(&mut self, x: f64, y: f64) -> bool {
        match self.grid.index_of(x, y) {
            Some(index) => std::mem::replace(&mut self.present[index], false),
            None => false,
        }
    }

    /// Whether the cell containing `(x, y)` holds food, `false` outside of the grid.
    pub fn get_value(&self, x: f64, y: f64) -> bool {
        self.grid
            .index_of(x, y)
            .is_some_and(|index| self.present[index])
    }

    /// Number of cells still holding food.
    pub fn remaining(&self) -> usize {
        self.present.iter().filter(|present| **present).count()
    }

    pub fn is_empty(&self) -> bool {
        !self.present.iter().any(|present| *present)
    }
}
