/// World units per grid cell used when no cell size is configured.
pub const DEFAULT_CELL_SIZE: f64 = 4.0;

/// Dimensions of a grid and the mapping between world coordinates and cells.
///
/// Both the pheromone maps and the food field own one of these, so the
/// world-to-cell conversion lives in exactly one place.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    width: usize,
    height: usize,
    cell_size: f64,
}

impl GridSpec {
    /// Creates a grid of `width` by `height` cells, each `cell_size` world units wide.
    pub fn new(width: usize, height: usize, cell_size: f64) -> GridSpec {
        GridSpec {
            width,
            height,
            cell_size,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    pub fn len(&self) -> usize {
        self.width * self.height
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Width of the grid in world units.
    pub fn world_width(&self) -> f64 {
        self.width as f64 * self.cell_size
    }

    /// Height of the grid in world units.
    pub fn world_height(&self) -> f64 {
        self.height as f64 * self.cell_size
    }

    /// Maps a world coordinate to its (possibly out of bounds) cell.
    ///
    /// Returns `None` for non-finite coordinates since they have no cell at all.
    pub fn cell_of(&self, x: f64, y: f64) -> Option<(i64, i64)> {
        if !x.is_finite() || !y.is_finite() {
            return None;
        }

        // Float to int casts saturate, so huge coordinates land far outside the grid
        Some((
            (x / self.cell_size).floor() as i64,
            (y / self.cell_size).floor() as i64,
        ))
    }

    /// Index into a row-major buffer for a cell, or `None` if the cell is out of bounds.
    pub fn index(&self, col: i64, row: i64) -> Option<usize> {
        if col < 0 || row < 0 || col >= self.width as i64 || row >= self.height as i64 {
            return None;
        }

        Some(row as usize * self.width + col as usize)
    }

    /// Index into a row-major buffer for the cell containing a world coordinate.
    pub fn index_of(&self, x: f64, y: f64) -> Option<usize> {
        self.cell_of(x, y)
            .and_then(|(col, row)| self.index(col, row))
    }
}
