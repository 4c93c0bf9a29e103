use ants_forage::{AntView, Simulation};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute, queue,
    style::{Color, Print, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use std::io::{stdout, Write};

// Grid cells per terminal character along each axis
const BLOCK: usize = 2;
// Normalized intensity below which a trail is not drawn
const VISIBLE_SCENT: f64 = 0.05;

/// What a single terminal character shows.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
struct Tile {
    nest: bool,
    ants: usize,
    carrying: bool,
    food: bool,
    home_scent: f64,
    food_scent: f64,
}

impl Tile {
    fn char(&self) -> char {
        if self.nest {
            '0'
        } else if self.ants > 0 {
            match self.carrying {
                true => 'A',
                false => 'a',
            }
        } else if self.food {
            '*'
        } else if self.food_scent >= VISIBLE_SCENT && self.food_scent >= self.home_scent {
            '+'
        } else if self.home_scent >= VISIBLE_SCENT {
            '.'
        } else {
            ' '
        }
    }

    fn color(&self) -> Color {
        match self.char() {
            '0' => Color::Red,
            'A' => Color::Yellow,
            'a' => Color::DarkRed,
            '*' => Color::Grey,
            '+' => Color::White,
            '.' => Color::DarkYellow,
            _ => Color::Reset,
        }
    }
}

/// Draws the simulation to the terminal.
pub fn draw(simulation: &Simulation, dt: f64) -> std::io::Result<()> {
    let mut stdout = stdout();
    let state = simulation.state();

    // Display information about the run
    queue!(
        stdout,
        Clear(ClearType::All),
        MoveTo(0, 0),
        Hide,
        Print(format!("Food Delivered: {}\n", state.food_delivered)),
        Print(format!("Time Elapsed: {:.2}\n", state.elapsed)),
        Print(format!("dt: {:.3}\n", dt)),
        Print(format!(
            "Carrying: {}, Food Left: {}\n\n",
            state.carrying, state.food_remaining
        ))
    )?;

    let (columns, tiles) = tiles(simulation, &state.ants);
    for row in tiles.chunks(columns) {
        for tile in row {
            queue!(stdout, SetForegroundColor(tile.color()), Print(tile.char()))?;
        }
        queue!(stdout, Print("\n"))?;
    }
    queue!(stdout, SetForegroundColor(Color::Reset))?;

    stdout.flush()
}

/// Restores the cursor hidden while drawing.
pub fn restore() -> std::io::Result<()> {
    execute!(stdout(), Show)
}

// Downsamples every grid into blocks, returning the number of columns and the row-major tiles
fn tiles(simulation: &Simulation, ants: &[AntView]) -> (usize, Vec<Tile>) {
    let food = simulation.food();
    let home = simulation.home_pheromone();
    let trail = simulation.food_pheromone();
    let grid = food.grid();

    let columns = grid.width().div_ceil(BLOCK);
    let rows = grid.height().div_ceil(BLOCK);
    let mut tiles = vec![Tile::default(); columns * rows];

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let tile = &mut tiles[(row / BLOCK) * columns + col / BLOCK];
            tile.food |= food.cell(col, row);
            tile.home_scent = tile.home_scent.max(home.normalized(col, row));
            tile.food_scent = tile.food_scent.max(trail.normalized(col, row));
        }
    }

    let block_of = |x: f64, y: f64| {
        let width = grid.width();
        grid.index_of(x, y)
            .map(|index| (index / width / BLOCK) * columns + (index % width) / BLOCK)
    };

    for ant in ants {
        if let Some(index) = block_of(ant.x, ant.y) {
            tiles[index].ants += 1;
            tiles[index].carrying |= ant.carrying_food;
        }
    }

    let (nest_x, nest_y) = simulation.colony().nest();
    if let Some(index) = block_of(nest_x, nest_y) {
        tiles[index].nest = true;
    }

    (columns, tiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn when_a_tile_has_several_things_the_most_important_one_is_shown() {
        let tile = Tile {
            nest: false,
            ants: 2,
            carrying: true,
            food: true,
            home_scent: 1.0,
            food_scent: 1.0,
        };
        assert_eq!(tile.char(), 'A');

        let tile = Tile { ants: 0, ..tile };
        assert_eq!(tile.char(), '*');

        let tile = Tile {
            food: false,
            home_scent: 0.5,
            food_scent: 0.2,
            ..tile
        };
        assert_eq!(tile.char(), '.');
        assert_eq!(tile.color(), Color::DarkYellow);
    }

    #[test]
    fn when_a_tile_is_empty_nothing_is_drawn() {
        assert_eq!(Tile::default().char(), ' ');
        assert_eq!(Tile::default().color(), Color::Reset);
    }
}
