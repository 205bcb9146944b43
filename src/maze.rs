use std::fmt;

use rand::XorShiftRng;
use serde_derive::{Deserialize, Serialize};

use crate::cells::{GridCoordinate, WallDirection};
use crate::generators;
use crate::grid::Grid;
use crate::units::{ColumnsCount, RowsCount};

/// Open/closed state of the four walls around one cell. A wall reads as open
/// on both of the cells that share it.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellWalls {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// A finished maze as handed to a rendering collaborator: the wall flags of
/// every cell in row-major order. Plain owned data with no tie to the grid or
/// the generation run that produced it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Maze {
    rows: usize,
    columns: usize,
    walls: Vec<CellWalls>,
}

impl Maze {
    /// Snapshot the wall state of a carved grid.
    pub fn from_grid(grid: &Grid) -> Maze {
        let walls = grid
            .iter()
            .map(|coord| CellWalls {
                up: grid.is_wall_open(coord, WallDirection::Up),
                down: grid.is_wall_open(coord, WallDirection::Down),
                left: grid.is_wall_open(coord, WallDirection::Left),
                right: grid.is_wall_open(coord, WallDirection::Right),
            })
            .collect();

        Maze {
            rows: grid.rows().0,
            columns: grid.columns().0,
            walls,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Every cell's wall flags in row-major order.
    #[inline]
    pub fn walls(&self) -> &[CellWalls] {
        &self.walls
    }

    /// Wall flags of one cell.
    ///
    /// Panics if the coordinate lies outside the maze.
    pub fn walls_at(&self, coord: GridCoordinate) -> CellWalls {
        assert!(
            (coord.row as usize) < self.rows && (coord.column as usize) < self.columns,
            "coordinate outside the maze: {:?}",
            coord
        );
        self.walls[coord.row as usize * self.columns + coord.column as usize]
    }

    /// Number of open wall pairs between adjacent cells, counting each shared
    /// wall once and ignoring the entrance/exit boundary openings. A perfect
    /// maze over N cells has exactly N - 1.
    pub fn open_internal_wall_pairs(&self) -> usize {
        let mut count = 0;
        for (index, cell_walls) in self.walls.iter().enumerate() {
            let coord = GridCoordinate::from_row_major_index(index, ColumnsCount(self.columns));
            if cell_walls.right && (coord.column as usize) + 1 < self.columns {
                count += 1;
            }
            if cell_walls.down && (coord.row as usize) + 1 < self.rows {
                count += 1;
            }
        }
        count
    }
}

impl fmt::Display for Maze {
    /// ASCII rendering of the wall layout, one `+---+` bordered row of cells
    /// per grid row, with gaps where walls are open. The entrance gap shows on
    /// the left of the top row and the exit gap on the right of the bottom row.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut output = String::new();

        for column in 0..self.columns {
            let cell_walls = self.walls_at(GridCoordinate::new(0, column as u32));
            output.push('+');
            output.push_str(if cell_walls.up { "   " } else { "---" });
        }
        output.push_str("+\n");

        for row in 0..self.rows {
            let leftmost = self.walls_at(GridCoordinate::new(row as u32, 0));
            output.push(if leftmost.left { ' ' } else { '|' });
            for column in 0..self.columns {
                let cell_walls = self.walls_at(GridCoordinate::new(row as u32, column as u32));
                output.push_str("   ");
                output.push(if cell_walls.right { ' ' } else { '|' });
            }
            output.push('\n');

            for column in 0..self.columns {
                let cell_walls = self.walls_at(GridCoordinate::new(row as u32, column as u32));
                output.push('+');
                output.push_str(if cell_walls.down { "   " } else { "---" });
            }
            output.push_str("+\n");
        }

        write!(f, "{}", output)
    }
}

/// Generate a perfect maze of the requested dimensions.
///
/// Each axis is clamped to the 2 cell minimum; there is no explicit maximum.
/// Every call builds a fresh grid, so regeneration fully discards any earlier
/// maze.
pub fn generate(rows: usize, columns: usize) -> Maze {
    generate_with_rng(rows, columns, &mut rand::weak_rng())
}

/// Same as [`generate`] but drawing randomness from the caller's generator.
/// Two calls with equal dimensions and identically seeded generators produce
/// identical mazes.
pub fn generate_with_rng(rows: usize, columns: usize, rng: &mut XorShiftRng) -> Maze {
    let mut grid = Grid::new(RowsCount(rows), ColumnsCount(columns));
    generators::hunt_and_kill(&mut grid, rng);
    Maze::from_grid(&grid)
}

/// Best-effort parse of user-supplied dimension text.
///
/// Integer text is taken at face value - negative sizes parse and then fall
/// through to the minimum size clamp in the grid, like any other undersized
/// request. Text that is not an integer at all keeps `fallback`, the previous
/// or default value; nothing here ever errors back to the caller.
pub fn parse_dimension(text: &str, fallback: usize) -> usize {
    match text.trim().parse::<i64>() {
        Ok(requested) if requested >= 0 => requested as usize,
        Ok(_) => 0,
        Err(_) => fallback,
    }
}
