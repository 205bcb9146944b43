use rand::{Rng, XorShiftRng};
use smallvec::SmallVec;

use crate::units::ColumnsCount;

/// Position of one cell in a rectangular grid, row 0 at the top and column 0 at
/// the left.
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug, Ord, PartialOrd)]
pub struct GridCoordinate {
    pub row: u32,
    pub column: u32,
}

impl GridCoordinate {
    pub fn new(row: u32, column: u32) -> GridCoordinate {
        GridCoordinate { row, column }
    }

    #[inline]
    pub fn from_row_major_index(index: usize, columns: ColumnsCount) -> GridCoordinate {
        let ColumnsCount(width) = columns;
        GridCoordinate::new((index / width) as u32, (index % width) as u32)
    }
}

impl From<(u32, u32)> for GridCoordinate {
    fn from(row_column_pair: (u32, u32)) -> GridCoordinate {
        GridCoordinate::new(row_column_pair.0, row_column_pair.1)
    }
}

pub type CoordinateSmallVec = SmallVec<[GridCoordinate; 4]>;

/// One of the four walls around a cell.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
pub enum WallDirection {
    Up,
    Down,
    Left,
    Right,
}

/// Canonical scan order for anything that checks the four neighbours of a cell.
pub const DIRECTIONS: [WallDirection; 4] = [
    WallDirection::Up,
    WallDirection::Down,
    WallDirection::Left,
    WallDirection::Right,
];

impl WallDirection {
    /// The direction facing back at us from the neighbouring cell, i.e. the
    /// other side of the same shared wall.
    pub fn opposite(self) -> WallDirection {
        match self {
            WallDirection::Up => WallDirection::Down,
            WallDirection::Down => WallDirection::Up,
            WallDirection::Left => WallDirection::Right,
            WallDirection::Right => WallDirection::Left,
        }
    }
}

/// Creates a new `GridCoordinate` offset 1 cell away in the given direction.
/// Returns None when the coordinate is not representable (above row zero or
/// left of column zero). Bounds checks on the other two sides belong to the
/// grid, which knows its own dimensions.
pub fn offset_coordinate(coord: GridCoordinate, dir: WallDirection) -> Option<GridCoordinate> {
    let (row, column) = (coord.row, coord.column);
    match dir {
        WallDirection::Up => {
            if row > 0 {
                Some(GridCoordinate::new(row - 1, column))
            } else {
                None
            }
        }
        WallDirection::Down => Some(GridCoordinate::new(row + 1, column)),
        WallDirection::Left => {
            if column > 0 {
                Some(GridCoordinate::new(row, column - 1))
            } else {
                None
            }
        }
        WallDirection::Right => Some(GridCoordinate::new(row, column + 1)),
    }
}

/// Sample one of the four directions uniformly, always drawing from the fixed
/// 0..4 enumeration. Callers that cannot use the sampled direction retry with
/// another draw rather than shrinking the candidate set.
pub fn rand_direction(rng: &mut XorShiftRng) -> WallDirection {
    DIRECTIONS[rng.gen::<usize>() % DIRECTIONS.len()]
}

#[cfg(test)]
mod tests {

    use rand::SeedableRng;

    use super::*;

    #[test]
    fn opposite_directions_pair_up() {
        for &dir in DIRECTIONS.iter() {
            assert_eq!(dir.opposite().opposite(), dir);
        }
        assert_eq!(WallDirection::Up.opposite(), WallDirection::Down);
        assert_eq!(WallDirection::Left.opposite(), WallDirection::Right);
    }

    #[test]
    fn offsets_move_one_cell() {
        let gc = |row, column| GridCoordinate::new(row, column);
        let from = gc(1, 1);
        assert_eq!(offset_coordinate(from, WallDirection::Up), Some(gc(0, 1)));
        assert_eq!(offset_coordinate(from, WallDirection::Down), Some(gc(2, 1)));
        assert_eq!(offset_coordinate(from, WallDirection::Left), Some(gc(1, 0)));
        assert_eq!(offset_coordinate(from, WallDirection::Right), Some(gc(1, 2)));
    }

    #[test]
    fn offsets_above_and_left_of_the_grid_are_unrepresentable() {
        let origin = GridCoordinate::new(0, 0);
        assert_eq!(offset_coordinate(origin, WallDirection::Up), None);
        assert_eq!(offset_coordinate(origin, WallDirection::Left), None);
        // Down and Right always produce a coordinate, valid or not.
        assert!(offset_coordinate(origin, WallDirection::Down).is_some());
        assert!(offset_coordinate(origin, WallDirection::Right).is_some());
    }

    #[test]
    fn row_major_index_to_coordinate() {
        let columns = ColumnsCount(3);
        let coords: Vec<GridCoordinate> = (0..6)
            .map(|index| GridCoordinate::from_row_major_index(index, columns))
            .collect();
        assert_eq!(
            coords,
            &[
                GridCoordinate::new(0, 0),
                GridCoordinate::new(0, 1),
                GridCoordinate::new(0, 2),
                GridCoordinate::new(1, 0),
                GridCoordinate::new(1, 1),
                GridCoordinate::new(1, 2),
            ]
        );
    }

    #[test]
    fn rand_direction_covers_all_four() {
        let mut rng = XorShiftRng::from_seed([0x1234_5678, 0x9abc_def0, 0x0fed_cba9, 0x8765_4321]);
        let mut seen = [false; 4];
        for _ in 0..100 {
            match rand_direction(&mut rng) {
                WallDirection::Up => seen[0] = true,
                WallDirection::Down => seen[1] = true,
                WallDirection::Left => seen[2] = true,
                WallDirection::Right => seen[3] = true,
            }
        }
        assert!(seen.iter().all(|&direction_seen| direction_seen));
    }
}
