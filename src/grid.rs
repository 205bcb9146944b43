use std::cmp;
use std::fmt;

use bit_set::BitSet;
use petgraph::graph::NodeIndex;
use petgraph::{Graph, Undirected};

use crate::cells::{self, CoordinateSmallVec, GridCoordinate, WallDirection, DIRECTIONS};
use crate::units::{ColumnsCount, RowsCount};

/// Smallest extent allowed on either axis. Requests below it are clamped up,
/// never rejected.
pub const MIN_DIMENSION: usize = 2;

/// Rectangular grid of cells with per-wall open/closed state and per-cell
/// visitation flags, owned exclusively by one generation run.
///
/// A passage between two adjacent cells is a single edge of an undirected
/// graph keyed by row-major cell index, so the wall is shared: opening it from
/// either side is the same update and both sides always agree. Edges are only
/// ever inserted - an opened wall never closes again within a run.
///
/// The entrance (0, 0) has its left boundary wall opened and the exit
/// (rows-1, columns-1) its right boundary wall, designated at construction
/// time independently of any carving.
pub struct Grid {
    graph: Graph<(), (), Undirected, u32>,
    visited: BitSet,
    rows: RowsCount,
    columns: ColumnsCount,
    entrance: GridCoordinate,
    exit: GridCoordinate,
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Grid :: rows: {:?}, columns: {:?}, open wall pairs: {:?}, visited cells: {:?}",
            self.rows,
            self.columns,
            self.links_count(),
            self.visited_count()
        )
    }
}

impl Grid {
    pub fn new(rows: RowsCount, columns: ColumnsCount) -> Grid {
        let rows = RowsCount(cmp::max(rows.0, MIN_DIMENSION));
        let columns = ColumnsCount(cmp::max(columns.0, MIN_DIMENSION));

        let cells_count = rows.0 * columns.0;
        let edges_count_hint = 2 * cells_count; // above the internal wall pair count for any rectangle

        let mut grid = Grid {
            graph: Graph::with_capacity(cells_count, edges_count_hint),
            visited: BitSet::with_capacity(cells_count),
            rows,
            columns,
            entrance: GridCoordinate::new(0, 0),
            exit: GridCoordinate::new(rows.0 as u32 - 1, columns.0 as u32 - 1),
        };
        for _ in 0..cells_count {
            let _ = grid.graph.add_node(());
        }

        grid
    }

    #[inline]
    pub fn rows(&self) -> RowsCount {
        self.rows
    }

    #[inline]
    pub fn columns(&self) -> ColumnsCount {
        self.columns
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.rows.0 * self.columns.0
    }

    /// Cell whose left boundary wall stands open as the way into the maze.
    #[inline]
    pub fn entrance(&self) -> GridCoordinate {
        self.entrance
    }

    /// Cell whose right boundary wall stands open as the way out.
    #[inline]
    pub fn exit(&self) -> GridCoordinate {
        self.exit
    }

    /// Is the grid coordinate within the grid's dimensions?
    #[inline]
    pub fn is_valid_coordinate(&self, coord: GridCoordinate) -> bool {
        (coord.row as usize) < self.rows.0 && (coord.column as usize) < self.columns.0
    }

    /// The adjacent cell in `direction`, or None at the grid boundary (or for
    /// an out-of-grid `coord`).
    pub fn neighbour_at_direction(
        &self,
        coord: GridCoordinate,
        direction: WallDirection,
    ) -> Option<GridCoordinate> {
        if !self.is_valid_coordinate(coord) {
            return None;
        }
        cells::offset_coordinate(coord, direction)
            .filter(|&neighbour_coord| self.is_valid_coordinate(neighbour_coord))
    }

    #[inline]
    pub fn neighbour_exists(&self, coord: GridCoordinate, direction: WallDirection) -> bool {
        self.neighbour_at_direction(coord, direction).is_some()
    }

    /// All cells adjacent to `coord`, in canonical direction order, whether or
    /// not a passage links them.
    pub fn neighbours(&self, coord: GridCoordinate) -> CoordinateSmallVec {
        DIRECTIONS
            .iter()
            .filter_map(|&direction| self.neighbour_at_direction(coord, direction))
            .collect()
    }

    pub fn is_visited(&self, coord: GridCoordinate) -> bool {
        self.grid_coordinate_to_index(coord)
            .map_or(false, |index| self.visited.contains(index))
    }

    /// Flag the cell as visited. Idempotent.
    ///
    /// Panics if the coordinate is outside the grid.
    pub fn mark_visited(&mut self, coord: GridCoordinate) {
        let index = self
            .grid_coordinate_to_index(coord)
            .unwrap_or_else(|| panic!("marking a cell outside the grid as visited: {:?}", coord));
        self.visited.insert(index);
    }

    /// How many cells have been visited so far this run.
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Does any adjacent cell remain unvisited? Directions are checked in the
    /// canonical up, down, left, right order.
    pub fn has_unvisited_neighbour(&self, coord: GridCoordinate) -> bool {
        DIRECTIONS.iter().any(|&direction| {
            self.neighbour_at_direction(coord, direction)
                .map_or(false, |neighbour_coord| !self.is_visited(neighbour_coord))
        })
    }

    /// Has any adjacent cell been visited? Same canonical check order.
    pub fn has_visited_neighbour(&self, coord: GridCoordinate) -> bool {
        DIRECTIONS.iter().any(|&direction| {
            self.neighbour_at_direction(coord, direction)
                .map_or(false, |neighbour_coord| self.is_visited(neighbour_coord))
        })
    }

    /// Open the wall on `coord`'s `direction` side. The matching wall on the
    /// neighbouring cell is the same shared edge, so both sides read as open
    /// afterwards. Opening an already open wall changes nothing.
    ///
    /// Panics if no neighbouring cell exists in that direction - callers must
    /// have checked first, so this is a broken-algorithm condition rather than
    /// a runtime error.
    pub fn open_wall(&mut self, coord: GridCoordinate, direction: WallDirection) {
        let a_index_opt = self.grid_coordinate_graph_index(coord);
        let b_index_opt = self
            .neighbour_at_direction(coord, direction)
            .and_then(|neighbour_coord| self.grid_coordinate_graph_index(neighbour_coord));

        match (a_index_opt, b_index_opt) {
            (Some(a_index), Some(b_index)) => {
                let _ = self.graph.update_edge(a_index, b_index, ());
            }
            _ => panic!(
                "no neighbouring cell to open a wall into: {:?} going {:?}",
                coord, direction
            ),
        }
    }

    /// Is the wall on `coord`'s `direction` side open?
    ///
    /// Internal walls are open when a carved passage links the two cells.
    /// Boundary walls are closed except for the designated entrance (left
    /// side) and exit (right side).
    pub fn is_wall_open(&self, coord: GridCoordinate, direction: WallDirection) -> bool {
        if !self.is_valid_coordinate(coord) {
            return false;
        }
        match self.neighbour_at_direction(coord, direction) {
            Some(neighbour_coord) => self.is_linked(coord, neighbour_coord),
            None => {
                (coord == self.entrance && direction == WallDirection::Left)
                    || (coord == self.exit && direction == WallDirection::Right)
            }
        }
    }

    /// Cells linked to `coord` by an open wall. None for an invalid coordinate.
    pub fn links(&self, coord: GridCoordinate) -> Option<CoordinateSmallVec> {
        self.grid_coordinate_graph_index(coord).map(|node_index| {
            self.graph
                .neighbors(node_index)
                .map(|linked_node| {
                    GridCoordinate::from_row_major_index(linked_node.index(), self.columns)
                })
                .collect()
        })
    }

    /// Are two cells joined by an open wall?
    pub fn is_linked(&self, a: GridCoordinate, b: GridCoordinate) -> bool {
        let a_index_opt = self.grid_coordinate_graph_index(a);
        let b_index_opt = self.grid_coordinate_graph_index(b);
        if let (Some(a_index), Some(b_index)) = (a_index_opt, b_index_opt) {
            self.graph.find_edge(a_index, b_index).is_some()
        } else {
            false
        }
    }

    /// Number of open internal wall pairs. A perfect maze over N cells has
    /// exactly N - 1 of them.
    #[inline]
    pub fn links_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Convert a grid coordinate to a one dimensional index in the range
    /// 0..grid.size(). Returns None if the grid coordinate is invalid.
    #[inline]
    pub fn grid_coordinate_to_index(&self, coord: GridCoordinate) -> Option<usize> {
        if self.is_valid_coordinate(coord) {
            Some(coord.row as usize * self.columns.0 + coord.column as usize)
        } else {
            None
        }
    }

    /// Row-major iterator over every cell coordinate.
    pub fn iter(&self) -> CellIter {
        CellIter {
            current_cell_number: 0,
            columns: self.columns,
            cells_count: self.size(),
        }
    }

    /// Iterator over the rows of the grid, each row a vec of coordinates.
    pub fn iter_row(&self) -> BatchIter {
        BatchIter {
            current_row: 0,
            rows: self.rows.0,
            columns: self.columns.0,
        }
    }

    #[inline]
    fn grid_coordinate_graph_index(&self, coord: GridCoordinate) -> Option<NodeIndex<u32>> {
        self.grid_coordinate_to_index(coord)
            .map(NodeIndex::<u32>::new)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct CellIter {
    current_cell_number: usize,
    columns: ColumnsCount,
    cells_count: usize,
}
impl Iterator for CellIter {
    type Item = GridCoordinate;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_cell_number < self.cells_count {
            let coord =
                GridCoordinate::from_row_major_index(self.current_cell_number, self.columns);
            self.current_cell_number += 1;
            Some(coord)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.cells_count - self.current_cell_number;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for CellIter {} // default impl using size_hint()

#[derive(Debug, Copy, Clone)]
pub struct BatchIter {
    current_row: usize,
    rows: usize,
    columns: usize,
}
impl Iterator for BatchIter {
    type Item = Vec<GridCoordinate>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row < self.rows {
            let coords = (0..self.columns)
                .map(|column| GridCoordinate::new(self.current_row as u32, column as u32))
                .collect();
            self.current_row += 1;
            Some(coords)
        } else {
            None
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.rows - self.current_row;
        (remaining, Some(remaining))
    }
}
impl ExactSizeIterator for BatchIter {}
