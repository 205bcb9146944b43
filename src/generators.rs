use rand::XorShiftRng;

use crate::cells::{self, GridCoordinate};
use crate::grid::Grid;

/// Which part of the hunt-and-kill run executes next.
#[derive(Eq, PartialEq, Copy, Clone, Debug)]
enum Phase {
    Killing,
    Hunting,
    Done,
}

/// Walk state for one generation run: the carving cursor plus the phase the
/// run is in. Built fresh per run, never reused across runs.
#[derive(Debug, Copy, Clone)]
struct CarveState {
    cursor: GridCoordinate,
    phase: Phase,
}

/// Apply the hunt-and-kill maze generation algorithm to a grid.
///
/// The walk starts at the top left cell, which is marked visited up front, and
/// alternates two phases. The kill phase is a random depth-first walk: open a
/// wall into a randomly chosen unvisited neighbour, step through it, repeat
/// until the cursor cell has no unvisited neighbour left. The hunt phase then
/// scans the grid in row-major order for the first unvisited cell adjacent to
/// the carved region, joins it to the region through exactly one wall and
/// resumes killing from there. When a full hunt scan finds nothing the maze is
/// complete.
///
/// Every cell joins the carved region through exactly one opened wall at the
/// moment it is first visited, so the passages form a spanning tree over the
/// cells: a perfect maze. Each hunt either grows the visited set or ends the
/// run, which bounds the whole run by the cell count.
pub fn hunt_and_kill(grid: &mut Grid, rng: &mut XorShiftRng) {
    let mut state = CarveState {
        cursor: GridCoordinate::new(0, 0),
        phase: Phase::Killing,
    };
    grid.mark_visited(state.cursor);

    loop {
        match state.phase {
            Phase::Killing => kill(grid, &mut state, rng),
            Phase::Hunting => hunt(grid, &mut state, rng),
            Phase::Done => break,
        }
    }
}

/// Random walk from the cursor until it is stuck.
///
/// Directions are sampled uniformly over all four compass options rather than
/// over the currently carvable subset; a pick that leaves the grid or lands on
/// a visited cell just does not advance the walk. Over the retries this still
/// carves uniformly over the carvable directions, it only costs extra draws.
fn kill(grid: &mut Grid, state: &mut CarveState, rng: &mut XorShiftRng) {
    while grid.has_unvisited_neighbour(state.cursor) {
        let direction = cells::rand_direction(rng);
        if let Some(neighbour_coord) = grid.neighbour_at_direction(state.cursor, direction) {
            if !grid.is_visited(neighbour_coord) {
                grid.open_wall(state.cursor, direction);
                grid.mark_visited(neighbour_coord);
                state.cursor = neighbour_coord;
            }
        }
    }
    state.phase = Phase::Hunting;
}

/// Scan the grid row by row for the first unvisited cell with a visited
/// neighbour. That cell is marked, joined to the carved region through one
/// randomly chosen wall and becomes the new cursor; the scan stops at the
/// first hit. A scan without a hit means every cell is connected and the run
/// is done.
fn hunt(grid: &mut Grid, state: &mut CarveState, rng: &mut XorShiftRng) {
    for coord in grid.iter() {
        if grid.is_visited(coord) || !grid.has_visited_neighbour(coord) {
            continue;
        }

        grid.mark_visited(coord);

        // At least one visited neighbour exists, so resampling terminates.
        loop {
            let direction = cells::rand_direction(rng);
            if let Some(neighbour_coord) = grid.neighbour_at_direction(coord, direction) {
                if grid.is_visited(neighbour_coord) {
                    grid.open_wall(coord, direction);
                    break;
                }
            }
        }

        state.cursor = coord;
        state.phase = Phase::Killing;
        return;
    }

    state.phase = Phase::Done;
}
