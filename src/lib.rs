//! **mazecarver** is a maze generation library: it carves perfect mazes with the
//! hunt-and-kill algorithm and hands the per-cell wall layout to an external renderer.

pub mod cells;
pub mod generators;
pub mod grid;
pub mod maze;
pub mod units;
#[cfg(test)]
mod utils;
