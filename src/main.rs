use std::{fs::File, io, io::prelude::*};

use docopt::Docopt;
use itertools::Itertools;
use rand::{SeedableRng, XorShiftRng};
use serde_derive::Deserialize;

use mazecarver::grid::MIN_DIMENSION;
use mazecarver::maze::{self, Maze};

const USAGE: &str = "Mazecarver

Usage:
    mazecarver_driver -h | --help
    mazecarver_driver [--rows=<r>] [--columns=<c>] [--seed=<n>] [--text-out=<path>] [--walls-out=<path>]

Options:
    -h --help           Show this screen.
    --rows=<r>          Cell rows in the maze [default: 12]. Text that does not parse as a number falls back to the 2 cell minimum.
    --columns=<c>       Cell columns in the maze [default: 12]. Same fallback as --rows.
    --seed=<n>          Unsigned integer seed for a reproducible maze.
    --text-out=<path>   Write the wall rendering to a text file instead of stdout.
    --walls-out=<path>  Write the per-cell wall flags to a text file for an external renderer.
";

#[derive(Debug, Deserialize)]
struct DriverArgs {
    flag_rows: String,
    flag_columns: String,
    flag_seed: Option<u64>,
    flag_text_out: String,
    flag_walls_out: String,
}

// We'll put our errors in an `errors` module; `error_chain!` creates the
// Error, ErrorKind, ResultExt and Result types and the From conversions that
// let `?` and `chain_err` work with them.
mod errors {
    use error_chain::*;
    error_chain! {
        foreign_links {
            Io(::std::io::Error);
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {
    let args: DriverArgs = Docopt::new(USAGE)
        .and_then(|d| d.deserialize())
        .unwrap_or_else(|e| e.exit());

    // Regeneration input contract: raw user text, best effort. Junk keeps the
    // default minimum size rather than failing the run.
    let rows = maze::parse_dimension(&args.flag_rows, MIN_DIMENSION);
    let columns = maze::parse_dimension(&args.flag_columns, MIN_DIMENSION);

    let maze = match args.flag_seed {
        Some(seed) => maze::generate_with_rng(rows, columns, &mut seeded_rng(seed)),
        None => maze::generate(rows, columns),
    };

    if args.flag_text_out.is_empty() {
        println!("{}", maze);
    } else {
        write_text_to_file(&format!("{}", maze), &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    if !args.flag_walls_out.is_empty() {
        save_wall_flags(&maze, &args.flag_walls_out)?;
    }

    Ok(())
}

fn seeded_rng(seed: u64) -> XorShiftRng {
    // xorshift rejects an all-zero seed; the filler words keep any u64 seed valid
    XorShiftRng::from_seed([
        seed as u32,
        (seed >> 32) as u32,
        0x9e37_79b9,
        0x85eb_ca6b,
    ])
}

/// Serialize the wall flags to a text file. Line 1: rows and columns. One line
/// per cell after that, row-major, with the up/down/left/right open flags as
/// 1 or 0.
fn save_wall_flags(maze: &Maze, file_path: &str) -> Result<()> {
    let mut wall_data = String::new();
    wall_data.push_str(&format!("{} {}\n", maze.rows(), maze.columns()));

    for cell_walls in maze.walls() {
        let flags_line = [
            cell_walls.up,
            cell_walls.down,
            cell_walls.left,
            cell_walls.right,
        ]
        .iter()
        .map(|&open| if open { "1" } else { "0" })
        .join(" ");
        wall_data.push_str(&flags_line);
        wall_data.push('\n');
    }

    write_text_to_file(&wall_data, file_path)
        .chain_err(|| format!("Failed to write wall flags to text file {}", file_path))?;

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
