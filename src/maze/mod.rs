//! Maze definitions.
//!
//! This module turns uploaded maze text into validated, immutable
//! [`MazeDefinition`]s and stores them in a [`MazeRegistry`].

mod cell;
mod grid;
mod registry;

pub use cell::{Cell, Direction, Position, UnknownDirection};
pub use grid::{
    normalize_line_endings, parse_grid, Grid, InvalidMazeReason, ParsedMaze, MAX_DIMENSION,
    MAX_MAZE_BYTES, MIN_DIMENSION,
};
pub use registry::{MazeDefinition, MazeId, MazeRegistry};
