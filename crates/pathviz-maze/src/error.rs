use std::fmt;

use pathviz_core::{GridError, Point};

use crate::maze::MazeCell;

/// Errors that can occur when parsing a maze or loading it into a grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MazeError {
    /// A character other than `0`-`3` in a textual layout.
    Parse { line: usize, column: usize, ch: char },
    /// A row whose width differs from the first row.
    Ragged {
        line: usize,
        expected: usize,
        found: usize,
    },
    /// A numeric cell value outside `0..=3`.
    InvalidValue(u8),
    /// The maze does not fit inside the target grid.
    SizeMismatch { maze: Point, grid: i32 },
    /// A layout marks more than one start (or end) cell.
    DuplicateEndpoint {
        cell: MazeCell,
        first: Point,
        second: Point,
    },
    /// The underlying grid rejected a write.
    Grid(GridError),
}

impl fmt::Display for MazeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse { line, column, ch } => {
                write!(f, "maze: invalid cell {ch:?} at line {line}, column {column}")
            }
            Self::Ragged {
                line,
                expected,
                found,
            } => write!(
                f,
                "maze: line {line} has {found} cells, expected {expected}"
            ),
            Self::InvalidValue(v) => write!(f, "maze: invalid cell value {v}"),
            Self::SizeMismatch { maze, grid } => write!(
                f,
                "maze: {}x{} layout does not fit a {grid}x{grid} grid",
                maze.x, maze.y
            ),
            Self::DuplicateEndpoint {
                cell,
                first,
                second,
            } => write!(f, "maze: {cell:?} appears at both {first} and {second}"),
            Self::Grid(e) => write!(f, "maze: {e}"),
        }
    }
}

impl std::error::Error for MazeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Grid(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GridError> for MazeError {
    fn from(e: GridError) -> Self {
        Self::Grid(e)
    }
}
