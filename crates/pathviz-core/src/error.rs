//! Errors raised by grid construction and coordinate lookups.

use std::fmt;

use crate::geom::Point;

/// Errors that can occur when building or addressing a [`Grid`](crate::Grid).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridError {
    /// The row count is zero/negative, or the pixel width is too small to
    /// give each cell at least one pixel.
    InvalidSize { rows: i32, pixel_width: i32 },
    /// A coordinate fell outside `[0, size)` on either axis.
    OutOfBounds { pos: Point, size: i32 },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidSize { rows, pixel_width } => write!(
                f,
                "grid: cannot lay out {rows} rows in {pixel_width} pixels"
            ),
            Self::OutOfBounds { pos, size } => {
                write!(f, "grid: cell {pos} is outside the {size}x{size} grid")
            }
        }
    }
}

impl std::error::Error for GridError {}
