//! **pathviz-core**: the grid model behind the pathviz visualizer.
//!
//! This crate owns the data every other pathviz crate works on: geometry
//! primitives, the per-cell [`CellState`] tag, the square [`Grid`] with its
//! derived adjacency lists, pixel-to-cell mapping and a cooperative
//! [`CancelToken`]. It knows nothing about searching or drawing.

pub mod cell;
pub mod context;
pub mod error;
pub mod geom;
pub mod grid;
pub mod style;

pub use cell::CellState;
pub use context::CancelToken;
pub use error::GridError;
pub use geom::{Point, Range};
pub use grid::{Grid, map_point_to_cell};
pub use style::Color;

/// Default number of rows (and columns) of a grid.
pub const DEFAULT_ROWS: i32 = 50;

/// Default width in pixels of the drawing surface.
pub const DEFAULT_PIXEL_WIDTH: i32 = 800;
