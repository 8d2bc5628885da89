//! Maze layouts for pathviz.
//!
//! [`MazeGen`] carves perfect mazes by randomized backtracking, [`Maze`]
//! holds a layout as a `0`/`1`/`2`/`3` array, and [`load`] paints a layout
//! onto a [`Grid`](pathviz_core::Grid).
//!
//! ```
//! use pathviz_core::{CellState, Grid};
//! use pathviz_maze::{MazeGen, load};
//!
//! let mut grid = Grid::new(21, 420).unwrap();
//! let carve = MazeGen::seeded(7).generate(grid.rows(), grid.rows());
//! load(&mut grid, &carve.maze).unwrap();
//! assert_eq!(grid.count(CellState::Empty), carve.passages());
//! ```

pub mod error;
pub mod load;
pub mod mapgen;
pub mod maze;

pub use error::MazeError;
pub use load::{Endpoints, load};
pub use mapgen::{Carve, MazeGen};
pub use maze::{Maze, MazeCell};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn maze_round_trips_through_json() {
        let m: Maze = "2010\n0013".parse().unwrap();
        let json = serde_json::to_string(&m).unwrap();
        let back: Maze = serde_json::from_str(&json).unwrap();
        assert_eq!(back, m);
    }
}
