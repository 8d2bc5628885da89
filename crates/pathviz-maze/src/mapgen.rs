//! Perfect-maze generation by randomized backtracking.
//!
//! Carving happens on the lattice of even coordinates. Moving two cells at a
//! time and clearing the wall cell in between leaves one-cell-wide passages
//! that form a spanning tree over every lattice cell reachable from the
//! origin.

use pathviz_core::Point;
use pathviz_paths::Reach;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, RngExt, SeedableRng};

use crate::maze::{Maze, MazeCell};

/// Lattice steps: down, up, right, left.
const LATTICE: [Point; 4] = [
    Point::new(0, 2),
    Point::new(0, -2),
    Point::new(2, 0),
    Point::new(-2, 0),
];

/// Result of one [`MazeGen::generate`] call.
#[derive(Debug, Clone)]
pub struct Carve {
    /// `0` passages and `1` barriers, sized like the request.
    pub maze: Maze,
    /// The randomly chosen even-coordinate starting cell, `None` for an
    /// empty request.
    pub origin: Option<Point>,
    /// Lattice cells carved, the origin included.
    ///
    /// This counts only even-coordinate cells. Each carving step after the
    /// origin also clears one wall cell, so the maze has `2 * visited - 1`
    /// open cells in total; see [`cleared`](Self::cleared).
    pub visited: usize,
}

impl Carve {
    /// Number of passage cells: every visited lattice cell plus one wall
    /// per carving step.
    #[inline]
    pub fn passages(&self) -> usize {
        self.maze.count(MazeCell::Passage)
    }

    /// Cells cleared by carving, walls between lattice cells included.
    pub fn cleared(&self) -> usize {
        match self.visited {
            0 => 0,
            n => 2 * n - 1,
        }
    }

    /// Number of separately connected passage regions. A finished carve
    /// has exactly one.
    pub fn regions(&self) -> usize {
        let m = &self.maze;
        Reach::new(m.bounds()).regions(m, |p| matches!(m.at(p), Some(c) if c.is_open()))
    }
}

/// One level of the backtracking descent.
struct Frame {
    pos: Point,
    dirs: [Point; 4],
    next: usize,
}

/// Maze generator driven by a random source.
pub struct MazeGen<R: Rng> {
    pub rng: R,
}

impl MazeGen<SmallRng> {
    /// A generator whose output is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MazeGen<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    fn frame(&mut self, pos: Point) -> Frame {
        let mut dirs = LATTICE;
        dirs.shuffle(&mut self.rng);
        Frame { pos, dirs, next: 0 }
    }

    /// Carve a `rows x cols` maze.
    ///
    /// Every cell starts as a barrier. From a random even-coordinate origin
    /// the carver tries the four lattice steps in a fresh random order; each
    /// in-bounds target that is still a barrier is cleared together with
    /// the wall between, and carving continues from the target before the
    /// remaining directions are tried. The descent uses an explicit stack,
    /// so large grids cannot overflow the call stack.
    ///
    /// When a dimension is even, its last row or column lies off the
    /// lattice and stays solid.
    pub fn generate(&mut self, rows: i32, cols: i32) -> Carve {
        let mut maze = Maze::filled(cols, rows, MazeCell::Barrier);
        if rows <= 0 || cols <= 0 {
            return Carve {
                maze,
                origin: None,
                visited: 0,
            };
        }

        let row = self.rng.random_range(0..=(rows - 1) / 2) * 2;
        let col = self.rng.random_range(0..=(cols - 1) / 2) * 2;
        let origin = Point::from_row_col(row, col);
        maze.set(origin, MazeCell::Passage);
        let mut visited = 1usize;

        let mut stack = vec![self.frame(origin)];
        while let Some(top) = stack.last_mut() {
            if top.next == top.dirs.len() {
                stack.pop();
                continue;
            }
            let step = top.dirs[top.next];
            top.next += 1;

            let from = top.pos;
            let target = from + step;
            if maze.at(target) != Some(MazeCell::Barrier) {
                continue;
            }
            maze.set(target, MazeCell::Passage);
            maze.set(from + step / 2, MazeCell::Passage);
            visited += 1;
            let frame = self.frame(target);
            stack.push(frame);
        }

        log::debug!("maze: carved {visited} lattice cells of a {cols}x{rows} maze from {origin}");
        Carve {
            maze,
            origin: Some(origin),
            visited,
        }
    }
}
