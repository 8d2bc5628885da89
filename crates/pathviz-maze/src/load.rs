//! Copying a [`Maze`] onto a [`Grid`].

use pathviz_core::{CellState, Grid, Point};

use crate::error::MazeError;
use crate::maze::{Maze, MazeCell};

/// Start and end cells declared by a loaded layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Endpoints {
    pub start: Option<Point>,
    pub end: Option<Point>,
}

impl Endpoints {
    /// Both endpoints are present.
    pub fn is_complete(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

fn scan_endpoints(maze: &Maze) -> Result<Endpoints, MazeError> {
    let mut found = Endpoints::default();
    for (p, cell) in maze.iter() {
        let slot = match cell {
            MazeCell::Start => &mut found.start,
            MazeCell::End => &mut found.end,
            _ => continue,
        };
        if let Some(first) = *slot {
            return Err(MazeError::DuplicateEndpoint {
                cell,
                first,
                second: p,
            });
        }
        *slot = Some(p);
    }
    Ok(found)
}

/// Paint `maze` onto `grid`, anchored at the top-left cell.
///
/// Barrier values become [`CellState::Barrier`], start and end values set
/// the matching state, and passage values leave the grid cell as it was.
/// The layout is validated before anything is written, so on error the
/// grid is unchanged.
///
/// Neighbour lists are not refreshed here; the search entry point
/// recomputes them.
pub fn load(grid: &mut Grid, maze: &Maze) -> Result<Endpoints, MazeError> {
    if maze.width() > grid.rows() || maze.height() > grid.rows() {
        return Err(MazeError::SizeMismatch {
            maze: maze.size(),
            grid: grid.rows(),
        });
    }
    let endpoints = scan_endpoints(maze)?;

    for (p, cell) in maze.iter() {
        let state = match cell {
            MazeCell::Passage => continue,
            MazeCell::Barrier => CellState::Barrier,
            MazeCell::Start => CellState::Start,
            MazeCell::End => CellState::End,
        };
        grid.set_state(p, state)?;
    }
    log::debug!(
        "maze: loaded {}x{} layout, {} barriers",
        maze.width(),
        maze.height(),
        maze.count(MazeCell::Barrier)
    );
    Ok(endpoints)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn barriers_and_endpoints_are_copied() {
        let mut grid = Grid::new(4, 40).unwrap();
        let maze: Maze = "2010\n0010\n0003".parse().unwrap();
        let ends = load(&mut grid, &maze).unwrap();

        assert_eq!(ends.start, Some(Point::new(0, 0)));
        assert_eq!(ends.end, Some(Point::new(3, 2)));
        assert!(ends.is_complete());
        assert_eq!(grid.state(Point::new(2, 0)), Some(CellState::Barrier));
        assert_eq!(grid.state(Point::new(2, 1)), Some(CellState::Barrier));
        assert_eq!(grid.count(CellState::Barrier), 2);
        assert_eq!(grid.find(CellState::Start), Some(Point::new(0, 0)));
        assert_eq!(grid.find(CellState::End), Some(Point::new(3, 2)));
        // the fourth row lies outside the layout
        assert_eq!(grid.state(Point::new(0, 3)), Some(CellState::Empty));
    }

    #[test]
    fn passages_leave_cells_untouched() {
        let mut grid = Grid::new(3, 30).unwrap();
        grid.set_state(Point::new(1, 1), CellState::Barrier).unwrap();
        let maze = Maze::filled(3, 3, MazeCell::Passage);
        let ends = load(&mut grid, &maze).unwrap();
        assert_eq!(ends, Endpoints::default());
        assert_eq!(grid.state(Point::new(1, 1)), Some(CellState::Barrier));
    }

    #[test]
    fn oversized_layout_is_rejected() {
        let mut grid = Grid::new(2, 20).unwrap();
        let maze = Maze::filled(3, 1, MazeCell::Barrier);
        let err = load(&mut grid, &maze).unwrap_err();
        assert_eq!(
            err,
            MazeError::SizeMismatch {
                maze: Point::new(3, 1),
                grid: 2
            }
        );
        assert_eq!(grid.count(CellState::Barrier), 0);
    }

    #[test]
    fn duplicate_start_leaves_grid_untouched() {
        let mut grid = Grid::new(3, 30).unwrap();
        let maze: Maze = "210\n002\n003".parse().unwrap();
        let err = load(&mut grid, &maze).unwrap_err();
        assert_eq!(
            err,
            MazeError::DuplicateEndpoint {
                cell: MazeCell::Start,
                first: Point::new(0, 0),
                second: Point::new(2, 1),
            }
        );
        assert_eq!(grid.count(CellState::Empty), 9);
    }

    #[test]
    fn generated_maze_fits_its_grid() {
        let mut grid = Grid::new(11, 110).unwrap();
        let carve = crate::MazeGen::seeded(5).generate(11, 11);
        let ends = load(&mut grid, &carve.maze).unwrap();
        assert_eq!(ends, Endpoints::default());
        assert_eq!(grid.count(CellState::Empty), carve.passages());
    }
}
