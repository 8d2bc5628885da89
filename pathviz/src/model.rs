//! Interaction model: endpoint and barrier painting, maze loading and
//! search runs, independent of the terminal.

use pathviz_core::{CellState, Grid, GridError, Point};
use pathviz_crossterm::{Key, MouseAction, Msg};
use pathviz_maze::{MazeCell, MazeError, MazeGen, load};
use pathviz_paths::{CancelSignal, Reach, RenderSink, SearchOutcome, astar};
use rand::rngs::SmallRng;

use crate::status::{LogStyle, StatusLog};

/// Work the main loop has to do after [`Model::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run an animated search.
    Search,
    Quit,
}

/// The visualizer state.
pub struct Model {
    grid: Grid,
    start: Option<Point>,
    end: Option<Point>,
    mazes: MazeGen<SmallRng>,
    log: StatusLog,
}

impl Model {
    /// A model over `grid`, generating mazes from `seed`.
    pub fn new(grid: Grid, seed: u64) -> Self {
        Self {
            grid,
            start: None,
            end: None,
            mazes: MazeGen::seeded(seed),
            log: StatusLog::new(),
        }
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> Option<Point> {
        self.end
    }

    #[inline]
    pub fn log(&self) -> &StatusLog {
        &self.log
    }

    pub fn log_mut(&mut self) -> &mut StatusLog {
        &mut self.log
    }

    fn check(&self, cell: Point) -> Result<(), GridError> {
        if self.grid.contains(cell) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                pos: cell,
                size: self.grid.rows(),
            })
        }
    }

    /// Left click: the first click places the start, the second the end,
    /// and later clicks raise barriers. A click never overwrites an
    /// existing endpoint.
    pub fn paint(&mut self, cell: Point) -> Result<(), GridError> {
        self.check(cell)?;
        let here = Some(cell);
        if self.start.is_none() && here != self.end {
            self.grid.set_state(cell, CellState::Start)?;
            self.start = here;
        } else if self.end.is_none() && here != self.start {
            self.grid.set_state(cell, CellState::End)?;
            self.end = here;
        } else if here != self.start && here != self.end {
            self.grid.set_state(cell, CellState::Barrier)?;
        }
        Ok(())
    }

    /// Right click: empty the cell and forget it as an endpoint.
    pub fn erase(&mut self, cell: Point) -> Result<(), GridError> {
        self.check(cell)?;
        self.grid.set_state(cell, CellState::Empty)?;
        if self.start == Some(cell) {
            self.start = None;
        }
        if self.end == Some(cell) {
            self.end = None;
        }
        Ok(())
    }

    /// Empty every cell and forget both endpoints.
    pub fn clear(&mut self) {
        self.grid.reset_all();
        self.start = None;
        self.end = None;
    }

    /// Clear the grid and load a freshly carved maze.
    pub fn generate_maze(&mut self) -> Result<(), MazeError> {
        self.clear();
        let rows = self.grid.rows();
        let carve = self.mazes.generate(rows, rows);
        load(&mut self.grid, &carve.maze)?;
        let regions = carve.regions();
        if regions > 1 {
            log::warn!("maze: carve left {regions} disconnected regions");
        }
        self.log.log(&format!(
            "maze carved: {} open cells, {} walls",
            carve.passages(),
            carve.maze.count(MazeCell::Barrier)
        ));
        Ok(())
    }

    /// Reset visit marks and refresh adjacency, returning the endpoints
    /// when both are placed.
    pub fn prepare_search(&mut self) -> Option<(Point, Point)> {
        let (Some(start), Some(end)) = (self.start, self.end) else {
            self.log
                .log_styled("place a start and an end first", LogStyle::Warning);
            return None;
        };
        self.grid.reset_visited();
        self.grid.recompute_all_neighbors();
        Some((start, end))
    }

    /// Run one search, animating through `sink`. Returns `None` when the
    /// endpoints are not both placed.
    pub fn search<S, C>(
        &mut self,
        sink: &mut S,
        cancel: &C,
    ) -> Result<Option<SearchOutcome>, GridError>
    where
        S: RenderSink + ?Sized,
        C: CancelSignal + ?Sized,
    {
        let Some((start, end)) = self.prepare_search() else {
            return Ok(None);
        };
        let outcome = astar(&mut self.grid, start, end, sink, cancel)?;
        match &outcome {
            SearchOutcome::Found { .. } => {
                let len = outcome.path_len().unwrap_or(0);
                self.log
                    .log_styled(&format!("path found: {len} steps"), LogStyle::Success);
            }
            SearchOutcome::NoPath => {
                let reached = Reach::new(self.grid.bounds()).distances(&self.grid, start);
                self.log.log_styled(
                    &format!("no path: start reaches only {reached} cells"),
                    LogStyle::Warning,
                );
            }
            SearchOutcome::Cancelled => self.log.log_styled("search cancelled", LogStyle::Warning),
        }
        Ok(Some(outcome))
    }

    /// Handle one input message outside a search.
    pub fn update(&mut self, msg: Msg) -> Result<Option<Command>, MazeError> {
        match msg {
            Msg::Key(Key::Char(' ')) => return Ok(Some(Command::Search)),
            Msg::Key(Key::Char('c')) => {
                self.clear();
                self.log.log("grid cleared");
            }
            Msg::Key(Key::Char('r')) => self.generate_maze()?,
            other if other.is_quit() => return Ok(Some(Command::Quit)),
            Msg::Mouse {
                action: MouseAction::Main,
                cell,
            } => self.paint(cell)?,
            Msg::Mouse {
                action: MouseAction::Secondary,
                cell,
            } => self.erase(cell)?,
            Msg::Key(_) | Msg::Resize => {}
        }
        Ok(None)
    }
}
