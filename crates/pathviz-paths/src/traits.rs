use pathviz_core::{CancelToken, Grid, Point};

/// Neighbour enumeration for [`Reach`](crate::Reach) floods.
pub trait Pather {
    /// Append neighbors of `p` into `buf`. The caller clears `buf` before calling.
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>);
}

/// A grid's neighbours are its stored adjacency lists, exactly what the
/// visual search walks. Barrier cells are outside the graph and have none.
impl Pather for Grid {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if matches!(self.state(p), Some(s) if !s.is_barrier()) {
            buf.extend_from_slice(Grid::neighbors(self, p));
        }
    }
}

/// A step of the visual search, reported to the [`RenderSink`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEvent {
    /// A cell was popped from the frontier and its neighbours processed.
    Expanded(Point),
    /// A cell was marked as part of the final path.
    Path(Point),
}

/// Receives one frame per search step.
///
/// Called synchronously; the search does not continue until `render`
/// returns. The grid is lent back for the duration of the call so the sink
/// can draw it.
pub trait RenderSink {
    fn render(&mut self, grid: &Grid, event: SearchEvent);
}

impl<F: FnMut(&Grid, SearchEvent)> RenderSink for F {
    fn render(&mut self, grid: &Grid, event: SearchEvent) {
        self(grid, event)
    }
}

/// A sink that draws nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRender;

impl RenderSink for NoRender {
    fn render(&mut self, _grid: &Grid, _event: SearchEvent) {}
}

/// Polled once per search iteration; `true` aborts the run.
pub trait CancelSignal {
    fn is_cancelled(&self) -> bool;
}

impl<F: Fn() -> bool> CancelSignal for F {
    fn is_cancelled(&self) -> bool {
        self()
    }
}

impl CancelSignal for CancelToken {
    fn is_cancelled(&self) -> bool {
        self.is_done()
    }
}

/// A signal that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct Never;

impl CancelSignal for Never {
    fn is_cancelled(&self) -> bool {
        false
    }
}
