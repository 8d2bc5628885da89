use std::cmp::Ordering;
use std::collections::BinaryHeap;

use pathviz_core::{CellState, Grid, GridError, Point};

use crate::distance::manhattan;
use crate::reach::UNREACHABLE;
use crate::traits::{CancelSignal, RenderSink, SearchEvent};

const NO_PARENT: usize = usize::MAX;

/// How a search run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The end was reached. `path` runs from start to end, both included.
    Found { path: Vec<Point> },
    /// The frontier emptied: no path exists for the current adjacency.
    NoPath,
    /// The cancel signal fired; the grid holds whatever marks were made.
    Cancelled,
}

impl SearchOutcome {
    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }

    /// Whether the outcome is authoritative. A cancelled run says nothing
    /// about whether a path exists.
    #[inline]
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// The found path, start and end included.
    pub fn path(&self) -> Option<&[Point]> {
        match self {
            Self::Found { path } => Some(path),
            _ => None,
        }
    }

    /// Number of moves along the found path.
    pub fn path_len(&self) -> Option<usize> {
        self.path().map(|p| p.len() - 1)
    }
}

// ---------------------------------------------------------------------------
// Search record
// ---------------------------------------------------------------------------

/// Frontier entry ordered by `(f, order)`; the cell index never takes part
/// in comparisons.
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    f: i32,
    order: u64,
    idx: usize,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.order == other.order
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse so BinaryHeap (max-heap) pops the smallest (f, order) first.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.order.cmp(&self.order))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-run bookkeeping, keyed by flat cell index. Dropped when the run ends.
struct SearchRecord {
    came_from: Vec<usize>,
    g_score: Vec<i32>,
    f_score: Vec<i32>,
    frontier: BinaryHeap<FrontierEntry>,
    in_frontier: Vec<bool>,
    order: Vec<u64>,
    counter: u64,
}

impl SearchRecord {
    fn new(len: usize) -> Self {
        Self {
            came_from: vec![NO_PARENT; len],
            g_score: vec![UNREACHABLE; len],
            f_score: vec![UNREACHABLE; len],
            frontier: BinaryHeap::new(),
            in_frontier: vec![false; len],
            order: vec![0; len],
            counter: 0,
        }
    }

    /// Queue `idx` with priority `f`.
    ///
    /// A cell gets its insertion number when it joins the frontier. A member
    /// whose `f` improves is pushed again under the number it already holds,
    /// and the entry with the old `f` goes stale.
    fn push(&mut self, idx: usize, f: i32) {
        if !self.in_frontier[idx] {
            self.order[idx] = self.counter;
            self.counter += 1;
            self.in_frontier[idx] = true;
        }
        self.frontier.push(FrontierEntry {
            f,
            order: self.order[idx],
            idx,
        });
    }

    /// Pop the best live entry and drop it from the membership set.
    fn pop(&mut self) -> Option<usize> {
        while let Some(e) = self.frontier.pop() {
            // Skip stale entries.
            if !self.in_frontier[e.idx]
                || e.f != self.f_score[e.idx]
                || e.order != self.order[e.idx]
            {
                continue;
            }
            self.in_frontier[e.idx] = false;
            return Some(e.idx);
        }
        None
    }
}

/// Write a visit mark, leaving barriers and endpoints alone.
fn mark(grid: &mut Grid, p: Point, state: CellState) -> Result<(), GridError> {
    match grid.state(p) {
        Some(s) if s.is_barrier() || s.is_endpoint() => Ok(()),
        _ => grid.set_state(p, state),
    }
}

fn index_of(grid: &Grid, p: Point) -> Result<usize, GridError> {
    grid.idx(p).ok_or(GridError::OutOfBounds {
        pos: p,
        size: grid.rows(),
    })
}

// ---------------------------------------------------------------------------
// A*
// ---------------------------------------------------------------------------

/// Run a visual A* search from `start` to `end` over the grid's stored
/// adjacency lists.
///
/// Every move costs 1 and the heuristic is [`manhattan`], so a found path
/// is a shortest one. Ties on `f` go to the cell queued first.
///
/// Progress is written into the grid: newly queued cells become `Open`,
/// expanded cells (other than `start`) become `Closed`, and on success the
/// cells between start and end become `Path`. `sink` gets one
/// [`SearchEvent::Expanded`] frame per expanded cell and one
/// [`SearchEvent::Path`] frame per path cell. `cancel` is polled before
/// every expansion.
///
/// The caller must have recomputed adjacency after its last barrier edit.
/// Endpoints outside the grid are reported as [`GridError::OutOfBounds`].
pub fn astar<S, C>(
    grid: &mut Grid,
    start: Point,
    end: Point,
    sink: &mut S,
    cancel: &C,
) -> Result<SearchOutcome, GridError>
where
    S: RenderSink + ?Sized,
    C: CancelSignal + ?Sized,
{
    let start_idx = index_of(grid, start)?;
    let goal_idx = index_of(grid, end)?;

    if start_idx == goal_idx {
        return Ok(SearchOutcome::Found { path: vec![start] });
    }

    let mut rec = SearchRecord::new(grid.len());
    let f0 = manhattan(start, end);
    rec.g_score[start_idx] = 0;
    rec.f_score[start_idx] = f0;
    rec.push(start_idx, f0);

    let mut nbuf: Vec<Point> = Vec::with_capacity(4);
    let mut expanded = 0usize;

    loop {
        if cancel.is_cancelled() {
            log::debug!("astar: cancelled after {expanded} expansions");
            return Ok(SearchOutcome::Cancelled);
        }

        let Some(ci) = rec.pop() else {
            break;
        };
        let current = grid.point(ci);

        if ci == goal_idx {
            let path = reconstruct_path(grid, &rec.came_from, start_idx, goal_idx, sink)?;
            grid.set_state(end, CellState::End)?;
            log::debug!(
                "astar: {} -> {} in {} moves, {expanded} expansions",
                start,
                end,
                path.len() - 1
            );
            return Ok(SearchOutcome::Found { path });
        }

        nbuf.clear();
        nbuf.extend_from_slice(grid.neighbors(current));
        let tentative_g = rec.g_score[ci] + 1;

        for &np in nbuf.iter() {
            let Some(ni) = grid.idx(np) else {
                continue;
            };
            if tentative_g >= rec.g_score[ni] {
                continue;
            }
            let f = tentative_g + manhattan(np, end);
            rec.came_from[ni] = ci;
            rec.g_score[ni] = tentative_g;
            rec.f_score[ni] = f;

            let newly_queued = !rec.in_frontier[ni];
            rec.push(ni, f);
            if newly_queued {
                mark(grid, np, CellState::Open)?;
            }
        }

        expanded += 1;
        sink.render(grid, SearchEvent::Expanded(current));

        if ci != start_idx {
            mark(grid, current, CellState::Closed)?;
        }
    }

    log::debug!("astar: no path {start} -> {end} after {expanded} expansions");
    Ok(SearchOutcome::NoPath)
}

/// Walk predecessors from the goal back to (not including) the start,
/// marking each cell on the way as `Path`.
fn reconstruct_path<S: RenderSink + ?Sized>(
    grid: &mut Grid,
    came_from: &[usize],
    start_idx: usize,
    goal_idx: usize,
    sink: &mut S,
) -> Result<Vec<Point>, GridError> {
    let mut path = vec![grid.point(goal_idx)];
    let mut ci = came_from[goal_idx];
    while ci != start_idx && ci != NO_PARENT {
        let p = grid.point(ci);
        mark(grid, p, CellState::Path)?;
        sink.render(grid, SearchEvent::Path(p));
        path.push(p);
        ci = came_from[ci];
    }
    path.push(grid.point(start_idx));
    path.reverse();
    Ok(path)
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::Reach;
    use crate::traits::{Never, NoRender};
    use pathviz_core::CancelToken;
    use rand::rngs::SmallRng;
    use rand::{RngExt, SeedableRng};

    fn grid_with_endpoints(rows: i32, start: Point, end: Point) -> Grid {
        let mut g = Grid::new(rows, rows * 10).unwrap();
        g.set_state(start, CellState::Start).unwrap();
        g.set_state(end, CellState::End).unwrap();
        g
    }

    fn run(g: &mut Grid, start: Point, end: Point) -> SearchOutcome {
        g.recompute_all_neighbors();
        astar(g, start, end, &mut NoRender, &Never).unwrap()
    }

    fn assert_contiguous(path: &[Point]) {
        for w in path.windows(2) {
            assert_eq!(manhattan(w[0], w[1]), 1, "{} -> {}", w[0], w[1]);
        }
    }

    #[test]
    fn empty_5x5_corner_to_corner() {
        let (s, e) = (Point::new(0, 0), Point::new(4, 4));
        let mut g = grid_with_endpoints(5, s, e);
        let out = run(&mut g, s, e);
        assert_eq!(out.path_len(), Some(8));
        let path = out.path().unwrap();
        assert_eq!(path.first(), Some(&s));
        assert_eq!(path.last(), Some(&e));
        assert_contiguous(path);
        assert_eq!(g.count(CellState::Path), 7);
        assert_eq!(g.state(s), Some(CellState::Start));
        assert_eq!(g.state(e), Some(CellState::End));
    }

    #[test]
    fn middle_row_wall_forces_detour_of_two() {
        let (s, e) = (Point::new(0, 0), Point::new(0, 2));

        let mut open = grid_with_endpoints(3, s, e);
        let direct = run(&mut open, s, e).path_len().unwrap();

        let mut walled = grid_with_endpoints(3, s, e);
        walled.set_state(Point::new(0, 1), CellState::Barrier).unwrap();
        walled.set_state(Point::new(2, 1), CellState::Barrier).unwrap();
        let out = run(&mut walled, s, e);
        assert_eq!(out.path_len(), Some(direct + 2));
        assert!(out.path().unwrap().contains(&Point::new(1, 1)));
    }

    #[test]
    fn walled_in_start_has_no_path() {
        let (s, e) = (Point::new(2, 2), Point::new(4, 0));
        let mut g = grid_with_endpoints(5, s, e);
        for n in s.neighbors_4() {
            g.set_state(n, CellState::Barrier).unwrap();
        }
        g.recompute_all_neighbors();
        assert!(g.neighbors(s).is_empty());

        let mut frames = 0;
        let out = astar(&mut g, s, e, &mut |_: &Grid, _: SearchEvent| frames += 1, &Never).unwrap();
        assert_eq!(out, SearchOutcome::NoPath);
        assert!(out.is_terminal());
        assert_eq!(frames, 1);
        // Nothing beyond the start was reachable, so nothing was marked.
        assert_eq!(g.count(CellState::Open), 0);
        assert_eq!(g.count(CellState::Closed), 0);
        assert_eq!(g.state(s), Some(CellState::Start));
    }

    #[test]
    fn no_path_closes_reachable_and_leaves_the_rest() {
        // End sealed in the bottom-right corner of a 6x6 grid.
        let (s, e) = (Point::new(0, 0), Point::new(5, 5));
        let mut g = grid_with_endpoints(6, s, e);
        g.set_state(Point::new(4, 5), CellState::Barrier).unwrap();
        g.set_state(Point::new(5, 4), CellState::Barrier).unwrap();
        let out = run(&mut g, s, e);
        assert_eq!(out, SearchOutcome::NoPath);

        // 36 cells - start - end - 2 barriers: all reachable, all expanded.
        assert_eq!(g.count(CellState::Closed), 32);
        assert_eq!(g.count(CellState::Open), 0);
        assert_eq!(g.count(CellState::Empty), 0);
        assert_eq!(g.state(e), Some(CellState::End));
    }

    #[test]
    fn unreachable_region_is_untouched() {
        // Column 3 walls off the right side of a 6x6 grid.
        let (s, e) = (Point::new(0, 0), Point::new(5, 0));
        let mut g = grid_with_endpoints(6, s, e);
        for y in 0..6 {
            g.set_state(Point::new(3, y), CellState::Barrier).unwrap();
        }
        let out = run(&mut g, s, e);
        assert_eq!(out, SearchOutcome::NoPath);
        for (p, state) in g.iter() {
            if p.x > 3 && p != e {
                assert_eq!(state, CellState::Empty, "{p} was touched");
            }
            if p.x < 3 && p != s {
                assert_eq!(state, CellState::Closed, "{p} was not expanded");
            }
        }
    }

    #[test]
    fn open_grid_paths_match_manhattan() {
        let mut rng = SmallRng::seed_from_u64(7);
        for _ in 0..40 {
            let s = Point::new(rng.random_range(0..9), rng.random_range(0..9));
            let e = Point::new(rng.random_range(0..9), rng.random_range(0..9));
            let mut g = Grid::new(9, 90).unwrap();
            let out = run(&mut g, s, e);
            assert_eq!(out.path_len(), Some(manhattan(s, e) as usize));
        }
    }

    #[test]
    fn path_length_matches_bfs_on_random_layouts() {
        let mut rng = SmallRng::seed_from_u64(0x5eed);
        let rows = 14;
        for trial in 0..150 {
            let mut g = Grid::new(rows, rows * 4).unwrap();
            for p in g.bounds() {
                if rng.random_bool(0.3) {
                    g.set_state(p, CellState::Barrier).unwrap();
                }
            }
            let s = Point::new(rng.random_range(0..rows), rng.random_range(0..rows));
            let mut e = Point::new(rng.random_range(0..rows), rng.random_range(0..rows));
            if e == s {
                e = Point::new((s.x + 1) % rows, s.y);
            }
            g.set_state(s, CellState::Start).unwrap();
            g.set_state(e, CellState::End).unwrap();
            g.recompute_all_neighbors();

            let mut reach = Reach::new(g.bounds());
            reach.distances(&g, s);
            let expected = reach.distance(e);

            let out = astar(&mut g, s, e, &mut NoRender, &Never).unwrap();
            assert_eq!(
                out.path_len(),
                expected.map(|d| d as usize),
                "trial {trial}: {s} -> {e}"
            );
            if let Some(path) = out.path() {
                assert_contiguous(path);
            }
        }
    }

    #[test]
    fn expansion_order_is_deterministic() {
        let (s, e) = (Point::new(1, 1), Point::new(8, 6));
        let build = || {
            let mut g = grid_with_endpoints(10, s, e);
            for y in 0..8 {
                g.set_state(Point::new(5, y), CellState::Barrier).unwrap();
            }
            g.recompute_all_neighbors();
            g
        };

        let record = |mut g: Grid| {
            let mut events = Vec::new();
            let out = astar(&mut g, s, e, &mut |_: &Grid, ev: SearchEvent| events.push(ev), &Never).unwrap();
            (out, events)
        };

        let (out_a, ev_a) = record(build());
        let (out_b, ev_b) = record(build());
        assert!(out_a.is_found());
        assert_eq!(out_a, out_b);
        assert_eq!(ev_a, ev_b);
    }

    #[test]
    fn events_cover_expansions_then_path() {
        let (s, e) = (Point::new(0, 0), Point::new(3, 0));
        let mut g = grid_with_endpoints(4, s, e);
        g.recompute_all_neighbors();
        let mut events = Vec::new();
        let out = astar(&mut g, s, e, &mut |_: &Grid, ev: SearchEvent| events.push(ev), &Never).unwrap();

        let path = out.path().unwrap().to_vec();
        assert_eq!(path.len(), 4);
        let path_events: Vec<Point> = events
            .iter()
            .filter_map(|ev| match ev {
                SearchEvent::Path(p) => Some(*p),
                SearchEvent::Expanded(_) => None,
            })
            .collect();
        // Reported end-first, start and end excluded.
        assert_eq!(path_events, vec![Point::new(2, 0), Point::new(1, 0)]);
        assert_eq!(events.first(), Some(&SearchEvent::Expanded(s)));
        assert!(matches!(events.last(), Some(SearchEvent::Path(_))));
    }

    #[test]
    fn endpoints_are_never_overwritten_mid_search() {
        let (s, e) = (Point::new(0, 3), Point::new(6, 3));
        let mut g = grid_with_endpoints(7, s, e);
        g.recompute_all_neighbors();
        let mut sink = |grid: &Grid, _: SearchEvent| {
            assert_eq!(grid.state(s), Some(CellState::Start));
            assert_eq!(grid.state(e), Some(CellState::End));
        };
        assert!(astar(&mut g, s, e, &mut sink, &Never).unwrap().is_found());
    }

    #[test]
    fn cancel_stops_after_requested_frames() {
        let (s, e) = (Point::new(0, 0), Point::new(9, 9));
        let mut g = grid_with_endpoints(10, s, e);
        g.recompute_all_neighbors();

        let frames = Cell::new(0usize);
        let mut sink = |_: &Grid, _: SearchEvent| frames.set(frames.get() + 1);
        let cancel = || frames.get() >= 3;
        let out = astar(&mut g, s, e, &mut sink, &cancel).unwrap();

        assert_eq!(out, SearchOutcome::Cancelled);
        assert!(!out.is_terminal());
        assert_eq!(frames.get(), 3);
        assert_eq!(g.count(CellState::Path), 0);
        assert!(g.count(CellState::Open) > 0);
    }

    #[test]
    fn pre_cancelled_token_touches_nothing() {
        let (s, e) = (Point::new(0, 0), Point::new(4, 4));
        let mut g = grid_with_endpoints(5, s, e);
        g.recompute_all_neighbors();
        let token = CancelToken::new();
        token.cancel();
        let out = astar(&mut g, s, e, &mut NoRender, &token).unwrap();
        assert_eq!(out, SearchOutcome::Cancelled);
        assert_eq!(g.count(CellState::Empty), 23);
    }

    #[test]
    fn start_equal_to_end_is_trivial() {
        let p = Point::new(2, 2);
        let mut g = Grid::new(5, 50).unwrap();
        let out = run(&mut g, p, p);
        assert_eq!(out.path(), Some(&[p][..]));
        assert_eq!(out.path_len(), Some(0));
    }

    #[test]
    fn out_of_bounds_endpoint_is_an_error() {
        let mut g = Grid::new(5, 50).unwrap();
        let err = astar(&mut g, Point::new(0, 0), Point::new(5, 0), &mut NoRender, &Never);
        assert_eq!(
            err,
            Err(GridError::OutOfBounds {
                pos: Point::new(5, 0),
                size: 5
            })
        );
    }

    #[test]
    fn frontier_pops_lowest_f_then_oldest() {
        let mut rec = SearchRecord::new(4);
        rec.f_score = vec![5, 3, 3, 1];
        rec.push(0, 5);
        rec.push(1, 3);
        rec.push(2, 3);
        rec.push(3, 1);
        assert_eq!(rec.pop(), Some(3));
        assert_eq!(rec.pop(), Some(1));
        assert_eq!(rec.pop(), Some(2));
        assert_eq!(rec.pop(), Some(0));
        assert_eq!(rec.pop(), None);
    }

    #[test]
    fn requeued_member_supersedes_old_entry() {
        let mut rec = SearchRecord::new(2);
        rec.f_score = vec![9, 4];
        rec.push(0, 9);
        rec.push(1, 4);
        // Cell 0 improves while queued.
        rec.f_score[0] = 2;
        rec.push(0, 2);
        assert_eq!(rec.pop(), Some(0));
        assert_eq!(rec.pop(), Some(1));
        // The stale (9) entry for cell 0 is skipped.
        assert_eq!(rec.pop(), None);
    }

    #[test]
    fn improved_member_keeps_its_insertion_number() {
        let mut rec = SearchRecord::new(3);
        rec.f_score = vec![6, 4, 8];
        rec.push(0, 6);
        rec.push(1, 4);
        rec.push(2, 8);
        // Cell 0 drops to the same f as cell 1 while queued; it joined
        // first, so it still wins the tie.
        rec.f_score[0] = 4;
        rec.push(0, 4);
        assert_eq!(rec.order, vec![0, 1, 2]);
        assert_eq!(rec.pop(), Some(0));
        assert_eq!(rec.pop(), Some(1));
        assert_eq!(rec.pop(), Some(2));
        assert_eq!(rec.pop(), None);

        // Leaving and rejoining the frontier hands out a new number.
        rec.f_score[1] = 3;
        rec.push(1, 3);
        assert_eq!(rec.order[1], 3);
    }
}
