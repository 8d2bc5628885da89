//! The [`Grid`] type: a square matrix of [`CellState`]s with derived
//! adjacency.
//!
//! Adjacency lists are snapshots. [`Grid::recompute_neighbors`] records the
//! open 4-neighbours of a cell at call time; later barrier edits do not
//! touch the stored lists, so callers recompute before every search run.

use crate::cell::CellState;
use crate::error::GridError;
use crate::geom::{Point, Range};

/// Side length (in pixels) of one cell when `rows` cells share
/// `pixel_width` pixels.
fn cell_gap(rows: i32, pixel_width: i32) -> Result<i32, GridError> {
    if rows <= 0 || pixel_width < rows {
        return Err(GridError::InvalidSize { rows, pixel_width });
    }
    Ok(pixel_width / rows)
}

/// Map a pixel on the drawing surface to the cell under it.
///
/// The pixel is integer-divided by the cell gap (`pixel_width / rows`).
/// Nothing is clamped: a pixel outside the drawable square, including the
/// slack right of `rows * gap`, yields [`GridError::OutOfBounds`].
pub fn map_point_to_cell(point: Point, rows: i32, pixel_width: i32) -> Result<Point, GridError> {
    let gap = cell_gap(rows, pixel_width)?;
    // Division truncates toward zero, so -1 would otherwise land in cell 0.
    if point.x < 0 || point.y < 0 {
        return Err(GridError::OutOfBounds {
            pos: point,
            size: rows,
        });
    }
    let cell = point / gap;
    if !Range::square(rows).contains(cell) {
        return Err(GridError::OutOfBounds {
            pos: cell,
            size: rows,
        });
    }
    Ok(cell)
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size `rows x rows` grid of cells.
///
/// Cell `(x, y)` lives at flat index `y * rows + x`; coordinates are never
/// stored per cell, so a cell's position always matches its slot.
#[derive(Debug, Clone)]
pub struct Grid {
    rows: i32,
    gap: i32,
    cells: Vec<CellState>,
    adjacency: Vec<Vec<Point>>,
}

impl Grid {
    /// Allocate an empty `rows x rows` grid drawn into `pixel_width` pixels.
    pub fn new(rows: i32, pixel_width: i32) -> Result<Self, GridError> {
        let gap = cell_gap(rows, pixel_width)?;
        let len = (rows as usize) * (rows as usize);
        Ok(Self {
            rows,
            gap,
            cells: vec![CellState::Empty; len],
            adjacency: vec![Vec::new(); len],
        })
    }

    /// Number of rows (and columns).
    #[inline]
    pub fn rows(&self) -> i32 {
        self.rows
    }

    /// Side length of one cell in pixels.
    #[inline]
    pub fn gap(&self) -> i32 {
        self.gap
    }

    /// Width of the drawing surface the grid was laid out for.
    #[inline]
    pub fn pixel_width(&self) -> i32 {
        self.rows * self.gap
    }

    /// The range of valid cell coordinates.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::square(self.rows)
    }

    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds().contains(p)
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of a cell, or `None` outside the grid.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.contains(p) {
            return None;
        }
        Some((p.y as usize) * (self.rows as usize) + p.x as usize)
    }

    /// Cell coordinates of a flat index.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let rows = self.rows as usize;
        Point::new((idx % rows) as i32, (idx / rows) as i32)
    }

    fn checked_idx(&self, p: Point) -> Result<usize, GridError> {
        self.idx(p).ok_or(GridError::OutOfBounds {
            pos: p,
            size: self.rows,
        })
    }

    /// State of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.idx(p).map(|i| self.cells[i])
    }

    /// Overwrite the state of one cell.
    ///
    /// Start/End uniqueness is not checked here; the owner of the grid
    /// decides which cell holds each endpoint.
    pub fn set_state(&mut self, p: Point, state: CellState) -> Result<(), GridError> {
        let i = self.checked_idx(p)?;
        self.cells[i] = state;
        Ok(())
    }

    /// Set every cell to [`CellState::Empty`] and drop adjacency lists.
    pub fn reset_all(&mut self) {
        self.cells.fill(CellState::Empty);
        for adj in &mut self.adjacency {
            adj.clear();
        }
    }

    /// Turn every `Open`, `Closed` and `Path` cell back into `Empty`,
    /// keeping barriers and endpoints.
    pub fn reset_visited(&mut self) {
        for c in &mut self.cells {
            if c.is_visited() {
                *c = CellState::Empty;
            }
        }
    }

    /// Top-left pixel of a cell on the drawing surface.
    #[inline]
    pub fn cell_origin(&self, p: Point) -> Point {
        p * self.gap
    }

    /// Map a pixel of this grid's drawing surface to a cell.
    pub fn cell_at_pixel(&self, pixel: Point) -> Result<Point, GridError> {
        map_point_to_cell(pixel, self.rows, self.pixel_width())
    }

    // -----------------------------------------------------------------------
    // Adjacency
    // -----------------------------------------------------------------------

    /// Record the non-barrier 4-neighbours of `p` (down, up, right, left).
    ///
    /// No diagonals and no wraparound.
    pub fn recompute_neighbors(&mut self, p: Point) -> Result<(), GridError> {
        let i = self.checked_idx(p)?;
        self.fill_adjacency(i, p);
        Ok(())
    }

    /// Recompute the adjacency list of every cell.
    pub fn recompute_all_neighbors(&mut self) {
        for i in 0..self.cells.len() {
            let p = self.point(i);
            self.fill_adjacency(i, p);
        }
        log::trace!("recomputed adjacency for {} cells", self.cells.len());
    }

    /// `i` must be the index of `p`.
    fn fill_adjacency(&mut self, i: usize, p: Point) {
        let mut adj = std::mem::take(&mut self.adjacency[i]);
        adj.clear();
        for n in p.neighbors_4() {
            if matches!(self.state(n), Some(s) if !s.is_barrier()) {
                adj.push(n);
            }
        }
        self.adjacency[i] = adj;
    }

    /// The stored open neighbours of `p`. Empty if never computed or if
    /// `p` is outside the grid.
    #[inline]
    pub fn neighbors(&self, p: Point) -> &[Point] {
        match self.idx(p) {
            Some(i) => &self.adjacency[i],
            None => &[],
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Iterate over `(Point, CellState)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, CellState)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .map(|(i, &s)| (self.point(i), s))
    }

    /// Count the cells in a given state.
    pub fn count(&self, state: CellState) -> usize {
        self.cells.iter().filter(|&&s| s == state).count()
    }

    /// First cell (row-major) holding `state`.
    pub fn find(&self, state: CellState) -> Option<Point> {
        self.cells
            .iter()
            .position(|&s| s == state)
            .map(|i| self.point(i))
    }
}
