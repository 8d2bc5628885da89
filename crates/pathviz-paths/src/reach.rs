//! Breadth-first reachability: step counts from one cell and region
//! labelling of a whole layout.

use std::collections::VecDeque;

use pathviz_core::{Point, Range};

use crate::traits::Pather;

/// Sentinel for "not reached" in distance tables and g-scores.
pub const UNREACHABLE: i32 = i32::MAX;

const UNLABELLED: u32 = u32::MAX;

/// Reusable tables for breadth-first queries over a rectangle.
///
/// Unlike the visual search this never touches the grid; it answers "how
/// many cells can the start reach" or "how many separate regions does this
/// layout have".
pub struct Reach {
    bounds: Range,
    dist: Vec<i32>,
    region: Vec<u32>,
    queue: VecDeque<usize>,
    nbuf: Vec<Point>,
}

impl Reach {
    pub fn new(bounds: Range) -> Self {
        let len = bounds.len();
        Self {
            bounds,
            dist: vec![UNREACHABLE; len],
            region: vec![UNLABELLED; len],
            queue: VecDeque::new(),
            nbuf: Vec::with_capacity(4),
        }
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        let w = self.bounds.width() as usize;
        Some((p.y - self.bounds.min.y) as usize * w + (p.x - self.bounds.min.x) as usize)
    }

    fn point(&self, i: usize) -> Point {
        let w = self.bounds.width() as usize;
        Point::new(
            (i % w) as i32 + self.bounds.min.x,
            (i / w) as i32 + self.bounds.min.y,
        )
    }

    /// Visit everything connected to slot `seed`, calling `visit(from, to)`
    /// for every newly reached slot. Returns the number of slots reached,
    /// `seed` included.
    fn flood<P, F>(&mut self, pather: &P, seed: usize, mut visit: F) -> usize
    where
        P: Pather + ?Sized,
        F: FnMut(&mut Self, usize, usize) -> bool,
    {
        let mut nbuf = std::mem::take(&mut self.nbuf);
        self.queue.clear();
        self.queue.push_back(seed);
        let mut reached = 1;

        while let Some(ci) = self.queue.pop_front() {
            nbuf.clear();
            pather.neighbors(self.point(ci), &mut nbuf);
            for &np in &nbuf {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                if visit(self, ci, ni) {
                    self.queue.push_back(ni);
                    reached += 1;
                }
            }
        }
        self.nbuf = nbuf;
        reached
    }

    /// Fill the step-count table from `from` and return how many cells are
    /// reachable, `from` included. Zero when `from` lies outside.
    pub fn distances<P: Pather + ?Sized>(&mut self, pather: &P, from: Point) -> usize {
        self.dist.fill(UNREACHABLE);
        let Some(si) = self.idx(from) else {
            return 0;
        };
        self.dist[si] = 0;
        let reached = self.flood(pather, si, |r, ci, ni| {
            if r.dist[ni] != UNREACHABLE {
                return false;
            }
            r.dist[ni] = r.dist[ci] + 1;
            true
        });
        log::trace!("reach: {reached} cells from {from}");
        reached
    }

    /// Steps from the source of the last [`distances`](Self::distances) call.
    pub fn distance(&self, p: Point) -> Option<i32> {
        match self.idx(p).map(|i| self.dist[i]) {
            None | Some(UNREACHABLE) => None,
            d => d,
        }
    }

    /// Label the cells for which `open` holds by connected region and
    /// return the number of regions. Cells outside `open` stay unlabelled.
    pub fn regions<P, F>(&mut self, pather: &P, open: F) -> usize
    where
        P: Pather + ?Sized,
        F: Fn(Point) -> bool,
    {
        self.region.fill(UNLABELLED);
        let mut count: u32 = 0;
        for si in 0..self.region.len() {
            if self.region[si] != UNLABELLED || !open(self.point(si)) {
                continue;
            }
            self.region[si] = count;
            self.flood(pather, si, |r, _, ni| {
                if r.region[ni] != UNLABELLED || !open(r.point(ni)) {
                    return false;
                }
                r.region[ni] = count;
                true
            });
            count += 1;
        }
        log::trace!("reach: {count} regions in {}", self.bounds);
        count as usize
    }

    /// Region of `p` from the last [`regions`](Self::regions) call.
    pub fn region(&self, p: Point) -> Option<usize> {
        let i = self.idx(p)?;
        match self.region[i] {
            UNLABELLED => None,
            r => Some(r as usize),
        }
    }
}
