//! The maze interchange array.
//!
//! A [`Maze`] is a rectangular array of small integers: `0` passage,
//! `1` barrier, and for predefined layouts `2` start and `3` end. The
//! generator only ever emits `0` and `1`.
//!
//! Textual layouts are one line per row, one digit per cell:
//!
//! ```text
//! 2010
//! 0010
//! 0003
//! ```

use std::fmt;
use std::str::FromStr;

use pathviz_core::{Point, Range};
use pathviz_paths::Pather;

use crate::error::MazeError;

/// One cell of a [`Maze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum MazeCell {
    #[default]
    Passage = 0,
    Barrier = 1,
    Start = 2,
    End = 3,
}

impl MazeCell {
    /// Whether a walker may stand on this cell.
    #[inline]
    pub const fn is_open(self) -> bool {
        !matches!(self, Self::Barrier)
    }
}

impl TryFrom<u8> for MazeCell {
    type Error = MazeError;

    fn try_from(v: u8) -> Result<Self, MazeError> {
        match v {
            0 => Ok(Self::Passage),
            1 => Ok(Self::Barrier),
            2 => Ok(Self::Start),
            3 => Ok(Self::End),
            _ => Err(MazeError::InvalidValue(v)),
        }
    }
}

impl From<MazeCell> for u8 {
    fn from(c: MazeCell) -> Self {
        c as u8
    }
}

// ---------------------------------------------------------------------------
// Maze
// ---------------------------------------------------------------------------

/// A `width x height` array of [`MazeCell`]s in row-major order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Maze {
    width: i32,
    height: i32,
    cells: Vec<MazeCell>,
}

impl Maze {
    /// Create a maze with every cell set to `cell`. Negative sizes are
    /// treated as zero.
    pub fn filled(width: i32, height: i32, cell: MazeCell) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![cell; (width as usize) * (height as usize)],
        }
    }

    /// Build a maze from rows of raw values.
    pub fn from_rows(rows: &[Vec<u8>]) -> Result<Self, MazeError> {
        let width = rows.first().map_or(0, Vec::len);
        let mut cells = Vec::with_capacity(width * rows.len());
        for (i, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(MazeError::Ragged {
                    line: i + 1,
                    expected: width,
                    found: row.len(),
                });
            }
            for &v in row {
                cells.push(MazeCell::try_from(v)?);
            }
        }
        Ok(Self {
            width: width as i32,
            height: rows.len() as i32,
            cells,
        })
    }

    /// The raw `Vec<Vec<u8>>` form, one inner vector per row.
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        if self.width == 0 {
            return vec![Vec::new(); self.height as usize];
        }
        self.cells
            .chunks(self.width as usize)
            .map(|row| row.iter().map(|&c| u8::from(c)).collect())
            .collect()
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Size as a `Point` (width, height).
    #[inline]
    pub fn size(&self) -> Point {
        Point::new(self.width, self.height)
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width, self.height)
    }

    #[inline]
    fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds().contains(p) {
            return None;
        }
        Some((p.y * self.width + p.x) as usize)
    }

    /// Get the cell at a point, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<MazeCell> {
        self.index(p).map(|i| self.cells[i])
    }

    /// Set the cell at a point. Does nothing if out of bounds.
    #[inline]
    pub fn set(&mut self, p: Point, cell: MazeCell) {
        if let Some(i) = self.index(p) {
            self.cells[i] = cell;
        }
    }

    /// Count how many cells equal `cell`.
    pub fn count(&self, cell: MazeCell) -> usize {
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// Iterate over `(Point, MazeCell)` pairs in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, MazeCell)> + '_ {
        self.bounds().iter().zip(self.cells.iter().copied())
    }
}

/// Passage cells connect to their open 4-neighbours.
impl Pather for Maze {
    fn neighbors(&self, p: Point, buf: &mut Vec<Point>) {
        if !matches!(self.at(p), Some(c) if c.is_open()) {
            return;
        }
        for n in p.neighbors_4() {
            if matches!(self.at(n), Some(c) if c.is_open()) {
                buf.push(n);
            }
        }
    }
}

impl FromStr for Maze {
    type Err = MazeError;

    /// Parse digit rows. Surrounding whitespace of the whole layout is
    /// trimmed, individual lines are not.
    fn from_str(s: &str) -> Result<Self, MazeError> {
        let s = s.trim();
        let mut rows: Vec<Vec<u8>> = Vec::new();
        for (i, line) in s.lines().enumerate() {
            let mut row = Vec::with_capacity(line.len());
            for (j, ch) in line.chars().enumerate() {
                match ch {
                    '0'..='3' => row.push(ch as u8 - b'0'),
                    _ => {
                        return Err(MazeError::Parse {
                            line: i + 1,
                            column: j + 1,
                            ch,
                        });
                    }
                }
            }
            rows.push(row);
        }
        Self::from_rows(&rows)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for v in row {
                write!(f, "{v}")?;
            }
        }
        Ok(())
    }
}
