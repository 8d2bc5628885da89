//! The [`CellState`] tag carried by every grid cell.

/// What a grid cell currently is.
///
/// `Open` and `Closed` are the two visited sub-states written by a search:
/// frontier members and fully expanded cells respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Empty,
    Barrier,
    Start,
    End,
    Open,
    Closed,
    Path,
}

impl CellState {
    /// Whether the cell is excluded from the search graph.
    #[inline]
    pub const fn is_barrier(self) -> bool {
        matches!(self, Self::Barrier)
    }

    /// Whether the cell is one of the two search endpoints.
    #[inline]
    pub const fn is_endpoint(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Whether the state was written by a search run.
    #[inline]
    pub const fn is_visited(self) -> bool {
        matches!(self, Self::Open | Self::Closed | Self::Path)
    }
}
