//! The [`Cell`] type — one grid position's search bookkeeping.

use crate::geom::Point;

/// Search state of a [`Cell`].
///
/// Cells move `Unseen → Open → Closed → Path` during one search.
/// `Disabled` marks an obstacle; it is set while building the grid and is
/// never entered or left by the search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellState {
    #[default]
    Unseen,
    Open,
    Closed,
    Path,
    Disabled,
}

/// A search node stored inside a [`Grid`](crate::Grid).
///
/// `parent` is a flat index into the owning grid's storage, never an
/// owning link. It always points at a cell that was closed before this one
/// was discovered, so parent chains are acyclic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Cell {
    pos: Point,
    g: i32,
    h: i32,
    state: CellState,
    parent: Option<usize>,
}

impl Cell {
    /// Create an unseen cell at `pos` with zero costs and no parent.
    #[inline]
    pub const fn new(pos: Point) -> Self {
        Self {
            pos,
            g: 0,
            h: 0,
            state: CellState::Unseen,
            parent: None,
        }
    }

    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Exact cost from the start along the best known route.
    #[inline]
    pub fn g(&self) -> i32 {
        self.g
    }

    /// Heuristic estimate of the remaining cost to the target.
    #[inline]
    pub fn h(&self) -> i32 {
        self.h
    }

    /// Estimated total cost through this cell, `g + h` saturating at `i32::MAX`.
    #[inline]
    pub fn f(&self) -> i32 {
        self.g.saturating_add(self.h)
    }

    #[inline]
    pub fn state(&self) -> CellState {
        self.state
    }

    /// Index of the predecessor on the best known route.
    #[inline]
    pub fn parent(&self) -> Option<usize> {
        self.parent
    }

    /// Whether the cell may still be entered: not finalized, not an obstacle.
    #[inline]
    pub fn walkable(&self) -> bool {
        matches!(self.state, CellState::Unseen | CellState::Open)
    }

    #[inline]
    pub fn is_disabled(&self) -> bool {
        self.state == CellState::Disabled
    }

    // -----------------------------------------------------------------------
    // State transitions
    // -----------------------------------------------------------------------

    /// Mark the cell as an obstacle. Only meaningful while building a grid.
    pub fn disable(&mut self) {
        self.state = CellState::Disabled;
        self.g = 0;
        self.h = 0;
        self.parent = None;
    }

    /// Set the heuristic estimate. Obstacles keep `h = 0`.
    pub fn set_h(&mut self, h: i32) {
        if !self.is_disabled() {
            self.h = h;
        }
    }

    /// First discovery: `Unseen → Open`.
    pub fn open(&mut self, g: i32, parent: Option<usize>) {
        debug_assert_eq!(self.state, CellState::Unseen, "opening {} twice", self.pos);
        self.g = g;
        self.parent = parent;
        self.state = CellState::Open;
    }

    /// Record a cheaper route to an open cell. Returns `false` (and changes
    /// nothing) if the cell is not open or `g` is not an improvement.
    pub fn improve(&mut self, g: i32, parent: usize) -> bool {
        if self.state != CellState::Open || g >= self.g {
            return false;
        }
        self.g = g;
        self.parent = Some(parent);
        true
    }

    /// Finalize the cell: `Open → Closed`.
    pub fn close(&mut self) {
        debug_assert_eq!(self.state, CellState::Open, "closing {} while not open", self.pos);
        self.state = CellState::Closed;
    }

    /// Annotate a closed cell as part of the winning route.
    pub fn mark_path(&mut self) {
        debug_assert_eq!(self.state, CellState::Closed, "path through unclosed {}", self.pos);
        self.state = CellState::Path;
    }

    /// Forget all search bookkeeping except `h`. Obstacles are left alone.
    pub fn reset(&mut self) {
        if self.is_disabled() {
            return;
        }
        self.g = 0;
        self.parent = None;
        self.state = CellState::Unseen;
    }
}
