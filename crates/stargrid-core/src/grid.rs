//! The [`Grid`] type — a row-major arena of search [`Cell`]s.
//!
//! The grid exclusively owns its cells. Cells refer to each other only
//! through flat indices (see [`Cell::parent`]), so a search can mutate any
//! cell through `&mut Grid` without aliasing.

use crate::cell::{Cell, CellState};
use crate::geom::{Point, Range};

/// A fixed-size, row-major grid of [`Cell`]s.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    cells: Vec<Cell>,
    bounds: Range,
    width: usize,
}

impl Grid {
    /// Create a new grid of the given dimensions with every cell unseen.
    /// Negative dimensions are clamped to zero.
    pub fn new(width: i32, height: i32) -> Self {
        let bounds = Range::new(0, 0, width.max(0), height.max(0));
        let mut cells = Vec::with_capacity(bounds.len());
        cells.extend(bounds.iter().map(Cell::new));
        Self {
            cells,
            bounds,
            width: bounds.width() as usize,
        }
    }

    /// The bounding range `[0, width) × [0, height)`.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
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

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        self.bounds.contains(p)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Convert a `Point` to a flat index. Returns `None` if out of bounds.
    #[inline]
    pub fn idx(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some(p.y as usize * self.width + p.x as usize)
    }

    /// Convert a flat index back to a `Point`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`. On a grid with no cells every index
    /// is out of range.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let len = self.cells.len();
        assert!(idx < len, "index {idx} outside a grid of {len} cells");
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    // -----------------------------------------------------------------------
    // Cell access
    // -----------------------------------------------------------------------

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn cell(&self, p: Point) -> Option<&Cell> {
        let i = self.idx(p)?;
        Some(&self.cells[i])
    }

    #[inline]
    pub fn cell_mut(&mut self, p: Point) -> Option<&mut Cell> {
        let i = self.idx(p)?;
        Some(&mut self.cells[i])
    }

    /// The cell at flat index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn at(&self, idx: usize) -> &Cell {
        &self.cells[idx]
    }

    /// Mutable access to the cell at flat index `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len()`.
    #[inline]
    pub fn at_mut(&mut self, idx: usize) -> &mut Cell {
        &mut self.cells[idx]
    }

    /// State of the cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn state(&self, p: Point) -> Option<CellState> {
        self.cell(p).map(Cell::state)
    }

    // -----------------------------------------------------------------------
    // Building
    // -----------------------------------------------------------------------

    /// Mark the cell at `p` as an obstacle. Returns `false` if `p` is out of
    /// bounds.
    pub fn disable(&mut self, p: Point) -> bool {
        match self.cell_mut(p) {
            Some(c) => {
                c.disable();
                true
            }
            None => false,
        }
    }

    /// Whether `p` is an obstacle. Out-of-bounds points are not.
    #[inline]
    pub fn is_disabled(&self, p: Point) -> bool {
        self.cell(p).is_some_and(Cell::is_disabled)
    }

    /// Precompute every passable cell's heuristic against `target`.
    pub fn bind_target(&mut self, target: Point, h: impl Fn(Point, Point) -> i32) {
        for c in &mut self.cells {
            let est = h(c.pos(), target);
            c.set_h(est);
        }
    }

    /// Return every passable cell to `Unseen` so the grid can serve a fresh
    /// search. Obstacles and heuristics are kept.
    pub fn reset_search(&mut self) {
        for c in &mut self.cells {
            c.reset();
        }
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// Row-major iterator over all cells.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Cell> + '_ {
        self.cells.iter()
    }

    /// Number of cells currently in `state`.
    pub fn count_state(&self, state: CellState) -> usize {
        self.cells.iter().filter(|c| c.state() == state).count()
    }
}
