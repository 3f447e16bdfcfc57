use stargrid_core::{Grid, Point};

use crate::distance::{DIAGONAL_COST, STRAIGHT_COST};

/// One of the eight movement directions. "Up" is `y + 1`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    UpLeft,
    Up,
    UpRight,
    Right,
    DownRight,
    Down,
    DownLeft,
}

impl Direction {
    /// All directions in emission order.
    pub const ALL: [Direction; 8] = [
        Self::Left,
        Self::UpLeft,
        Self::Up,
        Self::UpRight,
        Self::Right,
        Self::DownRight,
        Self::Down,
        Self::DownLeft,
    ];

    /// Coordinate offset of one step in this direction.
    #[inline]
    pub const fn delta(self) -> Point {
        match self {
            Self::Left => Point::new(-1, 0),
            Self::UpLeft => Point::new(-1, 1),
            Self::Up => Point::new(0, 1),
            Self::UpRight => Point::new(1, 1),
            Self::Right => Point::new(1, 0),
            Self::DownRight => Point::new(1, -1),
            Self::Down => Point::new(0, -1),
            Self::DownLeft => Point::new(-1, -1),
        }
    }

    #[inline]
    pub const fn is_diagonal(self) -> bool {
        matches!(
            self,
            Self::UpLeft | Self::UpRight | Self::DownRight | Self::DownLeft
        )
    }

    /// Cost of one step in this direction.
    #[inline]
    pub const fn cost(self) -> i32 {
        if self.is_diagonal() {
            DIAGONAL_COST
        } else {
            STRAIGHT_COST
        }
    }
}

/// A reachable neighbor: flat grid index and the cost of stepping there.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Step {
    pub idx: usize,
    pub cost: i32,
}

/// Fixed-capacity list of up to eight [`Step`]s.
#[derive(Clone, Debug, Default)]
pub struct Neighbors {
    buf: [Step; 8],
    len: usize,
}

impl Neighbors {
    /// Collect the walkable in-bounds neighbors of the cell at `idx`, in
    /// [`Direction::ALL`] order. Each direction checks exactly the cell it
    /// emits.
    pub fn of(grid: &Grid, idx: usize) -> Self {
        let from = grid.point(idx);
        let mut n = Self::default();
        for dir in Direction::ALL {
            let d = dir.delta();
            let Some(ni) = grid.idx(from.shift(d.x, d.y)) else {
                continue;
            };
            if grid.at(ni).walkable() {
                n.buf[n.len] = Step {
                    idx: ni,
                    cost: dir.cost(),
                };
                n.len += 1;
            }
        }
        n
    }

    #[inline]
    pub fn as_slice(&self) -> &[Step] {
        &self.buf[..self.len]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.as_slice().iter()
    }
}

impl<'a> IntoIterator for &'a Neighbors {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Walkable neighbors of the cell at `p` with their step costs.
/// Returns an empty list if `p` is out of bounds.
pub fn neighbors(grid: &Grid, p: Point) -> Neighbors {
    match grid.idx(p) {
        Some(i) => Neighbors::of(grid, i),
        None => Neighbors::default(),
    }
}
