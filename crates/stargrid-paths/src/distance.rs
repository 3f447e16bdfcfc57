use stargrid_core::Point;

/// Cost of one orthogonal step.
pub const STRAIGHT_COST: i32 = 10;

/// Cost of one diagonal step (≈ √2 × [`STRAIGHT_COST`]).
pub const DIAGONAL_COST: i32 = 14;

// Distances are computed in u64 and clamped, so any pair of `i32`
// coordinates is accepted and results saturate at `i32::MAX`.

#[inline]
fn clamp(d: u64) -> i32 {
    i32::try_from(d).unwrap_or(i32::MAX)
}

#[inline]
fn deltas(a: Point, b: Point) -> (u64, u64) {
    (u64::from(a.x.abs_diff(b.x)), u64::from(a.y.abs_diff(b.y)))
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    let (dx, dy) = deltas(a, b);
    clamp(dx + dy)
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    let (dx, dy) = deltas(a, b);
    clamp(dx.max(dy))
}

/// Octile distance in step-cost units: the exact cost of the cheapest
/// obstacle-free 8-directional route.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let (dx, dy) = deltas(a, b);
    clamp(DIAGONAL_COST as u64 * dx.min(dy) + STRAIGHT_COST as u64 * dx.abs_diff(dy))
}

/// Remaining-cost estimate from `(x, y)` to `(target_x, target_y)`:
/// Manhattan distance scaled by [`STRAIGHT_COST`].
#[inline]
pub fn heuristic(x: i32, y: i32, target_x: i32, target_y: i32) -> i32 {
    STRAIGHT_COST.saturating_mul(manhattan(Point::new(x, y), Point::new(target_x, target_y)))
}

/// Heuristic used to order the open set.
///
/// `Manhattan` is the default. It ignores diagonal moves, so it can
/// overestimate by up to 6 per diagonal step and the route it finds is not
/// guaranteed to be the cheapest. `Octile`, `Chebyshev` and `Zero` never
/// overestimate under the 10/14 step costs; `Octile` is the tightest of
/// them and expands the fewest cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Heuristic {
    #[default]
    Manhattan,
    Octile,
    Chebyshev,
    /// Always zero: the search degrades to Dijkstra.
    Zero,
}

impl Heuristic {
    /// Estimate the cost from `from` to `to`.
    #[inline]
    pub fn estimate(self, from: Point, to: Point) -> i32 {
        match self {
            Self::Manhattan => heuristic(from.x, from.y, to.x, to.y),
            Self::Octile => octile(from, to),
            Self::Chebyshev => STRAIGHT_COST.saturating_mul(chebyshev(from, to)),
            Self::Zero => 0,
        }
    }
}
