use stargrid_core::{CellState, Grid, Point};

use crate::distance::Heuristic;
use crate::error::{Endpoint, SearchError};
use crate::neighbors::Neighbors;
use crate::openset::{HeapOpenSet, LinearOpenSet, OpenSet, OpenSetKind};

/// Tuning knobs for a [`Search`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SearchConfig {
    pub heuristic: Heuristic,
    pub open_set: OpenSetKind,
}

impl SearchConfig {
    /// Set the heuristic (builder).
    #[inline]
    pub const fn with_heuristic(mut self, heuristic: Heuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Set the open-set implementation (builder).
    #[inline]
    pub const fn with_open_set(mut self, open_set: OpenSetKind) -> Self {
        self.open_set = open_set;
        self
    }
}

/// Counters collected during one search.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchStats {
    /// Cells selected from the open set and closed.
    pub expanded: usize,
    /// Cells opened, including the start.
    pub discovered: usize,
    /// Cheaper routes found to cells that were already open.
    pub improved: usize,
    /// Largest open-set size observed.
    pub max_open: usize,
}

/// A route found by the search.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    points: Vec<Point>,
    cost: i32,
}

impl Path {
    /// Cells on the route, start first, target last.
    #[inline]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Sum of the step costs along the route.
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of cells on the route (both endpoints included).
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of moves, one less than [`len`](Self::len).
    #[inline]
    pub fn steps(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    #[inline]
    pub fn start(&self) -> Option<Point> {
        self.points.first().copied()
    }

    #[inline]
    pub fn target(&self) -> Option<Point> {
        self.points.last().copied()
    }
}

/// Result of a valid search request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The target was reached; the route's cells are marked
    /// [`CellState::Path`] in the grid.
    Found { path: Path, stats: SearchStats },
    /// The open set ran dry before the target was selected.
    NoPath { stats: SearchStats },
}

impl Outcome {
    #[inline]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Found { path, .. } => Some(path),
            Self::NoPath { .. } => None,
        }
    }

    #[inline]
    pub fn into_path(self) -> Option<Path> {
        match self {
            Self::Found { path, .. } => Some(path),
            Self::NoPath { .. } => None,
        }
    }

    #[inline]
    pub fn stats(&self) -> SearchStats {
        match self {
            Self::Found { stats, .. } | Self::NoPath { stats } => *stats,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found { .. })
    }
}

/// A* search over a [`Grid`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Search {
    config: SearchConfig,
}

impl Search {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> SearchConfig {
        self.config
    }

    /// Find a route from `start` to `target`.
    ///
    /// Any bookkeeping left by an earlier search is cleared first, then every
    /// passable cell's `h` is computed against `target`. On success the cells
    /// of the route are marked [`CellState::Path`]; either way the grid keeps
    /// the final cell states for rendering or inspection.
    pub fn run(
        &self,
        grid: &mut Grid,
        start: Point,
        target: Point,
    ) -> Result<Outcome, SearchError> {
        let start_idx = endpoint_idx(grid, Endpoint::Start, start)?;
        let target_idx = endpoint_idx(grid, Endpoint::Target, target)?;

        log::debug!(
            "A* {start} -> {target} on {}x{} grid ({:?}, {:?} open set)",
            grid.width(),
            grid.height(),
            self.config.heuristic,
            self.config.open_set,
        );

        grid.reset_search();
        let heuristic = self.config.heuristic;
        grid.bind_target(target, |p, t| heuristic.estimate(p, t));

        let outcome = match self.config.open_set {
            OpenSetKind::Linear => search(grid, start_idx, target_idx, LinearOpenSet::new()),
            OpenSetKind::Heap => {
                let open = HeapOpenSet::new(grid.len());
                search(grid, start_idx, target_idx, open)
            }
        };

        match &outcome {
            Outcome::Found { path, stats } => log::debug!(
                "path found: {} cells, cost {}, {} expanded",
                path.len(),
                path.cost(),
                stats.expanded
            ),
            Outcome::NoPath { stats } => {
                log::debug!("no path: open set exhausted after {} expansions", stats.expanded)
            }
        }
        Ok(outcome)
    }
}

/// Run A* with the default configuration: Manhattan heuristic and a
/// linear-scan open set.
pub fn astar(grid: &mut Grid, start: Point, target: Point) -> Result<Outcome, SearchError> {
    Search::default().run(grid, start, target)
}

fn endpoint_idx(grid: &Grid, endpoint: Endpoint, pos: Point) -> Result<usize, SearchError> {
    let Some(idx) = grid.idx(pos) else {
        return Err(SearchError::OutOfBounds {
            endpoint,
            pos,
            bounds: grid.bounds(),
        });
    };
    if grid.at(idx).is_disabled() {
        return Err(SearchError::Disabled { endpoint, pos });
    }
    Ok(idx)
}

fn search<O: OpenSet>(
    grid: &mut Grid,
    start_idx: usize,
    target_idx: usize,
    mut open: O,
) -> Outcome {
    let mut stats = SearchStats::default();

    grid.at_mut(start_idx).open(0, None);
    open.push(grid, start_idx);
    stats.discovered = 1;
    stats.max_open = 1;

    while !open.is_empty() {
        let Some(ci) = open.pop_min(grid) else {
            panic!("open set reports {} members but yielded none", open.len());
        };

        grid.at_mut(ci).close();
        stats.expanded += 1;

        if ci == target_idx {
            let path = backtrace(grid, ci);
            return Outcome::Found { path, stats };
        }

        let current_g = grid.at(ci).g();
        log::trace!(
            "expand {} g={} f={}",
            grid.point(ci),
            current_g,
            grid.at(ci).f()
        );

        let neighbors = Neighbors::of(grid, ci);
        for step in &neighbors {
            let new_g = current_g + step.cost;
            let n = grid.at_mut(step.idx);
            match n.state() {
                CellState::Open => {
                    if n.improve(new_g, ci) {
                        open.decrease(grid, step.idx);
                        stats.improved += 1;
                    }
                }
                CellState::Unseen => {
                    n.open(new_g, Some(ci));
                    open.push(grid, step.idx);
                    stats.discovered += 1;
                }
                // Not walkable, so never emitted.
                CellState::Closed | CellState::Path | CellState::Disabled => {}
            }
        }
        stats.max_open = stats.max_open.max(open.len());
    }

    Outcome::NoPath { stats }
}

/// Mark the route ending at `target_idx` as [`CellState::Path`] by following
/// parent links back to the start, and return it start-first.
fn backtrace(grid: &mut Grid, target_idx: usize) -> Path {
    let cost = grid.at(target_idx).g();
    let mut points = Vec::new();
    let mut cur = Some(target_idx);
    while let Some(i) = cur {
        let cell = grid.at_mut(i);
        cell.mark_path();
        points.push(cell.pos());
        cur = cell.parent();
    }
    points.reverse();
    Path { points, cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::{DIAGONAL_COST, STRAIGHT_COST};
    use stargrid_core::Layout;

    const WALL: &str = "
.......
...#...
.O.#.X.
...#...
.......
";

    const SEALED: &str = "
...#...
...#...
.O.#.X.
...#...
...#...
";

    fn pts(v: &[(i32, i32)]) -> Vec<Point> {
        v.iter().map(|&p| Point::from(p)).collect()
    }

    fn configs() -> Vec<SearchConfig> {
        let mut out = Vec::new();
        for h in [
            Heuristic::Manhattan,
            Heuristic::Octile,
            Heuristic::Chebyshev,
            Heuristic::Zero,
        ] {
            for o in [OpenSetKind::Linear, OpenSetKind::Heap] {
                out.push(SearchConfig::default().with_heuristic(h).with_open_set(o));
            }
        }
        out
    }

    /// Exhaustive Dijkstra over the free cells, independent of the engine.
    fn reference_cost(grid: &Grid, from: Point, to: Point) -> Option<i32> {
        let mut dist = vec![i32::MAX; grid.len()];
        let mut done = vec![false; grid.len()];
        dist[grid.idx(from)?] = 0;
        loop {
            let cur = (0..grid.len())
                .filter(|&i| !done[i] && dist[i] != i32::MAX)
                .min_by_key(|&i| dist[i])?;
            done[cur] = true;
            let p = grid.point(cur);
            if p == to {
                return Some(dist[cur]);
            }
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let Some(ni) = grid.idx(p.shift(dx, dy)) else {
                        continue;
                    };
                    if grid.at(ni).is_disabled() {
                        continue;
                    }
                    let cost = if dx != 0 && dy != 0 { DIAGONAL_COST } else { STRAIGHT_COST };
                    dist[ni] = dist[ni].min(dist[cur] + cost);
                }
            }
        }
    }

    fn step_cost(a: Point, b: Point) -> i32 {
        let d = b - a;
        assert!(d.x.abs() <= 1 && d.y.abs() <= 1 && d != Point::ZERO, "{a} -> {b} is not a step");
        if d.x != 0 && d.y != 0 { DIAGONAL_COST } else { STRAIGHT_COST }
    }

    #[test]
    fn detours_around_wall() {
        let Layout {
            mut grid,
            start,
            target,
        } = Layout::parse(WALL).unwrap();
        let outcome = astar(&mut grid, start, target).unwrap();
        let path = outcome.path().unwrap();
        assert_eq!(path.points(), pts(&[(1, 2), (2, 3), (3, 4), (4, 3), (5, 2)]));
        assert_eq!(path.cost(), 4 * DIAGONAL_COST);
        assert_eq!(path.steps(), 4);
        assert_eq!(path.start(), Some(start));
        assert_eq!(path.target(), Some(target));
        assert_eq!(outcome.stats().expanded, 10);
        for &p in path.points() {
            assert_eq!(grid.state(p), Some(CellState::Path));
        }
        assert_eq!(grid.count_state(CellState::Path), 5);
        assert_eq!(grid.count_state(CellState::Disabled), 3);
    }

    #[test]
    fn sealed_wall_has_no_path() {
        for config in configs() {
            let Layout {
                mut grid,
                start,
                target,
            } = Layout::parse(SEALED).unwrap();
            let outcome = Search::new(config).run(&mut grid, start, target).unwrap();
            assert!(!outcome.is_found(), "{config:?}");
            assert_eq!(grid.count_state(CellState::Path), 0);
            // Everything left of the wall was explored, nothing right of it.
            assert_eq!(outcome.stats().expanded, 15);
            assert_eq!(grid.state(target), Some(CellState::Unseen));
        }
    }

    #[test]
    fn start_equals_target() {
        let mut grid = Grid::new(3, 3);
        let p = Point::new(1, 1);
        let outcome = astar(&mut grid, p, p).unwrap();
        let path = outcome.path().unwrap();
        assert_eq!(path.points(), &[p]);
        assert_eq!(path.cost(), 0);
        assert_eq!(path.steps(), 0);
        assert_eq!(outcome.stats().expanded, 1);
        assert_eq!(grid.state(p), Some(CellState::Path));
        assert_eq!(grid.count_state(CellState::Open), 0);
    }

    #[test]
    fn invalid_endpoints_are_rejected_untouched() {
        let mut grid = Grid::new(7, 5);
        grid.disable(Point::new(3, 2));
        let before = grid.clone();

        let err = astar(&mut grid, Point::new(-1, 2), Point::new(5, 2)).unwrap_err();
        assert_eq!(
            err,
            SearchError::OutOfBounds {
                endpoint: Endpoint::Start,
                pos: Point::new(-1, 2),
                bounds: grid.bounds(),
            }
        );
        let err = astar(&mut grid, Point::new(1, 2), Point::new(7, 2)).unwrap_err();
        assert!(matches!(
            err,
            SearchError::OutOfBounds {
                endpoint: Endpoint::Target,
                ..
            }
        ));
        let err = astar(&mut grid, Point::new(3, 2), Point::new(5, 2)).unwrap_err();
        assert_eq!(
            err,
            SearchError::Disabled {
                endpoint: Endpoint::Start,
                pos: Point::new(3, 2)
            }
        );
        let err = astar(&mut grid, Point::new(1, 2), Point::new(3, 2)).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Disabled {
                endpoint: Endpoint::Target,
                ..
            }
        ));
        assert_eq!(grid, before);
    }

    #[test]
    fn repeated_runs_are_identical() {
        for config in configs() {
            let Layout {
                mut grid,
                start,
                target,
            } = Layout::parse(WALL).unwrap();
            let search = Search::new(config);
            let first = search.run(&mut grid, start, target).unwrap();
            let snapshot = grid.clone();
            let second = search.run(&mut grid, start, target).unwrap();
            assert_eq!(first, second, "{config:?}");
            assert_eq!(grid, snapshot, "{config:?}");
        }
    }

    #[test]
    fn linear_and_heap_agree() {
        let layouts = [
            WALL,
            "
O.#.....
..#.##..
..#..#..
.....#.X
",
            "
O.........
.########.
.#......#.
.#.####.#.
.#.#X...#.
.#.######.
..........
",
        ];
        for text in layouts {
            for h in [Heuristic::Manhattan, Heuristic::Octile, Heuristic::Zero] {
                let run = |open_set| {
                    let Layout {
                        mut grid,
                        start,
                        target,
                    } = Layout::parse(text).unwrap();
                    let config = SearchConfig::default()
                        .with_heuristic(h)
                        .with_open_set(open_set);
                    let out = Search::new(config).run(&mut grid, start, target).unwrap();
                    (out, grid)
                };
                let (lin, lin_grid) = run(OpenSetKind::Linear);
                let (heap, heap_grid) = run(OpenSetKind::Heap);
                assert_eq!(lin, heap, "{h:?}\n{text}");
                assert_eq!(lin_grid, heap_grid, "{h:?}\n{text}");
            }
        }
    }

    #[test]
    fn admissible_heuristics_find_cheapest_route() {
        let layouts = [
            WALL,
            "
O..#......
.#.#.####.
.#...#..#.
.#####.##.
......#..X
",
            "
....#....
.##.#.##.
.#O.#..#.
.#..#X.#.
.##...##.
.........
",
        ];
        for text in layouts {
            for h in [Heuristic::Octile, Heuristic::Chebyshev, Heuristic::Zero] {
                let Layout {
                    mut grid,
                    start,
                    target,
                } = Layout::parse(text).unwrap();
                let best = reference_cost(&grid, start, target);
                let config = SearchConfig::default().with_heuristic(h);
                let out = Search::new(config).run(&mut grid, start, target).unwrap();
                assert_eq!(out.path().map(Path::cost), best, "{h:?}\n{text}");
            }
        }
    }

    #[test]
    fn manhattan_can_miss_cheapest_route() {
        let text = "
..O
.#.
...
X..
";
        let Layout {
            mut grid,
            start,
            target,
        } = Layout::parse(text).unwrap();
        let manhattan = astar(&mut grid, start, target).unwrap();
        assert_eq!(manhattan.path().map(Path::cost), Some(44));

        let octile = SearchConfig::default().with_heuristic(Heuristic::Octile);
        let best = Search::new(octile).run(&mut grid, start, target).unwrap();
        assert_eq!(best.path().map(Path::cost), Some(38));
        assert_eq!(reference_cost(&grid, start, target), Some(38));
    }

    #[test]
    fn path_is_connected_and_avoids_obstacles() {
        let text = "
O.#.....
..#.##..
..#..#..
.....#.X
";
        for config in configs() {
            let Layout {
                mut grid,
                start,
                target,
            } = Layout::parse(text).unwrap();
            let out = Search::new(config).run(&mut grid, start, target).unwrap();
            let path = out.path().unwrap();
            let total: i32 = path.points().windows(2).map(|w| step_cost(w[0], w[1])).sum();
            assert_eq!(total, path.cost(), "{config:?}");
            for &p in path.points() {
                assert!(grid.contains(p));
                assert_eq!(grid.state(p), Some(CellState::Path));
            }
            assert_eq!(grid.count_state(CellState::Disabled), 7);
        }
    }

    /// With a zero heuristic every closed cell holds its exact distance, so
    /// no closed cell's cost was lowered after it was finalized.
    #[test]
    fn closed_costs_are_final() {
        let Layout {
            mut grid,
            start,
            target,
        } = Layout::parse(WALL).unwrap();
        let config = SearchConfig::default().with_heuristic(Heuristic::Zero);
        Search::new(config).run(&mut grid, start, target).unwrap();
        let finalized: Vec<(Point, i32)> = grid
            .iter()
            .filter(|c| matches!(c.state(), CellState::Closed | CellState::Path))
            .map(|c| (c.pos(), c.g()))
            .collect();
        assert!(!finalized.is_empty());
        for (p, g) in finalized {
            let fresh = Layout::parse(WALL).unwrap().grid;
            assert_eq!(Some(g), reference_cost(&fresh, start, p), "at {p}");
        }
    }

    #[test]
    fn parents_point_at_finalized_cells() {
        let Layout {
            mut grid,
            start,
            target,
        } = Layout::parse(WALL).unwrap();
        astar(&mut grid, start, target).unwrap();
        for c in grid.iter() {
            if let Some(pi) = c.parent() {
                let parent = grid.at(pi);
                assert!(
                    matches!(parent.state(), CellState::Closed | CellState::Path),
                    "{} has non-final parent {}",
                    c.pos(),
                    parent.pos()
                );
                assert_eq!(step_cost(parent.pos(), c.pos()) + parent.g(), c.g());
            } else if c.pos() != start {
                assert!(matches!(c.state(), CellState::Unseen | CellState::Disabled));
            }
        }
    }

    #[test]
    fn stats_are_consistent() {
        let Layout {
            mut grid,
            start,
            target,
        } = Layout::parse(WALL).unwrap();
        let stats = astar(&mut grid, start, target).unwrap().stats();
        let closed = grid.count_state(CellState::Closed) + grid.count_state(CellState::Path);
        let open = grid.count_state(CellState::Open);
        assert_eq!(stats.expanded, closed);
        assert_eq!(stats.discovered, closed + open);
        assert!(stats.max_open >= open);
    }
}
