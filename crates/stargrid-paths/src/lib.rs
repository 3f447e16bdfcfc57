//! A* shortest-path search over a [`Grid`](stargrid_core::Grid).
//!
//! The engine works in place: it drives each cell through
//! `Unseen → Open → Closed` and marks the winning route `Path`, leaving the
//! grid ready for a renderer.
//!
//! | Piece | Item |
//! |---|---|
//! | Heuristic | [`heuristic`], [`Heuristic`] |
//! | Neighbor generator | [`neighbors`], [`Neighbors`] |
//! | Open set | [`OpenSet`], [`LinearOpenSet`], [`HeapOpenSet`] |
//! | Search loop | [`astar`], [`Search`] |
//!
//! ```
//! use stargrid_core::{Grid, Point};
//! use stargrid_paths::astar;
//!
//! let mut grid = Grid::new(7, 5);
//! for y in 1..=3 {
//!     grid.disable(Point::new(3, y));
//! }
//! let outcome = astar(&mut grid, Point::new(1, 2), Point::new(5, 2)).unwrap();
//! assert_eq!(outcome.path().map(|p| p.cost()), Some(56));
//! ```

mod astar;
mod distance;
mod error;
mod neighbors;
mod openset;

pub use astar::{Outcome, Path, Search, SearchConfig, SearchStats, astar};
pub use distance::{
    DIAGONAL_COST, Heuristic, STRAIGHT_COST, chebyshev, heuristic, manhattan, octile,
};
pub use error::{Endpoint, SearchError};
pub use neighbors::{Direction, Neighbors, Step, neighbors};
pub use openset::{HeapOpenSet, LinearOpenSet, OpenSet, OpenSetKind};

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn config_round_trip() {
        let config = SearchConfig::default()
            .with_heuristic(Heuristic::Octile)
            .with_open_set(OpenSetKind::Heap);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(json, r#"{"heuristic":"octile","open_set":"heap"}"#);
        let back: SearchConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn config_fields_default() {
        let back: SearchConfig = serde_json::from_str(r#"{"open_set":"heap"}"#).unwrap();
        assert_eq!(back.heuristic, Heuristic::Manhattan);
        assert_eq!(back.open_set, OpenSetKind::Heap);
    }

    #[test]
    fn path_round_trip() {
        let mut grid = stargrid_core::Grid::new(3, 1);
        let out = astar(&mut grid, (0, 0).into(), (2, 0).into()).unwrap();
        let path = out.into_path().unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(back, path);
        assert_eq!(back.cost(), 20);
    }
}
