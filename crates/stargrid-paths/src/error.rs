use std::fmt;

use stargrid_core::{Point, Range};

/// Which end of a search a [`SearchError`] refers to.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Start,
    Target,
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start => f.write_str("start"),
            Self::Target => f.write_str("target"),
        }
    }
}

/// Invalid search request. Reported before any cell is touched.
///
/// An unreachable target is not an error; see
/// [`Outcome::NoPath`](crate::Outcome::NoPath).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The endpoint lies outside the grid.
    OutOfBounds {
        endpoint: Endpoint,
        pos: Point,
        bounds: Range,
    },
    /// The endpoint is an obstacle.
    Disabled { endpoint: Endpoint, pos: Point },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds {
                endpoint,
                pos,
                bounds,
            } => write!(f, "{endpoint} {pos} is outside the grid {bounds}"),
            Self::Disabled { endpoint, pos } => write!(f, "{endpoint} {pos} is an obstacle"),
        }
    }
}

impl std::error::Error for SearchError {}
