//! **stargrid-core** — data model for grid path search.
//!
//! This crate provides the types shared across the *stargrid* workspace:
//! geometry primitives, search cells and their states, the row-major
//! [`Grid`] arena that owns them, and a text [`Layout`] format for building
//! grids by hand.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod layout;

pub use cell::{Cell, CellState};
pub use geom::{Point, Range};
pub use grid::Grid;
pub use layout::{LAYOUT_CHARS, Layout, LayoutError};
