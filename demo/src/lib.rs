//! The `stargrid` command: grid sources (the built-in wall scenario and
//! layout files), the search-and-print run, and its exit status.

use std::fmt;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use stargrid_core::{Grid, Layout, LayoutError, Point};
use stargrid_paths::{Outcome, Search, SearchConfig, SearchError};
use stargrid_term::{Glyphs, render_with, write_colored};

pub const WIDTH: i32 = 7;
pub const HEIGHT: i32 = 5;
pub const START: Point = Point::new(1, 2);
pub const TARGET: Point = Point::new(5, 2);

/// A 7×5 grid with a three-cell wall at `x = 3` between start and target.
pub fn wall_scenario() -> Layout {
    let mut grid = Grid::new(WIDTH, HEIGHT);
    for y in 1..=3 {
        grid.disable(Point::new(3, y));
    }
    Layout {
        grid,
        start: START,
        target: TARGET,
    }
}

/// Read and parse a layout file.
pub fn load_layout(path: &Path) -> Result<Layout, DemoError> {
    let text = fs::read_to_string(path).map_err(|source| DemoError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let layout = Layout::parse(&text)?;
    log::info!(
        "loaded {}: {}x{} grid, start {}, target {}",
        path.display(),
        layout.grid.width(),
        layout.grid.height(),
        layout.start,
        layout.target
    );
    Ok(layout)
}

/// Exit status when a path was found.
pub const EXIT_FOUND: u8 = 0;
/// Exit status when the input was unusable or output failed.
pub const EXIT_ERROR: u8 = 1;
/// Exit status when the search ran but no path exists.
pub const EXIT_NO_PATH: u8 = 2;

/// What to search and how to print it.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Layout file; `None` runs [`wall_scenario`].
    pub grid: Option<PathBuf>,
    pub config: SearchConfig,
    pub color: bool,
    /// One character per cell instead of bracketed markers.
    pub compact: bool,
    /// Print search counters after the result line.
    pub stats: bool,
}

/// Load the grid, search it and print the picture and result to `out`.
pub fn run<W: Write>(opts: &Options, out: &mut W) -> Result<Outcome, DemoError> {
    let Layout {
        mut grid,
        start,
        target,
    } = match &opts.grid {
        Some(path) => load_layout(path)?,
        None => wall_scenario(),
    };

    let outcome = Search::new(opts.config).run(&mut grid, start, target)?;

    let glyphs = if opts.compact {
        Glyphs::compact()
    } else {
        Glyphs::default()
    };
    if opts.color {
        write_colored(out, &grid, start, target, &glyphs)?;
    } else {
        write!(out, "{}", render_with(&grid, start, target, &glyphs))?;
    }

    match &outcome {
        Outcome::Found { path, .. } => {
            writeln!(out, "path: {} steps, cost {}", path.steps(), path.cost())?;
        }
        Outcome::NoPath { .. } => writeln!(out, "no path from {start} to {target}")?,
    }
    if opts.stats {
        let s = outcome.stats();
        writeln!(
            out,
            "expanded {}, discovered {}, improved {}, max open {}",
            s.expanded, s.discovered, s.improved, s.max_open
        )?;
    }
    out.flush()?;
    Ok(outcome)
}

/// Map the result of [`run`] to the process exit status.
pub fn exit_status(result: &Result<Outcome, DemoError>) -> u8 {
    match result {
        Ok(Outcome::Found { .. }) => EXIT_FOUND,
        Ok(Outcome::NoPath { .. }) => EXIT_NO_PATH,
        Err(_) => EXIT_ERROR,
    }
}

/// Anything that stops the command before a result can be printed.
#[derive(Debug)]
pub enum DemoError {
    Io {
        path: PathBuf,
        source: io::Error,
    },
    Layout(LayoutError),
    Search(SearchError),
    Output(io::Error),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "cannot read {}: {source}", path.display()),
            Self::Layout(e) => write!(f, "{e}"),
            Self::Search(e) => write!(f, "invalid search: {e}"),
            Self::Output(e) => write!(f, "cannot write output: {e}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Layout(e) => Some(e),
            Self::Search(e) => Some(e),
            Self::Output(e) => Some(e),
        }
    }
}

impl From<LayoutError> for DemoError {
    fn from(e: LayoutError) -> Self {
        Self::Layout(e)
    }
}

impl From<SearchError> for DemoError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<io::Error> for DemoError {
    fn from(e: io::Error) -> Self {
        Self::Output(e)
    }
}
