//! Text rendering of a searched [`Grid`].
//!
//! Rows are printed in storage order (`y = 0` first), one marker per cell.
//! [`render`] produces plain text; [`write_colored`] writes the same picture
//! with ANSI colours through crossterm.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
};

use stargrid_core::{CellState, Grid, Point};

/// What a rendered cell shows. Endpoints take precedence over cell state.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mark {
    Start,
    Target,
    Path,
    Obstacle,
    Blank,
}

impl Mark {
    /// Classify the cell at `p`.
    pub fn of(grid: &Grid, p: Point, start: Point, target: Point) -> Self {
        if p == start {
            return Self::Start;
        }
        if p == target {
            return Self::Target;
        }
        match grid.state(p) {
            Some(CellState::Path) => Self::Path,
            Some(CellState::Disabled) => Self::Obstacle,
            _ => Self::Blank,
        }
    }

    fn color(self) -> Color {
        match self {
            Self::Start => Color::Rgb { r: 255, g: 220, b: 80 },
            Self::Target => Color::Rgb { r: 220, g: 50, b: 50 },
            Self::Path => Color::Rgb { r: 50, g: 180, b: 255 },
            Self::Obstacle => Color::Rgb { r: 100, g: 100, b: 130 },
            Self::Blank => Color::Reset,
        }
    }
}

/// The text drawn for each [`Mark`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Glyphs {
    pub start: String,
    pub target: String,
    pub path: String,
    pub obstacle: String,
    pub blank: String,
}

impl Default for Glyphs {
    fn default() -> Self {
        Self {
            start: "[O] ".into(),
            target: "[X] ".into(),
            path: "[*] ".into(),
            obstacle: "[|] ".into(),
            blank: "[ ] ".into(),
        }
    }
}

impl Glyphs {
    /// Single-character markers with no brackets: `O X * # .`.
    pub fn compact() -> Self {
        Self {
            start: "O".into(),
            target: "X".into(),
            path: "*".into(),
            obstacle: "#".into(),
            blank: ".".into(),
        }
    }

    #[inline]
    pub fn get(&self, mark: Mark) -> &str {
        match mark {
            Mark::Start => &self.start,
            Mark::Target => &self.target,
            Mark::Path => &self.path,
            Mark::Obstacle => &self.obstacle,
            Mark::Blank => &self.blank,
        }
    }
}

/// Render `grid` with the default bracketed markers, one line per row.
pub fn render(grid: &Grid, start: Point, target: Point) -> String {
    render_with(grid, start, target, &Glyphs::default())
}

/// Render `grid` with custom markers, one line per row.
pub fn render_with(grid: &Grid, start: Point, target: Point, glyphs: &Glyphs) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let mark = Mark::of(grid, Point::new(x, y), start, target);
            out.push_str(glyphs.get(mark));
        }
        out.push('\n');
    }
    out
}

/// Write `grid` to `w` with one colour per [`Mark`].
pub fn write_colored<W: Write>(
    w: &mut W,
    grid: &Grid,
    start: Point,
    target: Point,
    glyphs: &Glyphs,
) -> io::Result<()> {
    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let mark = Mark::of(grid, Point::new(x, y), start, target);
            queue!(w, SetForegroundColor(mark.color()), Print(glyphs.get(mark)))?;
        }
        queue!(w, ResetColor, Print("\n"))?;
    }
    w.flush()
}
