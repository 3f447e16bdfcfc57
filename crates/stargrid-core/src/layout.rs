//! Grids built from text.
//!
//! A [`Layout`] parses an ASCII picture into a [`Grid`] plus the start and
//! target positions. Lines are separated by `'\n'` and must all have the
//! same width. Line `n` becomes row `y = n`.
//!
//! | Char | Meaning |
//! |---|---|
//! | `#` `\|` | obstacle |
//! | `.` space | free cell |
//! | `O` `S` | start |
//! | `X` `T` | target |

use std::fmt;

use crate::geom::Point;
use crate::grid::Grid;

/// Characters accepted by [`Layout::parse`].
pub const LAYOUT_CHARS: &str = "#|. OSXT";

/// A grid together with the endpoints marked in its text picture.
#[derive(Debug, Clone)]
pub struct Layout {
    pub grid: Grid,
    pub start: Point,
    pub target: Point,
}

impl Layout {
    /// Parse a layout picture.
    ///
    /// Empty lines before and after the picture are ignored, as is a `'\r'`
    /// at the end of each line. A line of spaces is a row of free cells.
    /// Exactly one start and one target must be present.
    pub fn parse(s: &str) -> Result<Self, LayoutError> {
        let lines: Vec<&str> = s
            .lines()
            .map(|l| l.strip_suffix('\r').unwrap_or(l))
            .skip_while(|l| l.is_empty())
            .collect();
        let end = lines
            .iter()
            .rposition(|l| !l.is_empty())
            .map_or(0, |i| i + 1);
        let lines = &lines[..end];

        let width = lines.first().map_or(0, |l| l.chars().count());
        if lines.iter().any(|l| l.chars().count() != width) {
            return Err(LayoutError::InconsistentSize(lines.join("\n")));
        }

        let mut grid = Grid::new(width as i32, lines.len() as i32);
        let mut start = None;
        let mut target = None;

        for (y, line) in lines.iter().enumerate() {
            for (x, ch) in line.chars().enumerate() {
                let pos = Point::new(x as i32, y as i32);
                match ch {
                    '#' | '|' => {
                        grid.disable(pos);
                    }
                    '.' | ' ' => {}
                    'O' | 'S' => {
                        if start.replace(pos).is_some() {
                            return Err(LayoutError::DuplicateStart { pos });
                        }
                    }
                    'X' | 'T' => {
                        if target.replace(pos).is_some() {
                            return Err(LayoutError::DuplicateTarget { pos });
                        }
                    }
                    _ => return Err(LayoutError::InvalidChar { ch, pos }),
                }
            }
        }

        Ok(Self {
            grid,
            start: start.ok_or(LayoutError::MissingStart)?,
            target: target.ok_or(LayoutError::MissingTarget)?,
        })
    }
}

/// Errors that can occur when parsing a layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// Lines have inconsistent widths.
    InconsistentSize(String),
    /// A character outside [`LAYOUT_CHARS`] was found.
    InvalidChar { ch: char, pos: Point },
    MissingStart,
    MissingTarget,
    DuplicateStart { pos: Point },
    DuplicateTarget { pos: Point },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentSize(s) => write!(f, "layout: inconsistent line widths:\n{s}"),
            Self::InvalidChar { ch, pos } => {
                write!(f, "layout contains invalid character \u{201c}{ch}\u{201d} at {pos}")
            }
            Self::MissingStart => write!(f, "layout has no start cell (O or S)"),
            Self::MissingTarget => write!(f, "layout has no target cell (X or T)"),
            Self::DuplicateStart { pos } => write!(f, "layout has a second start cell at {pos}"),
            Self::DuplicateTarget { pos } => write!(f, "layout has a second target cell at {pos}"),
        }
    }
}

impl std::error::Error for LayoutError {}
