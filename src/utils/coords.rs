use std::ops::RangeInclusive;
use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumCount, EnumIter};

use super::Size;

// ----------------------------------------------
// Cell
// ----------------------------------------------

// X,Y position in the tile map grid of cells.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    #[inline]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    #[inline]
    pub const fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    #[inline]
    pub const fn invalid() -> Self {
        Self { x: -1, y: -1 }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.x >= 0 && self.y >= 0
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    #[inline]
    pub fn manhattan_distance(self, other: Cell) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

// ----------------------------------------------
// DiagDirection
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

// Map edge directions, in clockwise order starting at north-east.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display, EnumCount, EnumIter)]
pub enum DiagDirection {
    NE,
    SE,
    SW,
    NW,
}

impl DiagDirection {
    #[inline]
    pub const fn axis(self) -> Axis {
        match self {
            Self::NE | Self::SW => Axis::X,
            Self::SE | Self::NW => Axis::Y,
        }
    }

    // Next direction clockwise, or None after NW.
    #[inline]
    pub const fn next(self) -> Option<Self> {
        match self {
            Self::NE => Some(Self::SE),
            Self::SE => Some(Self::SW),
            Self::SW => Some(Self::NW),
            Self::NW => None,
        }
    }

    // One tile step in this direction.
    #[inline]
    pub const fn step(self) -> (i32, i32) {
        match self {
            Self::NE => (-1, 0),
            Self::SE => (0, 1),
            Self::SW => (1, 0),
            Self::NW => (0, -1),
        }
    }
}

// ----------------------------------------------
// CellRange
// ----------------------------------------------

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellRange {
    // Inclusive rage, e.g.: [start..=end]
    pub start: Cell,
    pub end: Cell,
}

impl CellRange {
    #[inline]
    pub const fn new(start: Cell, end: Cell) -> Self {
        Self { start, end }
    }

    // Rectangular tile area anchored at `origin` (its northernmost tile).
    #[inline]
    pub fn from_origin_and_size(origin: Cell, width: i32, height: i32) -> Self {
        debug_assert!(width > 0 && height > 0);
        Self {
            start: origin,
            end: Cell::new(origin.x + width - 1, origin.y + height - 1),
        }
    }

    #[inline]
    pub fn is_valid(&self) -> bool {
        self.start.is_valid() && self.end.is_valid() &&
        self.start.x <= self.end.x && self.start.y <= self.end.y
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.end.x - self.start.x + 1
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.end.y - self.start.y + 1
    }

    #[inline]
    pub fn area(&self) -> i32 {
        self.width() * self.height()
    }

    #[inline]
    pub fn x_range(&self) -> RangeInclusive<i32> {
        self.start.x..=self.end.x
    }

    #[inline]
    pub fn y_range(&self) -> RangeInclusive<i32> {
        self.start.y..=self.end.y
    }

    #[inline]
    pub fn iter(&self) -> CellRangeIter {
        CellRangeIter::new(*self)
    }

    #[inline]
    pub fn contains(&self, cell: Cell) -> bool {
        if cell.x < self.start.x || cell.y < self.start.y {
            return false;
        }
        if cell.x > self.end.x || cell.y > self.end.y {
            return false;
        }
        true
    }

    // Grows the range by `radius` on every side, clamped to a map of `map_size`.
    pub fn expanded(&self, radius: i32, map_size: Size) -> Self {
        debug_assert!(radius >= 0);
        Self {
            start: Cell::new((self.start.x - radius).max(0),
                             (self.start.y - radius).max(0)),
            end:   Cell::new((self.end.x + radius).min(map_size.width - 1),
                             (self.end.y + radius).min(map_size.height - 1)),
        }
    }
}

impl std::fmt::Display for CellRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "[{},{}; {},{}]",
               self.start.x,
               self.start.y,
               self.end.x,
               self.end.y)
    }
}

// ----------------------------------------------
// CellRangeIter
// ----------------------------------------------

// Row-major iteration over every cell of a CellRange.
#[derive(Copy, Clone)]
pub struct CellRangeIter {
    range:  CellRange,
    curr_y: i32,
    curr_x: i32,
    done:   bool,
}

impl CellRangeIter {
    #[inline]
    pub fn new(range: CellRange) -> Self {
        Self {
            range,
            curr_y: range.start.y,
            curr_x: range.start.x,
            done: !range.is_valid(),
        }
    }
}

impl Iterator for CellRangeIter {
    type Item = Cell;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let result = Cell::new(self.curr_x, self.curr_y);

        // Determine next x,y:
        if self.curr_x < self.range.end.x {
            self.curr_x += 1;
        } else if self.curr_y < self.range.end.y {
            self.curr_y += 1;
            self.curr_x = self.range.start.x;
        } else {
            self.done = true;
        }

        Some(result)
    }
}

// Guarantees next() always stays None after exhaustion.
impl FusedIterator for CellRangeIter {}

// Support for-each style iteration.
impl IntoIterator for &CellRange {
    type Item = Cell;
    type IntoIter = CellRangeIter;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
