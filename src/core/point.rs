//! Board coordinates and line directions.
//!
//! ## Layout
//!
//! `x` grows to the right, `y` grows downward: row `0` is the top of the
//! board and row `height - 1` is the bottom that gravity pulls toward.
//!
//! ## Usage
//!
//! ```
//! use gem_match::core::{Axis, Direction, Point};
//!
//! let p = Point::new(2, 1);
//! assert_eq!(p.step(Direction::Right), Point::new(3, 1));
//! assert_eq!(p.step(Direction::UpLeft), Point::new(1, 0));
//!
//! // Opposite directions share an axis
//! assert_eq!(Direction::Left.axis(), Direction::Right.axis());
//! assert_eq!(Direction::DownRight.axis(), Axis::Diagonal);
//! ```

use serde::{Deserialize, Serialize};

/// A cell coordinate on the board.
///
/// Points are plain values: two points are the same cell exactly when their
/// coordinates are equal. Ordering is by `x`, then `y`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The neighboring point one step along `direction`.
    ///
    /// The result may be off the board; bounds are the grid's concern.
    #[must_use]
    pub const fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self::new(self.x + dx, self.y + dy)
    }

    /// Check whether two points are orthogonal neighbors.
    #[must_use]
    pub fn is_adjacent(self, other: Point) -> bool {
        (self.x - other.x).abs() + (self.y - other.y).abs() == 1
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the 8 unit directions on the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    UpLeft,
    UpRight,
    DownLeft,
    DownRight,
}

impl Direction {
    /// All 8 directions, axis neighbors first.
    pub const ALL: [Direction; 8] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
        Direction::UpLeft,
        Direction::UpRight,
        Direction::DownLeft,
        Direction::DownRight,
    ];

    /// The 4 orthogonal directions (swap neighbors).
    pub const ORTHOGONAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// `(dx, dy)` for a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::UpLeft => (-1, -1),
            Direction::UpRight => (1, -1),
            Direction::DownLeft => (-1, 1),
            Direction::DownRight => (1, 1),
        }
    }

    /// The line this direction runs along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::UpLeft | Direction::DownRight => Axis::Diagonal,
            Direction::UpRight | Direction::DownLeft => Axis::AntiDiagonal,
        }
    }
}

/// A line through the board, ignoring which way it is walked.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Top-left to bottom-right.
    Diagonal,
    /// Bottom-left to top-right.
    AntiDiagonal,
}
