//! A single board cell and its presentation hints.

use serde::{Deserialize, Serialize};

use crate::core::{Point, Token};

/// Terminal-style color hint for the presentation layer.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Default,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

/// Where a cell is in its match lifecycle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// Settled and matchable.
    #[default]
    Alive,
    /// Matched and waiting for refill. Acts as a hole.
    Killed,
    /// Just refilled. Matchable, marked for presentation until settled.
    Born,
}

/// One board cell.
///
/// `position` is fixed when the grid is built and always equals the slot
/// the cell lives in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub position: Point,
    /// `None` only while the cell is a hole.
    pub token: Option<Token>,
    pub state: CellState,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    /// A settled cell holding `token`, with default colors for it.
    #[must_use]
    pub fn new(position: Point, token: Token) -> Self {
        Self {
            position,
            token: Some(token),
            state: CellState::Alive,
            fg: token.color(),
            bg: Color::Default,
        }
    }

    /// An empty hole waiting for refill.
    #[must_use]
    pub fn hole(position: Point) -> Self {
        Self {
            position,
            token: None,
            state: CellState::Killed,
            fg: Color::Default,
            bg: Color::Default,
        }
    }

    /// The token this cell can match with, if any.
    ///
    /// Killed cells never match, whatever they still carry.
    #[must_use]
    pub fn matchable(&self) -> Option<Token> {
        match self.state {
            CellState::Killed => None,
            CellState::Alive | CellState::Born => self.token,
        }
    }

    #[must_use]
    pub fn is_killed(&self) -> bool {
        self.state == CellState::Killed
    }

    /// Board glyph: the token's letter, or `.` for a hole.
    #[must_use]
    pub fn glyph(&self) -> char {
        self.matchable().map_or('.', Token::glyph)
    }
}
