//! Error types.
//!
//! Every error here is an internal invariant violation: a caller asked for
//! something the rules never allow (reading off the board, enumerating an
//! unsettled grid, committing an event with the wrong number of points).
//! User-facing conditions such as an out-of-range move index or a board
//! with no legal moves are ordinary states, not errors.

use crate::core::Point;
use crate::events::{Arity, EventKind};

/// Errors from grid access and construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    #[error("({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },

    #[error("unknown board glyph {0:?}")]
    InvalidGlyph(char),

    #[error("grid shape mismatch: expected {expected} cells, got {actual}")]
    Shape { expected: usize, actual: usize },
}

/// Errors from cascade resolution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("cascade did not settle within {limit} passes")]
    PassLimit { limit: usize },

    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

/// Errors from move enumeration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("cannot enumerate moves on an unstable grid ({runs} runs, {holes} holes pending)")]
    UnstableGrid { runs: usize, holes: usize },

    #[error("grid error: {0}")]
    Grid(#[from] GridError),
}

/// Errors from advancing or committing events.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EventError {
    #[error("{kind} event needs {expected} points, got {actual}")]
    InvalidArity {
        kind: EventKind,
        expected: Arity,
        actual: usize,
    },

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),
}

/// Errors from loading or validating configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("config validation error: {0}")]
    Validation(String),
}

/// Any error surfaced by a [`Game`](crate::game::Game) session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GameError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),

    #[error("grid error: {0}")]
    Grid(#[from] GridError),

    #[error("resolve error: {0}")]
    Resolve(#[from] ResolveError),

    #[error("move error: {0}")]
    Move(#[from] MoveError),

    #[error("event error: {0}")]
    Event(#[from] EventError),
}

impl GridError {
    /// Build an out-of-bounds error for `point`.
    pub(crate) fn out_of_bounds(point: Point, width: usize, height: usize) -> Self {
        GridError::OutOfBounds {
            x: point.x,
            y: point.y,
            width,
            height,
        }
    }
}
