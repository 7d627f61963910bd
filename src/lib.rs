//! # gem-match
//!
//! Rules engine for a grid-based match-three puzzle.
//!
//! ## Design Principles
//!
//! 1. **Stable Between Moves**: After every committed mutation the board is
//!    resolved until no run remains. Moves are only offered on a settled board.
//!
//! 2. **Hypotheticals Are Free**: The grid is backed by persistent vectors, so
//!    trying a swap on a copy costs an O(1) clone and never touches the live
//!    board.
//!
//! 3. **Pure Transitions, One Mutator**: Advancing an event is a pure
//!    function. Only the scheduler applies commits, and it does so through
//!    the cascade resolver.
//!
//! ## Modules
//!
//! - `core`: Points, directions, tokens, RNG, configuration
//! - `grid`: Cells and the grid that stores them
//! - `matching`: Maximal run detection in all 8 directions
//! - `cascade`: Kill, gravity refill, repeat until stable
//! - `moves`: Legal swap enumeration
//! - `events`: Staged events and the tick-driven scheduler
//! - `game`: The playable session tying it all together
//! - `error`: Error types

pub mod core;
pub mod grid;
pub mod matching;
pub mod cascade;
pub mod moves;
pub mod events;
pub mod game;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    Axis, Direction, Point,
    Token, TokenSource, RandomTokens, ScriptedTokens,
    GameRng, GameRngState,
    BoardConfig, MoveScope, MIN_GEM_KINDS,
};

pub use crate::grid::{Cell, CellState, Color, Grid};

pub use crate::matching::{annotate_runs, find_runs, has_runs, Run, MIN_RUN};

pub use crate::cascade::{gravity_fill, CascadeResolver, Resolution};

pub use crate::moves::{is_legal, CandidateMove, MoveEnumerator};

pub use crate::events::{
    advance, Arity, Commit, Event, EventId, EventKind, Paint, Step,
    EventScheduler, Tick,
};

pub use crate::game::Game;

pub use crate::error::{ConfigError, EventError, GameError, GridError, MoveError, ResolveError};
