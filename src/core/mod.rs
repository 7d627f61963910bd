//! Core types: coordinates, tokens, RNG, configuration.
//!
//! These are the value types every other module builds on. None of them
//! know about the grid or the rules.

pub mod point;
pub mod token;
pub mod rng;
pub mod config;

pub use point::{Axis, Direction, Point};
pub use token::{RandomTokens, ScriptedTokens, Token, TokenSource};
pub use rng::{GameRng, GameRngState};
pub use config::{BoardConfig, MoveScope, MIN_GEM_KINDS, MIN_GEM_MAX_CELLS};
