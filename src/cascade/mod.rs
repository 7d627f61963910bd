//! Cascade resolution: kill matched runs, refill under gravity, repeat.
//!
//! Only the resolver (and committing events that call into it) changes
//! tokens or lifecycle on the live board.

mod gravity;
mod resolver;

pub use gravity::gravity_fill;
pub use resolver::{CascadeResolver, Resolution};
