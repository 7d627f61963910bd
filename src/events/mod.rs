//! Staged, tick-driven events.
//!
//! [`advance`] is the pure per-event transition; [`EventScheduler`] owns the
//! queue and is the only place committing events touch the grid.

mod event;
mod scheduler;

pub use event::{
    advance, Arity, Commit, Event, EventId, EventKind, EventPoints, Paint, Palette, Step,
    DEFAULT_PALETTE,
};
pub use scheduler::{EventScheduler, Tick};
