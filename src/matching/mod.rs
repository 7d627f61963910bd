//! Match detection: finding maximal runs of identical tokens.
//!
//! Detection is a pure function of the grid. It never mutates, and it runs
//! equally well on the live board or a hypothetical copy.

mod detector;

pub use detector::{annotate_runs, find_runs, has_runs, Run, RunPoints, MIN_RUN};
