//! Board storage: cells and the grid that owns them.

mod board;
mod cell;

pub use board::Grid;
pub use cell::{Cell, CellState, Color};
