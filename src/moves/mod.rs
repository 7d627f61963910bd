//! Legal move enumeration over a settled board.

mod enumerator;

pub use enumerator::{is_legal, CandidateMove, MoveEnumerator};
