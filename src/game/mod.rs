//! The playable session.
//!
//! [`Game`] owns one board and the machinery around it. Callers select
//! moves and tick; everything else (staging, committing, cascades,
//! re-enumeration) happens inside.

mod session;

pub use session::Game;
