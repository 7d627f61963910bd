//! Seeded randomness for board fills and refills.
//!
//! A board and every refill it will ever see are a pure function of the
//! seed. The generator position can be captured at any point and restored
//! later, so a session can be replayed from the middle of a cascade.
//!
//! ```
//! use gem_match::core::GameRng;
//!
//! let gems = ['A', 'B', 'C', 'D'];
//! let mut rng = GameRng::new(42);
//! let checkpoint = rng.state();
//!
//! let dealt: Vec<_> = (0..8).filter_map(|_| rng.pick(&gems)).collect();
//!
//! let mut replay = GameRng::from_state(&checkpoint);
//! let again: Vec<_> = (0..8).filter_map(|_| replay.pick(&gems)).collect();
//! assert_eq!(dealt, again);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Seeded ChaCha8 generator.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform index in `range`.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniform choice from `items`, or `None` if it is empty.
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        Some(items[self.gen_range_usize(0..items.len())])
    }

    /// Capture the generator position.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Resume from a captured position.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// A captured generator position.
///
/// Restoring is O(1): ChaCha8 seeks straight to the word position instead
/// of replaying earlier draws.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    pub seed: u64,
    pub word_pos: u128,
}
