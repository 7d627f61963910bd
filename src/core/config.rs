//! Board configuration.
//!
//! Everything that shapes a session is set here at startup: board size,
//! how many gem kinds are in play, the RNG seed, stage budgets for the
//! staged events, and the cascade safety bound.

use serde::{Deserialize, Serialize};

use super::token::Token;
use crate::error::ConfigError;

/// Fewest gem kinds a board may use.
///
/// With fewer kinds, runs reappear in refills about as fast as they are
/// cleared and cascades routinely run into the pass limit.
pub const MIN_GEM_KINDS: usize = 5;

/// Largest board, in cells, that [`MIN_GEM_KINDS`] gems reliably settle.
pub const MIN_GEM_MAX_CELLS: usize = 256;

/// Which cells may originate a candidate swap.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveScope {
    /// Only cells whose 4 orthogonal neighbors are all on the board.
    #[default]
    Interior,
    /// Every cell, so every adjacent pair is considered.
    Full,
}

/// Session configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    /// Columns on the board.
    pub width: usize,

    /// Rows on the board.
    pub height: usize,

    /// Number of gem kinds in play (prefix of [`Token::ALL`]).
    pub gem_kinds: usize,

    /// Seed for board fills and refills.
    pub seed: u64,

    /// Ticks spent highlighting a selected move.
    pub highlight_stages: u32,

    /// Ticks a swap animates before committing.
    pub swap_stages: u32,

    /// Ticks refilled cells stay marked as born.
    pub birth_stages: u32,

    /// Cascade passes allowed per cell before resolution is treated
    /// as a broken invariant.
    pub pass_limit_factor: usize,

    /// Which cells may originate a candidate swap.
    pub move_scope: MoveScope,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: 9,
            height: 4,
            gem_kinds: 6,
            seed: 42,
            highlight_stages: 3,
            swap_stages: 5,
            birth_stages: 3,
            pass_limit_factor: 16,
            move_scope: MoveScope::Interior,
        }
    }
}

impl BoardConfig {
    /// Set the board dimensions.
    #[must_use]
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Set the number of gem kinds.
    #[must_use]
    pub fn with_gem_kinds(mut self, kinds: usize) -> Self {
        self.gem_kinds = kinds;
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the swap animation length.
    #[must_use]
    pub fn with_swap_stages(mut self, stages: u32) -> Self {
        self.swap_stages = stages;
        self
    }

    /// Set the selection highlight length.
    #[must_use]
    pub fn with_highlight_stages(mut self, stages: u32) -> Self {
        self.highlight_stages = stages;
        self
    }

    /// Set how long refilled cells stay marked as born.
    #[must_use]
    pub fn with_birth_stages(mut self, stages: u32) -> Self {
        self.birth_stages = stages;
        self
    }

    /// Set the move scope.
    #[must_use]
    pub fn with_move_scope(mut self, scope: MoveScope) -> Self {
        self.move_scope = scope;
        self
    }

    /// Maximum cascade passes for a board of this size.
    #[must_use]
    pub fn pass_limit(&self) -> usize {
        self.width * self.height * self.pass_limit_factor
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(format!(
                "board must be at least 1x1, got {}x{}",
                self.width, self.height
            )));
        }
        if i32::try_from(self.width).is_err() || i32::try_from(self.height).is_err() {
            return Err(ConfigError::Validation(
                "board dimensions must fit in i32".into(),
            ));
        }
        if !(MIN_GEM_KINDS..=Token::ALL.len()).contains(&self.gem_kinds) {
            return Err(ConfigError::Validation(format!(
                "gem_kinds must be in {}..={}, got {}",
                MIN_GEM_KINDS,
                Token::ALL.len(),
                self.gem_kinds
            )));
        }
        let cells = self.width.saturating_mul(self.height);
        if self.gem_kinds == MIN_GEM_KINDS && cells > MIN_GEM_MAX_CELLS {
            return Err(ConfigError::Validation(format!(
                "{} gem kinds cannot settle a {}x{} board, use {} or at most {} cells",
                self.gem_kinds,
                self.width,
                self.height,
                Token::ALL.len(),
                MIN_GEM_MAX_CELLS
            )));
        }
        if self.pass_limit_factor == 0 {
            return Err(ConfigError::Validation(
                "pass_limit_factor must be > 0".into(),
            ));
        }
        Ok(())
    }
}
