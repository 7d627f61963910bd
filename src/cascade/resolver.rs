//! Cascade resolution.
//!
//! `resolve` settles a board: refill pending holes, detect, kill the first
//! run, refill, detect again, until no run remains. Only one run is killed
//! per pass even when several coexist; the rest are picked up by later
//! passes after the refill.
//!
//! Refills are independent draws, so the loop almost always ends within a
//! few passes. It is still bounded: more than `pass_limit` passes means the
//! token source can never settle this board, and resolution fails with
//! [`ResolveError::PassLimit`] instead of spinning.

use serde::{Deserialize, Serialize};

use super::gravity::gravity_fill;
use crate::core::{BoardConfig, Point, RandomTokens, TokenSource};
use crate::error::{GridError, ResolveError};
use crate::grid::{CellState, Grid};
use crate::matching::{find_runs, Run};

/// What one call to [`CascadeResolver::resolve`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// Kill-and-refill passes performed.
    pub passes: usize,
    /// The run killed in each pass, in order.
    pub cleared: Vec<Run>,
    /// Cells marked born when resolution finished, sorted.
    pub born: Vec<Point>,
}

impl Resolution {
    /// Check whether the board was already stable.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.passes == 0 && self.born.is_empty()
    }
}

/// Settles boards, owning the token source used for refills.
pub struct CascadeResolver {
    tokens: Box<dyn TokenSource>,
    pass_limit: usize,
}

impl CascadeResolver {
    /// Create a resolver with an explicit token source and pass bound.
    pub fn new(tokens: Box<dyn TokenSource>, pass_limit: usize) -> Self {
        Self { tokens, pass_limit }
    }

    /// Create a resolver drawing seeded random tokens per `config`.
    pub fn from_config(config: &BoardConfig) -> Self {
        let tokens = RandomTokens::new(config.seed, config.gem_kinds);
        Self::new(Box::new(tokens), config.pass_limit())
    }

    /// Maximum kill passes per resolution.
    #[must_use]
    pub fn pass_limit(&self) -> usize {
        self.pass_limit
    }

    /// Draw a fresh, unresolved board.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is zero, like [`Grid::random`].
    pub fn fill(&mut self, width: usize, height: usize) -> Grid {
        Grid::random(width, height, self.tokens.as_mut())
    }

    /// Mark `points` killed and clear their tokens.
    pub fn kill(grid: &mut Grid, points: &[Point]) -> Result<(), GridError> {
        for &point in points {
            grid.set_lifecycle(point, CellState::Killed)?;
            grid.set_token(point, None)?;
        }
        Ok(())
    }

    /// Gravity-fill every hole. Returns the newly born points.
    pub fn refill(&mut self, grid: &mut Grid) -> Result<Vec<Point>, GridError> {
        gravity_fill(grid, self.tokens.as_mut())
    }

    /// Mark born cells as settled.
    pub fn settle(grid: &mut Grid, points: &[Point]) -> Result<(), GridError> {
        for &point in points {
            if grid.cell(point)?.state == CellState::Born {
                grid.set_lifecycle(point, CellState::Alive)?;
            }
        }
        Ok(())
    }

    /// Resolve the board until no run remains.
    ///
    /// A board that is already stable is left untouched, so resolving
    /// twice is the same as resolving once.
    pub fn resolve(&mut self, grid: &mut Grid) -> Result<Resolution, ResolveError> {
        let mut resolution = Resolution::default();
        let mut refilled = false;

        loop {
            if !grid.killed_points().is_empty() {
                self.refill(grid)?;
                refilled = true;
            }

            let Some(run) = find_runs(grid).into_iter().next() else {
                break;
            };

            if resolution.passes >= self.pass_limit {
                tracing::warn!(limit = self.pass_limit, "cascade exceeded pass limit");
                return Err(ResolveError::PassLimit {
                    limit: self.pass_limit,
                });
            }

            tracing::debug!(
                pass = resolution.passes + 1,
                token = %run.token,
                len = run.len(),
                "clearing run"
            );
            Self::kill(grid, &run.points)?;
            resolution.passes += 1;
            resolution.cleared.push(run);
        }

        if refilled {
            resolution.born = grid.born_points();
        }
        Ok(resolution)
    }
}

impl std::fmt::Debug for CascadeResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CascadeResolver")
            .field("pass_limit", &self.pass_limit)
            .finish_non_exhaustive()
    }
}
