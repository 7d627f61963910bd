//! Legal move enumeration.
//!
//! A candidate move is an orthogonally adjacent pair whose swap creates at
//! least one run. Enumeration tries every pair on a scratch copy of the
//! board: swap, detect, swap back. The scratch copy is an O(1) clone of the
//! live grid, so the live grid is never touched.
//!
//! Enumeration needs a settled board. On a board that already has runs or
//! holes every swap would look legal, so it fails with
//! [`MoveError::UnstableGrid`] instead.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::core::{Direction, MoveScope, Point};
use crate::error::MoveError;
use crate::grid::Grid;
use crate::matching::{find_runs, has_runs};

/// An unordered pair of adjacent cells whose swap makes a run.
///
/// Stored with `a < b` so each pair has one representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CandidateMove {
    pub a: Point,
    pub b: Point,
}

impl CandidateMove {
    /// Create a normalized pair.
    #[must_use]
    pub fn new(a: Point, b: Point) -> Self {
        if a <= b {
            Self { a, b }
        } else {
            Self { a: b, b: a }
        }
    }
}

impl std::fmt::Display for CandidateMove {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} <-> {}", self.a, self.b)
    }
}

/// Computes and caches the legal moves of a settled board.
#[derive(Clone, Debug, Default)]
pub struct MoveEnumerator {
    scope: MoveScope,
    candidates: Vec<CandidateMove>,
}

impl MoveEnumerator {
    pub fn new(scope: MoveScope) -> Self {
        Self {
            scope,
            candidates: Vec::new(),
        }
    }

    #[must_use]
    pub fn scope(&self) -> MoveScope {
        self.scope
    }

    /// The moves found by the last successful [`enumerate`](Self::enumerate).
    #[must_use]
    pub fn current_candidates(&self) -> &[CandidateMove] {
        &self.candidates
    }

    /// Forget cached moves (e.g. while the board is being replaced).
    pub fn clear(&mut self) {
        self.candidates.clear();
    }

    /// Recompute the legal moves of `grid`.
    ///
    /// The result is sorted. An empty list is a valid stalemate.
    pub fn enumerate(&mut self, grid: &Grid) -> Result<&[CandidateMove], MoveError> {
        let runs = find_runs(grid).len();
        let holes = grid.killed_points().len();
        if runs > 0 || holes > 0 {
            return Err(MoveError::UnstableGrid { runs, holes });
        }

        let mut scratch = grid.clone();
        let mut visited: FxHashSet<CandidateMove> = FxHashSet::default();
        let mut candidates = Vec::new();

        for origin in grid.points() {
            if !self.is_origin(grid, origin) {
                continue;
            }

            for direction in Direction::ORTHOGONAL {
                let neighbor = origin.step(direction);
                if !grid.contains(neighbor) {
                    continue;
                }

                let pair = CandidateMove::new(origin, neighbor);
                if !visited.insert(pair) {
                    continue;
                }

                scratch.swap_tokens(pair.a, pair.b)?;
                let legal = has_runs(&scratch);
                scratch.swap_tokens(pair.a, pair.b)?;

                if legal {
                    candidates.push(pair);
                }
            }
        }

        candidates.sort();
        tracing::trace!(
            pairs = visited.len(),
            legal = candidates.len(),
            "enumerated moves"
        );
        self.candidates = candidates;
        Ok(&self.candidates)
    }

    fn is_origin(&self, grid: &Grid, point: Point) -> bool {
        match self.scope {
            MoveScope::Full => true,
            MoveScope::Interior => Direction::ORTHOGONAL
                .iter()
                .all(|&d| grid.contains(point.step(d))),
        }
    }
}

/// Check a single swap on a copy of `grid`.
pub fn is_legal(grid: &Grid, candidate: CandidateMove) -> Result<bool, MoveError> {
    let mut scratch = grid.clone();
    scratch.swap_tokens(candidate.a, candidate.b)?;
    Ok(has_runs(&scratch))
}
