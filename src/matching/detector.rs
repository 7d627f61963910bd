//! Run detection.
//!
//! From every cell, walk each of the 8 directions while the next cell is on
//! the board and holds the same matchable token. A walk that picks up at
//! least two cells beyond its origin is a candidate run. Opposite walks
//! along the same line and overlapping sub-walks produce many candidates
//! for one real run, so candidates are compared as point sets: exact
//! duplicates collapse, and any candidate contained in another is dropped.
//! What remains are the maximal runs.

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::{Axis, Direction, Point, Token};
use crate::grid::Grid;

/// Minimum run length.
pub const MIN_RUN: usize = 3;

/// Points of a run, sorted ascending.
pub type RunPoints = SmallVec<[Point; 8]>;

/// A maximal line of 3 or more identical tokens.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Run {
    pub token: Token,
    pub axis: Axis,
    /// Sorted ascending, no duplicates.
    pub points: RunPoints,
}

impl Run {
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn contains(&self, point: Point) -> bool {
        self.points.binary_search(&point).is_ok()
    }

    /// Check whether every point of `self` is also in `other`.
    #[must_use]
    pub fn is_subset_of(&self, other: &Run) -> bool {
        self.len() <= other.len() && self.points.iter().all(|&p| other.contains(p))
    }
}

/// Find every maximal run on the board.
///
/// The result is sorted by point list, so the same board always yields
/// the same runs in the same order.
#[must_use]
pub fn find_runs(grid: &Grid) -> Vec<Run> {
    let mut seen: FxHashSet<RunPoints> = FxHashSet::default();
    let mut candidates: Vec<Run> = Vec::new();

    for origin in grid.points() {
        let Some(token) = grid.token_at(origin) else {
            continue;
        };

        for direction in Direction::ALL {
            let mut points: RunPoints = SmallVec::new();
            points.push(origin);

            let mut next = origin.step(direction);
            while grid.token_at(next) == Some(token) {
                points.push(next);
                next = next.step(direction);
            }

            if points.len() < MIN_RUN {
                continue;
            }

            points.sort_unstable();
            if seen.insert(points.clone()) {
                candidates.push(Run {
                    token,
                    axis: direction.axis(),
                    points,
                });
            }
        }
    }

    // Keep only runs not contained in another. Duplicates are already gone,
    // so containment here is always strict.
    let mut runs: Vec<Run> = candidates
        .iter()
        .filter(|run| {
            !candidates
                .iter()
                .any(|other| other.points != run.points && run.is_subset_of(other))
        })
        .cloned()
        .collect();

    runs.sort_by(|a, b| a.points.cmp(&b.points));
    tracing::trace!(candidates = candidates.len(), runs = runs.len(), "detected runs");
    runs
}

/// Check whether the board has any run at all.
#[must_use]
pub fn has_runs(grid: &Grid) -> bool {
    !find_runs(grid).is_empty()
}

/// Glyph dump of the board with matched cells suffixed by `!`.
///
/// Each cell takes two columns so rows stay aligned.
#[must_use]
pub fn annotate_runs(grid: &Grid, runs: &[Run]) -> String {
    let mut out = String::new();
    for y in 0..grid.height() {
        let row: Vec<String> = (0..grid.width())
            .map(|x| {
                let point = Point::new(x as i32, y as i32);
                let glyph = grid.cell(point).map_or('?', |c| c.glyph());
                let mark = if runs.iter().any(|r| r.contains(point)) { '!' } else { ' ' };
                format!("{}{}", glyph, mark)
            })
            .collect();
        out.push_str(row.concat().trim_end());
        out.push('\n');
    }
    out
}
