//! Property-based invariant tests for detection, resolution and moves.
//!
//! These hold for any board:
//!
//! 1. Every detected run is maximal, straight and single-token.
//! 2. Resolution leaves no run and no hole, using only known tokens.
//! 3. Resolving a resolved board changes nothing.
//! 4. Full-scope candidates are exactly the swaps that make a run.
//! 5. Interior-scope candidates make a run and start from an interior cell.

use gem_match::{
    find_runs, is_legal, CandidateMove, CascadeResolver, Direction, Grid, MoveEnumerator,
    MoveScope, Point, RandomTokens, Token,
};
use proptest::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────────

/// A random board of 3..=6 by 3..=5 over 5 or 6 gem kinds.
fn grid_strategy() -> impl Strategy<Value = (Grid, usize)> {
    (3usize..=6, 3usize..=5, 5usize..=6).prop_flat_map(|(width, height, kinds)| {
        prop::collection::vec(0..kinds, width * height).prop_map(move |indices| {
            let tokens = indices.into_iter().map(|i| Token::ALL[i]).collect();
            let grid = Grid::from_tokens(width, height, tokens).expect("shape matches");
            (grid, kinds)
        })
    })
}

fn resolver(seed: u64, kinds: usize) -> CascadeResolver {
    CascadeResolver::new(Box::new(RandomTokens::new(seed, kinds)), 10_000)
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Runs are maximal
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn runs_are_maximal((grid, _kinds) in grid_strategy()) {
        let runs = find_runs(&grid);
        for run in &runs {
            prop_assert!(run.len() >= 3);
            for &point in &run.points {
                prop_assert_eq!(grid.token_at(point), Some(run.token));
            }
            for other in &runs {
                if other.points != run.points {
                    prop_assert!(!run.is_subset_of(other), "{:?} inside {:?}", run.points, other.points);
                }
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Resolution settles and fills
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolution_settles((grid, kinds) in grid_strategy(), seed in any::<u64>()) {
        let mut grid = grid;
        let mut resolver = resolver(seed, kinds);
        resolver.resolve(&mut grid).unwrap();

        prop_assert!(find_runs(&grid).is_empty());
        prop_assert!(grid.killed_points().is_empty());
        let alphabet = Token::alphabet(kinds);
        for cell in grid.cells() {
            let token = cell.token.expect("filled");
            prop_assert!(alphabet.contains(&token));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Resolution is idempotent
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn resolution_idempotent((grid, kinds) in grid_strategy(), seed in any::<u64>()) {
        let mut grid = grid;
        let mut resolver = resolver(seed, kinds);
        resolver.resolve(&mut grid).unwrap();
        let settled = grid.clone();

        let again = resolver.resolve(&mut grid).unwrap();

        prop_assert!(again.is_noop());
        prop_assert_eq!(grid, settled);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Moves are sound and complete
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn moves_sound_and_complete((grid, kinds) in grid_strategy(), seed in any::<u64>()) {
        let mut grid = grid;
        resolver(seed, kinds).resolve(&mut grid).unwrap();

        let mut enumerator = MoveEnumerator::new(MoveScope::Full);
        let candidates = enumerator.enumerate(&grid).unwrap().to_vec();

        for point in grid.points() {
            for direction in [Direction::Right, Direction::Down] {
                let neighbor = point.step(direction);
                if !grid.contains(neighbor) {
                    continue;
                }
                let pair = CandidateMove::new(point, neighbor);
                prop_assert_eq!(candidates.contains(&pair), is_legal(&grid, pair).unwrap());
            }
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Interior-scope moves are sound and touch the interior
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn interior_moves_sound((grid, kinds) in grid_strategy(), seed in any::<u64>()) {
        let mut grid = grid;
        resolver(seed, kinds).resolve(&mut grid).unwrap();

        let mut enumerator = MoveEnumerator::new(MoveScope::Interior);
        let candidates = enumerator.enumerate(&grid).unwrap().to_vec();

        let interior = |p: Point| {
            Direction::ORTHOGONAL.iter().all(|&d| grid.contains(p.step(d)))
        };

        for candidate in &candidates {
            prop_assert!(is_legal(&grid, *candidate).unwrap(), "{} makes no run", candidate);
            prop_assert!(
                interior(candidate.a) || interior(candidate.b),
                "{} has no interior origin",
                candidate
            );
        }

        // Every legal swap with an interior end is offered
        for point in grid.points().filter(|&p| interior(p)) {
            for direction in Direction::ORTHOGONAL {
                let pair = CandidateMove::new(point, point.step(direction));
                if is_legal(&grid, pair).unwrap() {
                    prop_assert!(candidates.contains(&pair), "{} missing", pair);
                }
            }
        }
    }
}
