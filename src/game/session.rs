//! Game session: board, resolver, enumerator and scheduler in one place.
//!
//! The session keeps three things true between calls:
//! - the board is stable whenever the scheduler has no committing event
//!   in flight,
//! - the cached candidates describe the current board,
//! - only the scheduler (through the resolver) mutates tokens.
//!
//! ## Example
//!
//! ```
//! use gem_match::{BoardConfig, Game};
//!
//! let mut game = Game::new(BoardConfig::default().with_seed(7)).unwrap();
//! if !game.is_stalemate() {
//!     assert!(game.select_move(0));
//!     game.run_until_idle(100).unwrap();
//! }
//! assert!(game.scheduler().is_idle());
//! ```

use crate::cascade::{CascadeResolver, Resolution};
use crate::core::{BoardConfig, RandomTokens, TokenSource};
use crate::error::GameError;
use crate::events::{Event, EventScheduler, Tick};
use crate::grid::{Cell, Grid};
use crate::moves::{CandidateMove, MoveEnumerator};

/// A running match-three session.
#[derive(Debug)]
pub struct Game {
    config: BoardConfig,
    grid: Grid,
    resolver: CascadeResolver,
    enumerator: MoveEnumerator,
    scheduler: EventScheduler,
}

impl Game {
    /// Start a session on a seeded random board.
    pub fn new(config: BoardConfig) -> Result<Self, GameError> {
        config.validate()?;
        let tokens = RandomTokens::new(config.seed, config.gem_kinds);
        Self::with_token_source(config, Box::new(tokens))
    }

    /// Start a session drawing every token from `tokens`.
    pub fn with_token_source(
        config: BoardConfig,
        tokens: Box<dyn TokenSource>,
    ) -> Result<Self, GameError> {
        config.validate()?;
        let mut resolver = CascadeResolver::new(tokens, config.pass_limit());
        let grid = resolver.fill(config.width, config.height);
        Self::assemble(config, grid, resolver)
    }

    /// Start a session on a given board. Refills draw from `tokens`.
    ///
    /// The board's dimensions override the configured ones. Any runs or
    /// holes on it are resolved before the first move.
    pub fn from_grid(
        config: BoardConfig,
        grid: Grid,
        tokens: Box<dyn TokenSource>,
    ) -> Result<Self, GameError> {
        let config = config.with_size(grid.width(), grid.height());
        config.validate()?;
        let resolver = CascadeResolver::new(tokens, config.pass_limit());
        Self::assemble(config, grid, resolver)
    }

    fn assemble(
        config: BoardConfig,
        mut grid: Grid,
        mut resolver: CascadeResolver,
    ) -> Result<Self, GameError> {
        let resolution = resolver.resolve(&mut grid)?;
        let mut enumerator = MoveEnumerator::new(config.move_scope);
        enumerator.enumerate(&grid)?;

        // Startup refills are not animated
        CascadeResolver::settle(&mut grid, &resolution.born)?;

        tracing::debug!(
            width = config.width,
            height = config.height,
            passes = resolution.passes,
            moves = enumerator.current_candidates().len(),
            "session started"
        );

        Ok(Self {
            scheduler: EventScheduler::from_config(&config),
            config,
            grid,
            resolver,
            enumerator,
        })
    }

    #[must_use]
    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    /// The live board.
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// The cell at `(x, y)`.
    pub fn cell(&self, x: i32, y: i32) -> Result<&Cell, GameError> {
        Ok(self.grid.get(x, y)?)
    }

    /// Legal moves on the current board, sorted.
    #[must_use]
    pub fn current_candidates(&self) -> &[CandidateMove] {
        self.enumerator.current_candidates()
    }

    /// Check whether the board has no legal move.
    #[must_use]
    pub fn is_stalemate(&self) -> bool {
        self.enumerator.current_candidates().is_empty()
    }

    #[must_use]
    pub fn scheduler(&self) -> &EventScheduler {
        &self.scheduler
    }

    /// Queue the highlight and swap for candidate `index`.
    ///
    /// Returns `false` without doing anything if `index` is out of range or
    /// a previous move has not committed yet.
    pub fn select_move(&mut self, index: usize) -> bool {
        let Some(&candidate) = self.enumerator.current_candidates().get(index) else {
            tracing::debug!(
                index,
                available = self.enumerator.current_candidates().len(),
                "ignored selection: no such move"
            );
            return false;
        };

        if self.scheduler.has_pending_commit() {
            tracing::debug!(index, "ignored selection: move already in flight");
            return false;
        }

        tracing::debug!(%candidate, "move selected");
        self.scheduler.enqueue(Event::animate(
            [candidate.a, candidate.b],
            self.config.highlight_stages,
        ));
        self.scheduler.enqueue(Event::swap(
            candidate.a,
            candidate.b,
            self.config.swap_stages,
        ));
        true
    }

    /// Advance the scheduler by one tick.
    ///
    /// Candidates are recomputed whenever the tick ran a resolution.
    ///
    /// If the tick fails (e.g. a committed swap cascades past the pass
    /// limit), the board is rolled back to where it was before the tick and
    /// every pending event is dropped. The cached candidates still describe
    /// the restored board.
    pub fn tick(&mut self) -> Result<Tick, GameError> {
        let checkpoint = self.grid.clone();
        match self.try_tick() {
            Ok(tick) => Ok(tick),
            Err(err) => {
                tracing::warn!(%err, "tick failed, rolling back board and dropping events");
                self.grid = checkpoint;
                self.scheduler.clear();
                Err(err)
            }
        }
    }

    fn try_tick(&mut self) -> Result<Tick, GameError> {
        let tick = self.scheduler.tick(&mut self.grid, &mut self.resolver)?;
        if tick.resolution.is_some() {
            let mut enumerator = MoveEnumerator::new(self.config.move_scope);
            enumerator.enumerate(&self.grid)?;
            self.enumerator = enumerator;
        }
        Ok(tick)
    }

    /// Tick until both scheduler lanes drain, at most `max_ticks` times.
    ///
    /// Returns the number of ticks run.
    pub fn run_until_idle(&mut self, max_ticks: usize) -> Result<usize, GameError> {
        let mut ticks = 0;
        while ticks < max_ticks && !self.scheduler.is_idle() {
            self.tick()?;
            ticks += 1;
        }
        Ok(ticks)
    }

    /// Throw the board away and deal a fresh one.
    ///
    /// Pending events are dropped. The token source keeps its position, so
    /// the new board differs from the old one. If the new board cannot be
    /// settled, the board, pending events and candidates are kept.
    pub fn reset_board(&mut self) -> Result<Resolution, GameError> {
        tracing::info!(
            width = self.config.width,
            height = self.config.height,
            "resetting board"
        );

        let mut grid = self.resolver.fill(self.config.width, self.config.height);
        let resolution = self.resolver.resolve(&mut grid)?;
        CascadeResolver::settle(&mut grid, &resolution.born)?;
        let mut enumerator = MoveEnumerator::new(self.config.move_scope);
        enumerator.enumerate(&grid)?;

        self.scheduler.clear();
        self.enumerator = enumerator;
        self.grid = grid;
        Ok(resolution)
    }
}
