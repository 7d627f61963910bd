//! Tick-driven event scheduler.
//!
//! Two lanes:
//! - the **staged** queue, FIFO. Each tick advances exactly its head. A
//!   continuing head keeps its place at the front, so one event plays out
//!   fully before the next begins.
//! - the **overlay** lane of cosmetic animations spawned by staged events
//!   (e.g. a swap's flashing). Every overlay advances once per tick
//!   alongside the head. Overlays only paint colors.
//!
//! When a staged event completes with a mutating commit, the scheduler
//! applies it and runs the resolver exactly once. Cells the resolution
//! refilled get a `Birth` event queued behind.
//!
//! With both lanes empty, a tick resets all colors and returns the idle
//! sentinel so stale highlights never linger.

use std::collections::VecDeque;

use super::event::{advance, Commit, Event, EventId, Paint, Step};
use crate::cascade::{CascadeResolver, Resolution};
use crate::core::BoardConfig;
use crate::error::EventError;
use crate::grid::Grid;

/// What one tick did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tick {
    /// The staged event as it was when advanced, or the idle sentinel.
    pub event: Event,
    /// The commit applied this tick, if the event completed with one.
    pub committed: Option<Commit>,
    /// The resolver pass that followed the commit.
    pub resolution: Option<Resolution>,
}

impl Tick {
    fn idle() -> Self {
        Self {
            event: Event::idle(),
            committed: None,
            resolution: None,
        }
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.event.is_idle()
    }
}

/// Single-consumer queue of staged events.
#[derive(Clone, Debug)]
pub struct EventScheduler {
    queue: VecDeque<Event>,
    overlays: Vec<Event>,
    next_id: u32,
    birth_stages: u32,
}

impl Default for EventScheduler {
    fn default() -> Self {
        Self::new(BoardConfig::default().birth_stages)
    }
}

impl EventScheduler {
    /// Create a scheduler. Refilled cells stay born for `birth_stages` ticks.
    pub fn new(birth_stages: u32) -> Self {
        Self {
            queue: VecDeque::new(),
            overlays: Vec::new(),
            next_id: 1,
            birth_stages,
        }
    }

    pub fn from_config(config: &BoardConfig) -> Self {
        Self::new(config.birth_stages)
    }

    /// Queue a staged event. Returns its assigned id.
    pub fn enqueue(&mut self, mut event: Event) -> EventId {
        event.id = self.allocate_id();
        let id = event.id;
        tracing::trace!(%id, kind = %event.kind, "enqueued event");
        self.queue.push_back(event);
        id
    }

    fn allocate_id(&mut self) -> EventId {
        let id = EventId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Mark a queued event cancelled. It completes on its next advance
    /// without committing.
    ///
    /// Returns `false` if no queued event has this id.
    pub fn cancel(&mut self, id: EventId) -> bool {
        let mut found = false;
        for event in self.queue.iter_mut().chain(self.overlays.iter_mut()) {
            if event.id == id {
                event.cancelled = true;
                found = true;
            }
        }
        found
    }

    /// Drop every pending event.
    pub fn clear(&mut self) {
        self.queue.clear();
        self.overlays.clear();
    }

    /// Check whether both lanes are empty.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.queue.is_empty() && self.overlays.is_empty()
    }

    /// Number of staged events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Number of running overlay animations.
    #[must_use]
    pub fn overlay_count(&self) -> usize {
        self.overlays.len()
    }

    /// The staged event that will advance next.
    #[must_use]
    pub fn peek(&self) -> Option<&Event> {
        self.queue.front()
    }

    /// Check whether a queued, uncancelled event will mutate the grid.
    #[must_use]
    pub fn has_pending_commit(&self) -> bool {
        self.queue.iter().any(|e| e.kind.commits() && !e.cancelled)
    }

    /// Advance the head event by one stage, then every overlay.
    pub fn tick(&mut self, grid: &mut Grid, resolver: &mut CascadeResolver) -> Result<Tick, EventError> {
        let Some(head) = self.queue.pop_front() else {
            if self.overlays.is_empty() {
                grid.reset_colors();
            } else {
                self.advance_overlays(grid)?;
            }
            return Ok(Tick::idle());
        };

        let mut tick = Tick {
            event: head.clone(),
            committed: None,
            resolution: None,
        };

        match advance(&head)? {
            Step::Continue { next, paint, spawn } => {
                if let Some(paint) = paint {
                    apply_paint(grid, &paint)?;
                }
                if let Some(mut spawn) = spawn {
                    spawn.id = self.allocate_id();
                    self.overlays.push(spawn);
                }
                self.queue.push_front(next);
            }
            Step::Complete(commit) => {
                if commit.mutates() {
                    tracing::debug!(id = %head.id, kind = %head.kind, "committing event");
                    apply_commit(grid, resolver, &commit)?;
                    let resolution = resolver.resolve(grid)?;
                    if !resolution.born.is_empty() {
                        self.enqueue(Event::birth(resolution.born.iter().copied(), self.birth_stages));
                    }
                    tick.resolution = Some(resolution);
                }
                tick.committed = Some(commit);
            }
        }

        self.advance_overlays(grid)?;
        Ok(tick)
    }

    fn advance_overlays(&mut self, grid: &mut Grid) -> Result<(), EventError> {
        let overlays = std::mem::take(&mut self.overlays);
        for overlay in overlays {
            if let Step::Continue { next, paint, .. } = advance(&overlay)? {
                if let Some(paint) = paint {
                    apply_paint(grid, &paint)?;
                }
                self.overlays.push(next);
            }
        }
        Ok(())
    }
}

fn apply_commit(grid: &mut Grid, resolver: &mut CascadeResolver, commit: &Commit) -> Result<(), EventError> {
    match commit {
        Commit::Cosmetic => {}
        Commit::Swap(a, b) => grid.swap_tokens(*a, *b)?,
        Commit::Kill(points) => CascadeResolver::kill(grid, points)?,
        Commit::Refill => {
            resolver.refill(grid)?;
        }
        Commit::Settle(points) => CascadeResolver::settle(grid, points)?,
    }
    Ok(())
}

fn apply_paint(grid: &mut Grid, paint: &Paint) -> Result<(), EventError> {
    for &point in &paint.points {
        let fg = grid.cell(point)?.fg;
        grid.set_colors(point, fg, paint.bg)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Point, ScriptedTokens};
    use crate::events::{EventKind, EventPoints};
    use crate::grid::{CellState, Color};

    fn resolver(glyphs: &str) -> CascadeResolver {
        CascadeResolver::new(Box::new(ScriptedTokens::from_glyphs(glyphs)), 100)
    }

    fn p(x: i32, y: i32) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn test_empty_tick_is_idle_and_resets_colors() {
        let mut scheduler = EventScheduler::new(3);
        let mut grid = Grid::from_rows(&["AB"]).unwrap();
        grid.set_colors(p(0, 0), Color::Black, Color::Cyan).unwrap();
        let mut resolver = resolver("C");

        let tick = scheduler.tick(&mut grid, &mut resolver).unwrap();

        assert!(tick.is_idle());
        assert_eq!(tick.committed, None);
        assert_eq!(grid.get(0, 0).unwrap().bg, Color::Default);
        assert_eq!(grid.get(0, 0).unwrap().fg, Color::Red);
    }

    #[test]
    fn test_enqueue_assigns_ids() {
        let mut scheduler = EventScheduler::default();
        let a = scheduler.enqueue(Event::animate([p(0, 0)], 1));
        let b = scheduler.enqueue(Event::animate([p(0, 0)], 1));

        assert_ne!(a, EventId::UNASSIGNED);
        assert_ne!(a, b);
        assert_eq!(scheduler.len(), 2);
        assert_eq!(scheduler.peek().unwrap().id, a);
    }

    #[test]
    fn test_head_plays_out_before_next() {
        let mut scheduler = EventScheduler::default();
        let mut grid = Grid::from_rows(&["AB"]).unwrap();
        let mut resolver = resolver("C");
        let first = scheduler.enqueue(Event::animate([p(0, 0)], 2));
        let second = scheduler.enqueue(Event::animate([p(1, 0)], 2));

        let ids: Vec<_> = (0..6)
            .map(|_| scheduler.tick(&mut grid, &mut resolver).unwrap().event.id)
            .collect();

        assert_eq!(ids, vec![first, first, first, second, second, second]);
        assert!(scheduler.is_idle());
    }

    #[test]
    fn test_animate_paints_without_touching_tokens() {
        let mut scheduler = EventScheduler::default();
        let mut grid = Grid::from_rows(&["AB"]).unwrap();
        let before = grid.glyph_rows();
        let mut resolver = resolver("C");
        scheduler.enqueue(Event::animate([p(1, 0)], 3));

        let tick = scheduler.tick(&mut grid, &mut resolver).unwrap();

        assert_eq!(tick.committed, None);
        assert_eq!(grid.get(1, 0).unwrap().bg, Color::Red);
        assert_eq!(grid.glyph_rows(), before);
    }

    #[test]
    fn test_swap_commits_once_and_resolves() {
        // Swapping (2,0) and (2,1) makes row 0 AAA
        let mut grid = Grid::from_rows(&["AACB", "BDAC", "CBDD"]).unwrap();
        let mut resolver = resolver("EFE");
        let mut scheduler = EventScheduler::new(2);
        scheduler.enqueue(Event::swap(p(2, 0), p(2, 1), 2));

        for stage in 0..2 {
            let tick = scheduler.tick(&mut grid, &mut resolver).unwrap();
            assert_eq!(tick.event.stage, stage);
            assert_eq!(tick.committed, None);
            assert_eq!(grid.glyph_rows()[0], "AACB");
        }

        let tick = scheduler.tick(&mut grid, &mut resolver).unwrap();
        assert_eq!(tick.committed, Some(Commit::Swap(p(2, 0), p(2, 1))));
        let resolution = tick.resolution.unwrap();
        assert_eq!(resolution.passes, 1);
        assert_eq!(grid.glyph_rows(), vec!["EFEB", "BDCC", "CBDD"]);

        // Refilled cells get a birth event
        let birth = scheduler.peek().unwrap();
        assert_eq!(birth.kind, EventKind::Birth);
        assert_eq!(birth.points, EventPoints::from_slice(&[p(0, 0), p(1, 0), p(2, 0)]));
    }

    #[test]
    fn test_swap_spawns_overlays() {
        let mut grid = Grid::from_rows(&["AB", "CD"]).unwrap();
        let mut resolver = resolver("E");
        let mut scheduler = EventScheduler::default();
        scheduler.enqueue(Event::swap(p(0, 0), p(1, 0), 3));

        scheduler.tick(&mut grid, &mut resolver).unwrap();
        assert_eq!(scheduler.overlay_count(), 1);
        // The overlay painted in the same tick it was spawned
        assert_ne!(grid.get(0, 0).unwrap().bg, Color::Default);
    }

    #[test]
    fn test_birth_settles() {
        let mut grid = Grid::from_rows(&["AB"]).unwrap();
        grid.set_lifecycle(p(0, 0), CellState::Born).unwrap();
        let mut resolver = resolver("C");
        let mut scheduler = EventScheduler::default();
        scheduler.enqueue(Event::birth([p(0, 0)], 1));

        scheduler.tick(&mut grid, &mut resolver).unwrap();
        assert_eq!(grid.get(0, 0).unwrap().state, CellState::Born);

        let tick = scheduler.tick(&mut grid, &mut resolver).unwrap();
        assert!(matches!(tick.committed, Some(Commit::Settle(_))));
        assert!(tick.resolution.unwrap().is_noop());
        assert_eq!(grid.get(0, 0).unwrap().state, CellState::Alive);
        assert!(scheduler.is_empty());
    }

    #[test]
    fn test_match_then_death() {
        let mut grid = Grid::from_rows(&["ABC", "DEF"]).unwrap();
        let mut resolver = resolver("DEF");
        let mut scheduler = EventScheduler::default();

        // A match commit kills, and the resolver refills right away
        scheduler.enqueue(Event::match_run([p(0, 1), p(1, 1), p(2, 1)], 0));
        let tick = scheduler.tick(&mut grid, &mut resolver).unwrap();
        assert!(matches!(tick.committed, Some(Commit::Kill(_))));
        assert!(grid.is_filled());
        assert_eq!(grid.glyph_rows(), vec!["DEF", "ABC"]);

        // A death commit refills holes made outside the scheduler
        scheduler.clear();
        CascadeResolver::kill(&mut grid, &[p(0, 1)]).unwrap();
        scheduler.enqueue(Event::death([p(0, 1)], 0));
        let tick = scheduler.tick(&mut grid, &mut resolver).unwrap();
        assert_eq!(tick.committed, Some(Commit::Refill));
        assert_eq!(grid.glyph_rows(), vec!["DEF", "DBC"]);
    }

    #[test]
    fn test_invalid_arity_fails_fast() {
        let mut grid = Grid::from_rows(&["ABC"]).unwrap();
        let before = grid.clone();
        let mut resolver = resolver("D");
        let mut scheduler = EventScheduler::default();
        scheduler.enqueue(Event::new(EventKind::Swap, [p(0, 0), p(1, 0), p(2, 0)], 0));

        let err = scheduler.tick(&mut grid, &mut resolver).unwrap_err();
        assert!(matches!(err, EventError::InvalidArity { actual: 3, .. }));
        assert_eq!(grid, before);
    }

    #[test]
    fn test_cancel_skips_commit() {
        let mut grid = Grid::from_rows(&["AB"]).unwrap();
        let mut resolver = resolver("C");
        let mut scheduler = EventScheduler::default();
        let id = scheduler.enqueue(Event::swap(p(0, 0), p(1, 0), 3));

        scheduler.tick(&mut grid, &mut resolver).unwrap();
        assert!(scheduler.cancel(id));
        assert!(!scheduler.has_pending_commit());

        let tick = scheduler.tick(&mut grid, &mut resolver).unwrap();
        assert_eq!(tick.committed, Some(Commit::Cosmetic));
        assert!(tick.resolution.is_none());
        assert_eq!(grid.glyph_rows(), vec!["AB"]);
        assert!(!scheduler.cancel(EventId::new(999)));
    }

    #[test]
    fn test_clear() {
        let mut scheduler = EventScheduler::default();
        scheduler.enqueue(Event::swap(Point::new(0, 0), Point::new(1, 0), 3));
        assert!(scheduler.has_pending_commit());

        scheduler.clear();

        assert!(scheduler.is_idle());
        assert!(!scheduler.has_pending_commit());
    }
}
