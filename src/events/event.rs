//! Staged events and their pure state transition.
//!
//! An event is a multi-tick action over a few points: cosmetic stages
//! first, then at most one committing mutation. [`advance`] never touches
//! the grid or the queue. It looks at one event and says either
//! "continue as this successor (and paint / spawn this)" or "complete with
//! this commit". The scheduler owns the queue and applies the result.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::Point;
use crate::error::EventError;
use crate::grid::Color;

/// Points an event acts on.
pub type EventPoints = SmallVec<[Point; 4]>;

/// Colors cycled by animations.
pub type Palette = SmallVec<[Color; 6]>;

/// Palette used when none is given.
pub const DEFAULT_PALETTE: [Color; 6] = [
    Color::Red,
    Color::Yellow,
    Color::Green,
    Color::Cyan,
    Color::Blue,
    Color::Magenta,
];

/// Identifier the scheduler gives each queued event.
///
/// A successor keeps its predecessor's id: it is the same event one stage on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EventId(pub u32);

impl EventId {
    /// Id of events not yet queued (and of the idle sentinel).
    pub const UNASSIGNED: EventId = EventId(0);

    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Event({})", self.0)
    }
}

/// How many points an event kind requires.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Arity {
    Exactly(usize),
    AtLeast(usize),
}

impl Arity {
    #[must_use]
    pub const fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Exactly(n) => count == n,
            Arity::AtLeast(n) => count >= n,
        }
    }
}

impl std::fmt::Display for Arity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arity::Exactly(n) => write!(f, "exactly {}", n),
            Arity::AtLeast(n) => write!(f, "at least {}", n),
        }
    }
}

/// What an event does.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// Nothing to do. Returned by an empty scheduler.
    Idle,
    /// Cycle a palette over the points' background. Never commits.
    Animate { palette: Palette },
    /// Animate, then exchange the tokens of exactly two points.
    Swap,
    /// Highlight, then mark freshly refilled points as settled.
    Birth,
    /// Highlight, then kill the points of a run.
    Match,
    /// Fade, then refill killed cells under gravity.
    Death,
}

impl EventKind {
    /// Points this kind must carry.
    #[must_use]
    pub fn arity(&self) -> Arity {
        match self {
            EventKind::Idle => Arity::Exactly(0),
            EventKind::Swap => Arity::Exactly(2),
            EventKind::Match => Arity::AtLeast(3),
            EventKind::Animate { .. } | EventKind::Birth | EventKind::Death => Arity::AtLeast(1),
        }
    }

    /// Check whether completing this kind mutates the grid.
    #[must_use]
    pub fn commits(&self) -> bool {
        matches!(
            self,
            EventKind::Swap | EventKind::Birth | EventKind::Match | EventKind::Death
        )
    }

    /// Background shown during the cosmetic stages of committing kinds.
    fn stage_color(&self) -> Color {
        match self {
            EventKind::Birth => Color::White,
            EventKind::Match => Color::Yellow,
            EventKind::Death => Color::Black,
            EventKind::Idle | EventKind::Animate { .. } | EventKind::Swap => Color::Default,
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EventKind::Idle => "idle",
            EventKind::Animate { .. } => "animate",
            EventKind::Swap => "swap",
            EventKind::Birth => "birth",
            EventKind::Match => "match",
            EventKind::Death => "death",
        };
        f.write_str(name)
    }
}

/// A staged action.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub kind: EventKind,
    pub points: EventPoints,
    /// Current stage, starting at 0.
    pub stage: u32,
    /// Stage at which the event completes.
    pub max_stage: u32,
    /// Cancelled events complete at their next advance without committing.
    pub cancelled: bool,
}

impl Event {
    /// Create an event of any kind. Arity is checked when it advances.
    pub fn new(kind: EventKind, points: impl IntoIterator<Item = Point>, max_stage: u32) -> Self {
        Self {
            id: EventId::UNASSIGNED,
            kind,
            points: points.into_iter().collect(),
            stage: 0,
            max_stage,
            cancelled: false,
        }
    }

    /// The no-op sentinel.
    #[must_use]
    pub fn idle() -> Self {
        Self::new(EventKind::Idle, std::iter::empty(), 0)
    }

    /// Animate `points` through the default palette.
    pub fn animate(points: impl IntoIterator<Item = Point>, max_stage: u32) -> Self {
        Self::animate_with(points, Palette::from_slice(&DEFAULT_PALETTE), max_stage)
    }

    /// Animate `points` through `palette`.
    pub fn animate_with(
        points: impl IntoIterator<Item = Point>,
        palette: Palette,
        max_stage: u32,
    ) -> Self {
        Self::new(EventKind::Animate { palette }, points, max_stage)
    }

    /// Swap the tokens at `a` and `b` after `max_stage` ticks.
    #[must_use]
    pub fn swap(a: Point, b: Point, max_stage: u32) -> Self {
        Self::new(EventKind::Swap, [a, b], max_stage)
    }

    /// Settle born `points` after `max_stage` ticks.
    pub fn birth(points: impl IntoIterator<Item = Point>, max_stage: u32) -> Self {
        Self::new(EventKind::Birth, points, max_stage)
    }

    /// Kill the run at `points` after `max_stage` ticks.
    pub fn match_run(points: impl IntoIterator<Item = Point>, max_stage: u32) -> Self {
        Self::new(EventKind::Match, points, max_stage)
    }

    /// Refill the killed `points` after `max_stage` ticks.
    pub fn death(points: impl IntoIterator<Item = Point>, max_stage: u32) -> Self {
        Self::new(EventKind::Death, points, max_stage)
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.kind == EventKind::Idle
    }
}

/// Cosmetic background paint for a set of points.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Paint {
    pub points: EventPoints,
    pub bg: Color,
}

/// The single mutation an event performs when it completes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Commit {
    /// No grid mutation.
    Cosmetic,
    /// Exchange two tokens.
    Swap(Point, Point),
    /// Kill these cells.
    Kill(EventPoints),
    /// Gravity-fill all holes.
    Refill,
    /// Mark these born cells as settled.
    Settle(EventPoints),
}

impl Commit {
    #[must_use]
    pub fn mutates(&self) -> bool {
        !matches!(self, Commit::Cosmetic)
    }
}

/// Result of advancing an event by one stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    Continue {
        next: Event,
        paint: Option<Paint>,
        spawn: Option<Event>,
    },
    Complete(Commit),
}

/// Advance `event` by one stage.
///
/// Fails with [`EventError::InvalidArity`] if the event carries the wrong
/// number of points for its kind.
pub fn advance(event: &Event) -> Result<Step, EventError> {
    let expected = event.kind.arity();
    if !expected.accepts(event.points.len()) {
        return Err(EventError::InvalidArity {
            kind: event.kind.clone(),
            expected,
            actual: event.points.len(),
        });
    }

    if event.cancelled || event.kind == EventKind::Idle {
        return Ok(Step::Complete(Commit::Cosmetic));
    }

    if event.stage >= event.max_stage {
        return Ok(Step::Complete(commit_for(event)));
    }

    let mut next = event.clone();
    next.stage += 1;

    let step = match &event.kind {
        EventKind::Animate { palette } => {
            let bg = palette.first().copied().unwrap_or_default();
            let mut rotated = palette.clone();
            if !rotated.is_empty() {
                rotated.rotate_left(1);
            }
            next.kind = EventKind::Animate { palette: rotated };
            Step::Continue {
                next,
                paint: Some(Paint {
                    points: event.points.clone(),
                    bg,
                }),
                spawn: None,
            }
        }
        EventKind::Swap => {
            // Parallel one-stage flash, offset by stage so colors cycle
            let mut palette = Palette::from_slice(&DEFAULT_PALETTE);
            let shift = event.stage as usize % palette.len();
            palette.rotate_left(shift);
            Step::Continue {
                next,
                paint: None,
                spawn: Some(Event::animate_with(event.points.iter().copied(), palette, 1)),
            }
        }
        kind => Step::Continue {
            paint: Some(Paint {
                points: event.points.clone(),
                bg: kind.stage_color(),
            }),
            next,
            spawn: None,
        },
    };

    Ok(step)
}

fn commit_for(event: &Event) -> Commit {
    match event.kind {
        EventKind::Swap => Commit::Swap(event.points[0], event.points[1]),
        EventKind::Match => Commit::Kill(event.points.clone()),
        EventKind::Death => Commit::Refill,
        EventKind::Birth => Commit::Settle(event.points.clone()),
        EventKind::Idle | EventKind::Animate { .. } => Commit::Cosmetic,
    }
}
