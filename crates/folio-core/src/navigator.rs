//! Page navigation state machine.
//!
//! `PageNavigator` owns the current page index, the animation lock and the
//! per-page visual state. A transition runs in two timed phases:
//!
//! ```text
//! go_to(t) ──► immediate marks ──(flip)──► flip marks ──(flip + buffer)──► reconcile
//!   lock on                                                                lock off
//! ```
//!
//! The immediate and flip marks only drive the animation. The reconciliation
//! pass recomputes every page from the settled index and is the authoritative
//! state. `current_index` changes only at reconciliation.

use std::num::NonZeroUsize;
use std::time::Duration;

use tracing::{debug, trace};

use crate::scheduler::Scheduler;

/// Visual state of a single page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PageState {
    /// Not yet reached; stacked under the active page.
    #[default]
    Idle,
    /// The page being read.
    Active,
    /// Already turned over to the left.
    Behind,
    /// Flipping from right to left.
    TurningForward,
    /// Flipping back from left to right.
    TurningBackward,
}

impl PageState {
    pub fn is_turning(self) -> bool {
        matches!(self, PageState::TurningForward | PageState::TurningBackward)
    }

    /// Settled state of page `index` when `current` is the active page.
    pub fn settled(index: usize, current: usize) -> Self {
        match index.cmp(&current) {
            std::cmp::Ordering::Less => PageState::Behind,
            std::cmp::Ordering::Equal => PageState::Active,
            std::cmp::Ordering::Greater => PageState::Idle,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Forward,
    Backward,
}

impl Direction {
    pub fn between(from: usize, to: usize) -> Self {
        if to > from {
            Direction::Forward
        } else {
            Direction::Backward
        }
    }
}

/// Relative navigation request produced by input adapters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavIntent {
    Next,
    Previous,
}

/// Animation timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// How long the page flip animation runs.
    pub flip: Duration,
    /// Extra wait after the flip before state is reconciled.
    pub settle_buffer: Duration,
}

impl Timing {
    pub const DEFAULT_FLIP: Duration = Duration::from_millis(600);
    pub const DEFAULT_SETTLE_BUFFER: Duration = Duration::from_millis(50);

    /// Total length of the transition window.
    pub fn settle(&self) -> Duration {
        self.flip + self.settle_buffer
    }
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            flip: Self::DEFAULT_FLIP,
            settle_buffer: Self::DEFAULT_SETTLE_BUFFER,
        }
    }
}

/// An accepted transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: usize,
    pub to: usize,
    pub direction: Direction,
    pub started_at: Duration,
}

/// Why a navigation request was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ignored {
    OutOfRange,
    AlreadyCurrent,
    Animating,
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Started(Transition),
    Ignored(Ignored),
}

impl Navigation {
    pub fn is_started(&self) -> bool {
        matches!(self, Navigation::Started(_))
    }
}

/// Emitted by [`PageNavigator::advance`] as timed phases complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavEvent {
    /// The flip animation finished; the destination is visible.
    FlipCompleted(Transition),
    /// State reconciled and the lock released.
    Settled(Transition),
}

/// Previous/next control state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavButton {
    pub enabled: bool,
    pub label: String,
}

/// Indicator and control state derived from the settled index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Display {
    /// 1-based number of the current page.
    pub current_page: usize,
    pub total_pages: usize,
    pub previous: NavButton,
    pub next: NavButton,
}

impl Display {
    fn for_index(current: usize, total: usize) -> Self {
        Self {
            current_page: current + 1,
            total_pages: total,
            previous: NavButton {
                enabled: current > 0,
                label: format!("Go to page {current}"),
            },
            next: NavButton {
                enabled: current + 1 < total,
                label: format!("Go to page {}", current + 2),
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Flip,
    Settle,
}

/// Serializes page transitions over a fixed set of pages.
#[derive(Debug)]
pub struct PageNavigator {
    pages: Vec<PageState>,
    current: usize,
    animating: bool,
    in_flight: Option<Transition>,
    timing: Timing,
    timers: Scheduler<Phase>,
    display: Display,
}

impl PageNavigator {
    pub fn new(page_count: NonZeroUsize, timing: Timing) -> Self {
        let total = page_count.get();
        let pages = (0..total).map(|i| PageState::settled(i, 0)).collect();
        Self {
            pages,
            current: 0,
            animating: false,
            in_flight: None,
            timing,
            timers: Scheduler::new(),
            display: Display::for_index(0, total),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[PageState] {
        &self.pages
    }

    pub fn page_state(&self, index: usize) -> Option<PageState> {
        self.pages.get(index).copied()
    }

    pub fn display(&self) -> &Display {
        &self.display
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    /// The transition currently running, if any.
    pub fn in_flight(&self) -> Option<&Transition> {
        self.in_flight.as_ref()
    }

    /// Fraction of the flip animation elapsed at `now`, in `0.0..=1.0`.
    pub fn flip_progress(&self, now: Duration) -> Option<(Transition, f32)> {
        let t = self.in_flight?;
        let flip = self.timing.flip.as_secs_f32();
        let elapsed = now.saturating_sub(t.started_at).as_secs_f32();
        let progress = if flip > 0.0 {
            (elapsed / flip).clamp(0.0, 1.0)
        } else {
            1.0
        };
        Some((t, progress))
    }

    /// Deadline of the next pending phase.
    pub fn next_deadline(&self) -> Option<Duration> {
        self.timers.next_deadline()
    }

    /// Starts a transition to `target`.
    ///
    /// Out-of-range targets, the current page, and any request while a
    /// transition is running are dropped without side effects.
    pub fn go_to(&mut self, target: usize, now: Duration) -> Navigation {
        if target >= self.pages.len() {
            return self.ignore(target, Ignored::OutOfRange);
        }
        if self.animating {
            return self.ignore(target, Ignored::Animating);
        }
        if target == self.current {
            return self.ignore(target, Ignored::AlreadyCurrent);
        }

        self.animating = true;
        let transition = Transition {
            from: self.current,
            to: target,
            direction: Direction::between(self.current, target),
            started_at: now,
        };
        self.in_flight = Some(transition);

        match transition.direction {
            Direction::Forward => {
                self.pages[transition.from] = PageState::TurningForward;
            }
            Direction::Backward => {
                // target < current, so current >= 1.
                self.pages[transition.from - 1] = PageState::TurningBackward;
                self.pages[transition.from] = PageState::Idle;
            }
        }

        self.timers.schedule(now + self.timing.flip, Phase::Flip);
        self.timers.schedule(now + self.timing.settle(), Phase::Settle);

        debug!(
            from = transition.from,
            to = transition.to,
            direction = ?transition.direction,
            "page transition started"
        );
        Navigation::Started(transition)
    }

    pub fn next(&mut self, now: Duration) -> Navigation {
        if self.animating {
            return self.ignore(self.current + 1, Ignored::Animating);
        }
        if self.current + 1 >= self.pages.len() {
            return self.ignore(self.current + 1, Ignored::OutOfRange);
        }
        self.go_to(self.current + 1, now)
    }

    pub fn previous(&mut self, now: Duration) -> Navigation {
        if self.animating {
            return self.ignore(self.current.saturating_sub(1), Ignored::Animating);
        }
        let Some(target) = self.current.checked_sub(1) else {
            return self.ignore(0, Ignored::OutOfRange);
        };
        self.go_to(target, now)
    }

    pub fn apply(&mut self, intent: NavIntent, now: Duration) -> Navigation {
        match intent {
            NavIntent::Next => self.next(now),
            NavIntent::Previous => self.previous(now),
        }
    }

    /// Runs every phase due at or before `now`.
    pub fn advance(&mut self, now: Duration) -> Vec<NavEvent> {
        let mut events = Vec::new();
        while let Some(phase) = self.timers.pop_due(now) {
            let Some(transition) = self.in_flight else {
                continue;
            };
            match phase {
                Phase::Flip => {
                    self.complete_flip(&transition);
                    events.push(NavEvent::FlipCompleted(transition));
                }
                Phase::Settle => {
                    self.settle(&transition);
                    events.push(NavEvent::Settled(transition));
                }
            }
        }
        events
    }

    fn complete_flip(&mut self, t: &Transition) {
        match t.direction {
            Direction::Forward => {
                self.pages[t.from] = PageState::Behind;
                self.pages[t.to] = PageState::Active;
            }
            Direction::Backward => {
                self.pages[t.from - 1] = PageState::Active;
            }
        }
    }

    fn settle(&mut self, t: &Transition) {
        self.current = t.to;
        self.reconcile();
        self.display = Display::for_index(self.current, self.pages.len());
        self.in_flight = None;
        self.animating = false;
        debug!(page = self.current, "page transition settled");
    }

    fn reconcile(&mut self) {
        let current = self.current;
        for (index, state) in self.pages.iter_mut().enumerate() {
            *state = PageState::settled(index, current);
        }
    }

    fn ignore(&self, target: usize, reason: Ignored) -> Navigation {
        trace!(target, current = self.current, ?reason, "navigation ignored");
        Navigation::Ignored(reason)
    }
}
