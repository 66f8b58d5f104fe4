//! Application state.
//!
//! ```text
//! AppState
//! ├── navigator: PageNavigator   (current page, animation lock, page states)
//! ├── card + page_cache          (content, wrapped per book width)
//! ├── layout: BookLayout         (where things are on screen)
//! ├── gesture: PointerState      (swipe tracking, pressed button)
//! └── decorations                (particles, hints, entrance, ambient clock)
//! ```
//!
//! State is mutated only by the reducer in `update.rs`.

use std::time::Duration;

use folio_core::config::Config;
use folio_core::content::Card;
use folio_core::gesture::SwipeTracker;
use folio_core::hints::{Entrance, InstructionHint, SwipeHint};
use folio_core::navigator::{NavIntent, PageNavigator};
use folio_core::particles::{AmbientClock, ParticleField, ParticleSettings};
use ratatui::layout::Rect;

use crate::layout::{BookLayout, ENTRANCE_DROP};

/// Body text of every page, wrapped for the current book width.
///
/// Built eagerly for all pages so turning never lays out text mid-flip.
#[derive(Debug, Default)]
pub struct PageCache {
    width: usize,
    pages: Vec<Vec<String>>,
}

impl PageCache {
    /// Rewraps every page if `width` changed.
    pub fn ensure(&mut self, card: &Card, width: usize) {
        if self.width == width && self.pages.len() == card.pages.len() {
            return;
        }
        self.width = width;
        self.pages = card.pages.iter().map(|p| p.wrap_body(width)).collect();
    }

    pub fn lines(&self, index: usize) -> &[String] {
        self.pages.get(index).map(Vec::as_slice).unwrap_or_default()
    }
}

/// In-progress pointer interaction.
#[derive(Debug, Default)]
pub struct PointerState {
    pub swipe: SwipeTracker,
    /// Button under the last left press, fired if released over it.
    pub pressed_button: Option<NavIntent>,
}

/// Side-effect switches read by the reducer.
#[derive(Debug, Clone, Copy)]
pub struct Feedback {
    pub sound: bool,
    pub haptics: bool,
}

/// Full TUI state.
pub struct AppState {
    /// Flag indicating the app should quit.
    pub should_quit: bool,
    /// Time since the card opened, updated every frame.
    pub now: Duration,
    pub card: Card,
    pub navigator: PageNavigator,
    pub page_cache: PageCache,
    pub layout: BookLayout,
    pub pointer: PointerState,
    pub feedback: Feedback,
    pub instruction: InstructionHint,
    pub swipe_hint: SwipeHint,
    pub entrance: Entrance,
    pub ambient: AmbientClock,
    /// Generated on the first frame, once the viewport width is known.
    pub particles: Option<ParticleField>,
    pub particles_enabled: bool,
    pub particle_settings: ParticleSettings,
    pub rng: fastrand::Rng,
}

impl AppState {
    pub fn new(config: &Config, card: Card, pointer_capable: bool) -> Self {
        let navigator = PageNavigator::new(card.page_count(), config.timing());
        Self {
            should_quit: false,
            now: Duration::ZERO,
            card,
            navigator,
            page_cache: PageCache::default(),
            layout: BookLayout::default(),
            pointer: PointerState {
                swipe: SwipeTracker::new(config.swipe()),
                pressed_button: None,
            },
            feedback: Feedback {
                sound: config.sound,
                haptics: config.haptics,
            },
            instruction: config.instruction_hint(),
            swipe_hint: config.swipe_hint(pointer_capable),
            entrance: config.entrance(),
            ambient: AmbientClock::default(),
            particles: None,
            particles_enabled: config.particles.enabled,
            particle_settings: config.particle_settings(),
            rng: fastrand::Rng::new(),
        }
    }

    /// Recomputes the layout for `viewport` at the current time.
    pub fn relayout(&mut self, viewport: Rect) {
        let progress = self.entrance.progress(self.now);
        let drop = (f32::from(ENTRANCE_DROP) * (1.0 - progress)).round() as u16;
        let show_hint = self.instruction.is_displayed(self.now);
        self.layout = BookLayout::compute(viewport, drop, show_hint);
        self.page_cache
            .ensure(&self.card, usize::from(self.layout.book.width.saturating_sub(4)));
    }

    /// Whether the runtime should tick at full frame rate.
    pub fn is_animating(&self) -> bool {
        self.navigator.is_animating()
            || !self.entrance.is_finished(self.now)
            || (self.instruction.is_dismissed() && self.instruction.is_displayed(self.now))
            || self.swipe_hint.is_visible(self.now)
    }

    /// Whether the book is visible yet.
    pub fn book_visible(&self) -> bool {
        self.entrance.progress(self.now) > 0.0
    }
}
