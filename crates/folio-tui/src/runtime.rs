//! Event loop and effect execution.

use std::io::{self, Stdout, Write};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use folio_core::config::Config;
use folio_core::content::Card;
use folio_core::interrupt;
use folio_core::sound::PageTurnSound;
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tracing::{debug, info};

use crate::audio::PageTurnPlayer;
use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::state::AppState;
use crate::{render, terminal, update};

/// Frame cadence while anything is moving (~60fps).
pub const FRAME_DURATION: Duration = Duration::from_millis(16);

/// Poll duration when only the ambient particles are drifting.
pub const IDLE_POLL_DURATION: Duration = Duration::from_millis(100);

/// Full-screen card runtime.
///
/// Owns the terminal and state. Terminal state is restored on drop, panic,
/// or Ctrl+C.
pub struct TuiRuntime {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    pub state: AppState,
    player: PageTurnPlayer,
    /// When the card opened; all state timestamps are relative to this.
    started: Instant,
    last_tick: Instant,
    last_terminal_event: Instant,
}

impl TuiRuntime {
    pub fn new(config: &Config, card: Card) -> Result<Self> {
        // Panic hook goes in BEFORE entering the alternate screen.
        terminal::install_panic_hook();
        interrupt::set_restore_hook(|| {
            let _ = terminal::restore_terminal();
        });
        interrupt::reset();

        let terminal = terminal::setup_terminal().context("Failed to setup terminal")?;

        // Mouse capture always delivers pointer events, so the swipe hint
        // applies to every terminal.
        let state = AppState::new(config, card, true);
        let player = PageTurnPlayer::new(PageTurnSound::default().with_volume(config.sound_volume));

        let now = Instant::now();
        Ok(Self {
            terminal,
            state,
            player,
            started: now,
            last_tick: now,
            last_terminal_event: now,
        })
    }

    /// Runs the main event loop until the reader quits.
    pub fn run(&mut self) -> Result<()> {
        terminal::enable_input_features()?;
        info!(
            pages = self.state.navigator.page_count(),
            title = %self.state.card.title,
            "card opened"
        );
        self.event_loop()
    }

    fn event_loop(&mut self) -> Result<()> {
        let mut dirty = true;

        while !self.state.should_quit {
            if interrupt::is_interrupted() {
                debug!("interrupted, closing card");
                self.state.should_quit = true;
                break;
            }

            let mut events = self.collect_events()?;

            // Layout and timers update before any input of this iteration.
            let size = self.terminal.size()?;
            events.insert(
                0,
                UiEvent::Frame {
                    width: size.width,
                    height: size.height,
                    now: self.started.elapsed(),
                },
            );

            for event in events {
                if matches!(&event, UiEvent::Terminal(_)) {
                    self.last_terminal_event = Instant::now();
                }
                // Only Tick renders; input is batched into the next frame.
                if matches!(&event, UiEvent::Tick) {
                    dirty = true;
                }
                let effects = update::update(&mut self.state, event);
                self.execute_effects(effects);
            }

            if dirty {
                self.terminal.draw(|frame| {
                    render::render(&self.state, frame);
                })?;
                dirty = false;
            }
        }

        info!(
            page = self.state.navigator.current_index() + 1,
            "card closed"
        );
        Ok(())
    }

    fn collect_events(&mut self) -> Result<Vec<UiEvent>> {
        let mut events = Vec::new();

        let recent_terminal_activity = self.last_terminal_event.elapsed() < IDLE_POLL_DURATION;
        let tick_interval = if self.state.is_animating() || recent_terminal_activity {
            FRAME_DURATION
        } else {
            IDLE_POLL_DURATION
        };

        let poll_duration = tick_interval.saturating_sub(self.last_tick.elapsed());
        if event::poll(poll_duration)? {
            events.push(UiEvent::Terminal(event::read()?));
            while event::poll(Duration::ZERO)? {
                events.push(UiEvent::Terminal(event::read()?));
            }
        }

        if self.last_tick.elapsed() >= tick_interval {
            events.push(UiEvent::Tick);
            self.last_tick = Instant::now();
        }

        Ok(events)
    }

    fn execute_effects(&mut self, effects: Vec<UiEffect>) {
        for effect in effects {
            self.execute_effect(effect);
        }
    }

    fn execute_effect(&mut self, effect: UiEffect) {
        match effect {
            UiEffect::Quit => {
                self.state.should_quit = true;
            }
            UiEffect::PlayPageSound => self.player.play(),
            UiEffect::Haptic => {
                let mut stdout = io::stdout();
                let _ = stdout.write_all(b"\x07").and_then(|()| stdout.flush());
            }
        }
    }
}

impl Drop for TuiRuntime {
    fn drop(&mut self) {
        let _ = terminal::restore_terminal();
    }
}
