//! TUI reducer (update function).
//!
//! All state mutations happen here. The runtime calls `update(app, event)`
//! and executes the returned effects.
//!
//! Input adapters (keys, pointer taps, swipes, buttons) only translate input
//! into navigator calls; the navigator decides whether anything happens.

use std::time::Duration;

use crossterm::event::{
    Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use folio_core::gesture::{Gesture, Point, TapZone};
use folio_core::navigator::{NavEvent, NavIntent, Navigation};
use folio_core::particles::ParticleField;
use ratatui::layout::{Position, Rect};
use tracing::debug;

use crate::effects::UiEffect;
use crate::events::UiEvent;
use crate::layout::{BookLayout, CELL_WIDTH_PX, cell_to_point};
use crate::state::AppState;

/// The main reducer function.
///
/// Takes the current state and an event, mutates state, and returns effects
/// for the runtime to execute.
pub fn update(app: &mut AppState, event: UiEvent) -> Vec<UiEffect> {
    match event {
        UiEvent::Frame { width, height, now } => {
            handle_frame(app, width, height, now);
            vec![]
        }
        UiEvent::Tick => vec![],
        UiEvent::Terminal(term_event) => handle_terminal_event(app, term_event),
    }
}

fn handle_frame(app: &mut AppState, width: u16, height: u16, now: Duration) {
    app.now = app.now.max(now);
    app.ambient.observe(app.now);

    for event in app.navigator.advance(app.now) {
        if let NavEvent::Settled(transition) = event
            && transition.to > 0
            && !app.instruction.is_dismissed()
        {
            debug!("reader left the first page, dismissing instruction");
            app.instruction.dismiss(app.now);
        }
    }

    app.relayout(Rect::new(0, 0, width, height));

    if app.particles.is_none() && app.particles_enabled {
        app.particles = Some(ParticleField::generate(
            app.layout.viewport_width_px(),
            &app.particle_settings,
            &mut app.rng,
        ));
    }
}

fn handle_terminal_event(app: &mut AppState, event: Event) -> Vec<UiEffect> {
    match event {
        Event::Key(key) => handle_key(app, key),
        Event::Mouse(mouse) => handle_mouse(app, mouse),
        Event::FocusLost => {
            debug!("card hidden, pausing ambient animation");
            app.ambient.set_paused(true);
            vec![]
        }
        Event::FocusGained => {
            debug!("card visible, resuming ambient animation");
            app.ambient.set_paused(false);
            vec![]
        }
        _ => vec![],
    }
}

fn handle_key(app: &mut AppState, key: KeyEvent) -> Vec<UiEffect> {
    if key.kind != KeyEventKind::Press {
        return vec![];
    }

    match key.code {
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return vec![UiEffect::Quit];
        }
        KeyCode::Char('q') | KeyCode::Esc => return vec![UiEffect::Quit],
        _ => {}
    }

    if app.navigator.is_animating() {
        return vec![];
    }

    match key.code {
        KeyCode::Right | KeyCode::Char(' ') => navigate(app, NavIntent::Next),
        KeyCode::Left => navigate(app, NavIntent::Previous),
        KeyCode::Home => go_to(app, 0),
        KeyCode::End => go_to(app, app.navigator.page_count() - 1),
        _ => vec![],
    }
}

fn handle_mouse(app: &mut AppState, mouse: MouseEvent) -> Vec<UiEffect> {
    let (column, row) = (mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            // A new press supersedes any gesture whose release was lost.
            app.pointer.swipe.cancel();
            app.pointer.pressed_button = None;
            // Buttons are interactive controls: never part of a tap or swipe.
            if let Some(intent) = button_at(&app.layout, column, row) {
                app.pointer.pressed_button = Some(intent);
                return vec![];
            }
            if !app.navigator.is_animating() && app.layout.in_book(column, row) {
                app.pointer.swipe.begin(cell_to_point(column, row));
            }
            vec![]
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            // A terminal has no page scroll to suppress; the tracker still
            // records that the drag became horizontal.
            app.pointer.swipe.moved(cell_to_point(column, row));
            vec![]
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if let Some(intent) = app.pointer.pressed_button.take() {
                return if button_at(&app.layout, column, row) == Some(intent) {
                    navigate(app, intent)
                } else {
                    vec![]
                };
            }
            if !app.pointer.swipe.is_tracking() {
                return vec![];
            }
            let gesture = app.pointer.swipe.end(cell_to_point(column, row));
            if app.navigator.is_animating() {
                return vec![];
            }
            match gesture {
                Gesture::Swipe(intent) => navigate(app, intent),
                Gesture::Tap(point) => tap(app, point),
                Gesture::None => vec![],
            }
        }
        _ => vec![],
    }
}

fn button_at(layout: &BookLayout, column: u16, row: u16) -> Option<NavIntent> {
    let pos = Position::new(column, row);
    if layout.prev_button.contains(pos) {
        Some(NavIntent::Previous)
    } else if layout.next_button.contains(pos) {
        Some(NavIntent::Next)
    } else {
        None
    }
}

fn tap(app: &mut AppState, point: Point) -> Vec<UiEffect> {
    let book = app.layout.book;
    let offset = point.x - f32::from(book.x) * CELL_WIDTH_PX;
    let width = f32::from(book.width) * CELL_WIDTH_PX;
    match TapZone::classify(offset, width).intent() {
        Some(intent) => navigate(app, intent),
        None => vec![],
    }
}

fn navigate(app: &mut AppState, intent: NavIntent) -> Vec<UiEffect> {
    let navigation = app.navigator.apply(intent, app.now);
    transition_effects(app, navigation)
}

fn go_to(app: &mut AppState, target: usize) -> Vec<UiEffect> {
    let navigation = app.navigator.go_to(target, app.now);
    transition_effects(app, navigation)
}

/// Effects fired at the start of every accepted transition.
fn transition_effects(app: &AppState, navigation: Navigation) -> Vec<UiEffect> {
    if !navigation.is_started() {
        return vec![];
    }
    let mut effects = Vec::new();
    if app.feedback.haptics {
        effects.push(UiEffect::Haptic);
    }
    if app.feedback.sound {
        effects.push(UiEffect::PlayPageSound);
    }
    effects
}

#[cfg(test)]
mod tests {
    use folio_core::config::Config;
    use folio_core::content::Card;
    use folio_core::navigator::PageState;

    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn app_with(config: &Config) -> AppState {
        let mut app = AppState::new(config, Card::builtin(), true);
        frame(&mut app, 0);
        app
    }

    fn app() -> AppState {
        app_with(&Config::default())
    }

    fn frame(app: &mut AppState, now: u64) {
        update(
            app,
            UiEvent::Frame {
                width: 100,
                height: 40,
                now: ms(now),
            },
        );
    }

    fn key(app: &mut AppState, code: KeyCode) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Key(KeyEvent::new(code, KeyModifiers::NONE))),
        )
    }

    fn mouse(app: &mut AppState, kind: MouseEventKind, column: u16, row: u16) -> Vec<UiEffect> {
        update(
            app,
            UiEvent::Terminal(Event::Mouse(MouseEvent {
                kind,
                column,
                row,
                modifiers: KeyModifiers::NONE,
            })),
        )
    }

    fn click(app: &mut AppState, column: u16, row: u16) -> Vec<UiEffect> {
        mouse(app, MouseEventKind::Down(MouseButton::Left), column, row);
        mouse(app, MouseEventKind::Up(MouseButton::Left), column, row)
    }

    fn drag(app: &mut AppState, from: (u16, u16), to: (u16, u16)) -> Vec<UiEffect> {
        mouse(app, MouseEventKind::Down(MouseButton::Left), from.0, from.1);
        let mid = ((from.0 + to.0) / 2, (from.1 + to.1) / 2);
        mouse(app, MouseEventKind::Drag(MouseButton::Left), mid.0, mid.1);
        mouse(app, MouseEventKind::Up(MouseButton::Left), to.0, to.1)
    }

    #[test]
    fn test_right_arrow_turns_page_and_plays_sound() {
        let mut app = app();

        let effects = key(&mut app, KeyCode::Right);
        assert_eq!(effects, vec![UiEffect::PlayPageSound]);
        assert!(app.navigator.is_animating());

        frame(&mut app, 650);
        assert_eq!(app.navigator.current_index(), 1);
        assert!(!app.navigator.is_animating());
        assert!(app.instruction.is_dismissed());
    }

    #[test]
    fn test_space_goes_next_and_left_goes_back() {
        let mut app = app();
        key(&mut app, KeyCode::Char(' '));
        frame(&mut app, 650);
        key(&mut app, KeyCode::Left);
        frame(&mut app, 1300);
        assert_eq!(app.navigator.current_index(), 0);
    }

    #[test]
    fn test_keys_ignored_while_animating() {
        let mut app = app();
        key(&mut app, KeyCode::Right);
        frame(&mut app, 100);

        assert!(key(&mut app, KeyCode::Right).is_empty());
        assert!(key(&mut app, KeyCode::Left).is_empty());

        frame(&mut app, 650);
        assert_eq!(app.navigator.current_index(), 1);
    }

    #[test]
    fn test_previous_on_first_page_has_no_effects() {
        let mut app = app();
        assert!(key(&mut app, KeyCode::Left).is_empty());
        assert!(!app.navigator.is_animating());
    }

    #[test]
    fn test_home_and_end_jump() {
        let mut app = app();
        key(&mut app, KeyCode::End);
        frame(&mut app, 650);
        assert_eq!(app.navigator.current_index(), 4);
        assert!(!app.navigator.display().next.enabled);

        assert!(key(&mut app, KeyCode::Right).is_empty());
        key(&mut app, KeyCode::Home);
        frame(&mut app, 1300);
        assert_eq!(app.navigator.current_index(), 0);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = app();
        assert_eq!(key(&mut app, KeyCode::Char('q')), vec![UiEffect::Quit]);
        assert_eq!(key(&mut app, KeyCode::Esc), vec![UiEffect::Quit]);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(
            update(&mut app, UiEvent::Terminal(Event::Key(ctrl_c))),
            vec![UiEffect::Quit]
        );
    }

    #[test]
    fn test_haptics_and_sound_toggle_effects() {
        let config = Config {
            sound: false,
            haptics: true,
            ..Config::default()
        };
        let mut app = app_with(&config);
        assert_eq!(key(&mut app, KeyCode::Right), vec![UiEffect::Haptic]);
    }

    #[test]
    fn test_left_swipe_turns_forward() {
        let mut app = app();
        let book = app.layout.book;
        let y = book.y + 5;
        let start = book.x + 40;

        // 6 columns = 48px, past the 40px threshold.
        let effects = drag(&mut app, (start, y), (start - 6, y));
        assert_eq!(effects, vec![UiEffect::PlayPageSound]);
        assert_eq!(app.navigator.page_state(0), Some(PageState::TurningForward));
    }

    #[test]
    fn test_right_swipe_turns_back() {
        let mut app = app();
        key(&mut app, KeyCode::Right);
        frame(&mut app, 650);

        let book = app.layout.book;
        let y = book.y + 5;
        drag(&mut app, (book.x + 10, y), (book.x + 16, y));
        frame(&mut app, 1300);
        assert_eq!(app.navigator.current_index(), 0);
    }

    #[test]
    fn test_short_swipe_does_nothing() {
        let mut app = app();
        let book = app.layout.book;
        let y = book.y + 5;
        let start = book.x + 40;

        // 2 columns = 16px: past jitter, below threshold.
        assert!(drag(&mut app, (start, y), (start - 2, y)).is_empty());
        assert!(!app.navigator.is_animating());
    }

    #[test]
    fn test_swipe_started_mid_animation_is_ignored() {
        let mut app = app();
        key(&mut app, KeyCode::Right);
        let book = app.layout.book;
        let y = book.y + 5;
        let start = book.x + 40;

        assert!(drag(&mut app, (start, y), (start - 8, y)).is_empty());
        frame(&mut app, 650);
        assert_eq!(app.navigator.current_index(), 1);
    }

    #[test]
    fn test_press_outside_book_drops_unreleased_swipe() {
        let mut app = app();
        let book = app.layout.book;
        let y = book.y + 5;

        // Release of this press never arrives.
        mouse(
            &mut app,
            MouseEventKind::Down(MouseButton::Left),
            book.x + 30,
            y,
        );
        assert!(app.pointer.swipe.is_tracking());

        mouse(&mut app, MouseEventKind::Down(MouseButton::Left), 2, y);
        assert!(!app.pointer.swipe.is_tracking());
        let effects = mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 2, y);
        assert!(effects.is_empty());
        assert!(!app.navigator.is_animating());
    }

    #[test]
    fn test_button_press_drops_unreleased_swipe() {
        let mut app = app();
        let book = app.layout.book;
        let button = app.layout.next_button;

        mouse(
            &mut app,
            MouseEventKind::Down(MouseButton::Left),
            book.x + 30,
            book.y + 5,
        );
        mouse(
            &mut app,
            MouseEventKind::Down(MouseButton::Left),
            button.x + 1,
            button.y,
        );
        assert!(!app.pointer.swipe.is_tracking());
        // Releasing off the button cancels it and leaves no swipe behind.
        let effects = mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 2, button.y);
        assert!(effects.is_empty());
        assert!(!app.navigator.is_animating());
    }

    #[test]
    fn test_tap_zones() {
        let mut app = app();
        let book = app.layout.book;
        let y = book.y + 3;

        // Left third on the first page: nothing to go back to.
        assert!(click(&mut app, book.x + 1, y).is_empty());
        // Middle third is inert.
        assert!(click(&mut app, book.x + book.width / 2, y).is_empty());
        // Right third turns forward.
        assert_eq!(
            click(&mut app, book.right() - 2, y),
            vec![UiEffect::PlayPageSound]
        );
    }

    #[test]
    fn test_next_button_click() {
        let mut app = app();
        let button = app.layout.next_button;
        let effects = click(&mut app, button.x + 1, button.y);
        assert_eq!(effects, vec![UiEffect::PlayPageSound]);
        frame(&mut app, 650);
        assert!(app.navigator.display().previous.enabled);
    }

    #[test]
    fn test_button_release_elsewhere_is_cancelled() {
        let mut app = app();
        let button = app.layout.next_button;
        mouse(
            &mut app,
            MouseEventKind::Down(MouseButton::Left),
            button.x + 1,
            button.y,
        );
        let effects = mouse(&mut app, MouseEventKind::Up(MouseButton::Left), 0, 0);
        assert!(effects.is_empty());
        assert!(!app.navigator.is_animating());
    }

    #[test]
    fn test_focus_pauses_ambient_clock() {
        let mut app = app();
        frame(&mut app, 100);
        update(&mut app, UiEvent::Terminal(Event::FocusLost));
        frame(&mut app, 900);
        update(&mut app, UiEvent::Terminal(Event::FocusGained));
        frame(&mut app, 1000);
        assert_eq!(app.ambient.elapsed(), ms(200));
    }

    #[test]
    fn test_first_frame_generates_particles() {
        let app = app();
        // 100 columns = 800px, wider than the narrow cutoff.
        assert_eq!(app.particles.as_ref().map(ParticleField::len), Some(18));

        let config = Config {
            particles: folio_core::config::ParticlesConfig {
                enabled: false,
                ..Default::default()
            },
            ..Config::default()
        };
        assert!(app_with(&config).particles.is_none());
    }

    #[test]
    fn test_instruction_hint_leaves_layout_after_fade() {
        let mut app = app();
        key(&mut app, KeyCode::Right);
        frame(&mut app, 650);
        assert_eq!(app.layout.hint.height, 1);
        frame(&mut app, 1200);
        assert_eq!(app.layout.hint.height, 0);
    }
}
