//! Events consumed by the reducer.

use std::time::Duration;

use crossterm::event::Event;

#[derive(Debug, Clone)]
pub enum UiEvent {
    /// Start of a loop iteration: current viewport and time since the card
    /// opened. Always processed before other events of the iteration.
    Frame {
        width: u16,
        height: u16,
        now: Duration,
    },
    /// Render cadence tick.
    Tick,
    /// Raw terminal input.
    Terminal(Event),
}
