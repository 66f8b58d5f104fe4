//! UI effect types.
//!
//! Effects are commands returned by the reducer that the runtime executes.
//! They represent I/O only (no direct UI mutations), which keeps the reducer
//! pure and lets tests assert on what a page turn asks for.

/// Effects returned by the reducer for the runtime to execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEffect {
    /// Quit the application.
    Quit,
    /// Play the synthesized page-turn sound (best effort).
    PlayPageSound,
    /// Short tactile cue; rung as the terminal bell.
    Haptic,
}
