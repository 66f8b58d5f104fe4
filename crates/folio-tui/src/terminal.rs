//! Terminal lifecycle management.
//!
//! Terminal state is restored on:
//! - Normal exit (via Drop on the runtime)
//! - Ctrl+C signal (second press, through the interrupt restore hook)
//! - Panic

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::cursor::Show;
use crossterm::event::{
    DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Enables raw mode, enters the alternate screen and creates the terminal.
///
/// Call `install_panic_hook()` before this to ensure terminal restore on panic.
///
/// # Errors
/// Returns an error if the terminal cannot be switched into TUI mode.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
    terminal.hide_cursor().context("Failed to hide cursor")?;
    Ok(terminal)
}

/// Enables pointer input (taps, swipes, buttons) and focus reporting, which
/// pauses the ambient animation while the terminal is in the background.
///
/// # Errors
/// Returns an error if the terminal rejects the escape sequences.
pub fn enable_input_features() -> Result<()> {
    execute!(io::stdout(), EnableMouseCapture, EnableFocusChange)
        .context("Failed to enable input features")?;
    Ok(())
}

/// Restores terminal state. Idempotent.
///
/// # Errors
/// Returns an error if the alternate screen or raw mode cannot be left.
pub fn restore_terminal() -> Result<()> {
    // Must be disabled before leaving raw mode; safe even if never enabled.
    let _ = execute!(io::stdout(), DisableFocusChange, DisableMouseCapture);

    execute!(io::stdout(), LeaveAlternateScreen, Show)
        .context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")?;
    Ok(())
}

/// Installs a panic hook that restores the terminal before printing the panic.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal();
        original_hook(panic_info);
    }));
}
