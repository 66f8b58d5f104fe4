use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);
static RESTORE_HOOK: OnceLock<Box<dyn Fn() + Send + Sync>> = OnceLock::new();

/// Initializes the Ctrl+C handler.
///
/// The handler only sets a flag; the event loop polls it and quits.
/// A second Ctrl+C before the loop notices force-exits after running the
/// restore hook.
///
/// # Errors
/// Returns an error if a handler is already registered.
pub fn init() -> anyhow::Result<()> {
    ctrlc::set_handler(trigger_ctrl_c)?;
    Ok(())
}

/// Triggers an interrupt via Ctrl+C, force-exiting on a second Ctrl+C.
pub fn trigger_ctrl_c() {
    if INTERRUPTED.swap(true, Ordering::SeqCst) {
        // Restore terminal first since process::exit() bypasses Drop handlers.
        if let Some(hook) = RESTORE_HOOK.get() {
            hook();
        }
        std::process::exit(130);
    }
}

/// Checks if an interrupt has been requested.
pub fn is_interrupted() -> bool {
    INTERRUPTED.load(Ordering::SeqCst)
}

/// Resets the interrupt flag.
pub fn reset() {
    INTERRUPTED.store(false, Ordering::SeqCst);
}

/// Registers a restore hook called on the second Ctrl+C before exit.
///
/// Typically used by the TUI to restore terminal state.
pub fn set_restore_hook<F>(hook: F)
where
    F: Fn() + Send + Sync + 'static,
{
    let _ = RESTORE_HOOK.set(Box::new(hook));
}
