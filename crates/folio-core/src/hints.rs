//! Transient UI affordances: the reading instruction, the swipe hint and the
//! book's entrance animation. Each one is a pure function of elapsed time.

use std::time::Duration;

/// "Tap or swipe to turn the page" line shown under the book until the
/// reader first leaves the opening page.
#[derive(Debug, Clone)]
pub struct InstructionHint {
    fade: Duration,
    dismissed_at: Option<Duration>,
}

impl InstructionHint {
    pub const DEFAULT_FADE: Duration = Duration::from_millis(500);

    pub fn new(fade: Duration) -> Self {
        Self {
            fade,
            dismissed_at: None,
        }
    }

    /// Starts fading out. Later calls keep the first dismissal time.
    pub fn dismiss(&mut self, now: Duration) {
        if self.dismissed_at.is_none() {
            self.dismissed_at = Some(now);
        }
    }

    pub fn is_dismissed(&self) -> bool {
        self.dismissed_at.is_some()
    }

    /// Opacity in `0.0..=1.0`.
    pub fn opacity(&self, now: Duration) -> f32 {
        let Some(at) = self.dismissed_at else {
            return 1.0;
        };
        if self.fade.is_zero() {
            return 0.0;
        }
        let elapsed = now.saturating_sub(at).as_secs_f32();
        (1.0 - elapsed / self.fade.as_secs_f32()).clamp(0.0, 1.0)
    }

    /// False once the fade has finished and the hint no longer takes space.
    pub fn is_displayed(&self, now: Duration) -> bool {
        match self.dismissed_at {
            None => true,
            Some(at) => now < at + self.fade,
        }
    }
}

impl Default for InstructionHint {
    fn default() -> Self {
        Self::new(Self::DEFAULT_FADE)
    }
}

/// One-shot "Swipe to turn pages" hint for pointer-capable surfaces.
#[derive(Debug, Clone, Copy)]
pub struct SwipeHint {
    enabled: bool,
    delay: Duration,
    duration: Duration,
}

impl SwipeHint {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

    pub fn new(enabled: bool, delay: Duration, duration: Duration) -> Self {
        Self {
            enabled,
            delay,
            duration,
        }
    }

    pub fn is_visible(&self, now: Duration) -> bool {
        self.enabled && now >= self.delay && now < self.delay + self.duration
    }
}

/// Fade/slide-in of the book when the card opens.
#[derive(Debug, Clone, Copy)]
pub struct Entrance {
    delay: Duration,
    duration: Duration,
}

impl Entrance {
    pub const DEFAULT_DELAY: Duration = Duration::from_millis(200);
    pub const DEFAULT_DURATION: Duration = Duration::from_millis(800);

    pub fn new(delay: Duration, duration: Duration) -> Self {
        Self { delay, duration }
    }

    /// Eased progress in `0.0..=1.0`; 0 while waiting, 1 when done.
    pub fn progress(&self, now: Duration) -> f32 {
        if now < self.delay {
            return 0.0;
        }
        if self.duration.is_zero() {
            return 1.0;
        }
        let t = ((now - self.delay).as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0);
        // ease-out cubic
        1.0 - (1.0 - t).powi(3)
    }

    pub fn is_finished(&self, now: Duration) -> bool {
        now >= self.delay + self.duration
    }
}

impl Default for Entrance {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DELAY, Self::DEFAULT_DURATION)
    }
}
