//! Pointer gesture recognition: horizontal swipes and tap zones.
//!
//! Coordinates are in pixels (or pixel-like units); the terminal frontend
//! scales cell positions before feeding them in.

use crate::navigator::NavIntent;

/// Net horizontal travel needed for a swipe to turn the page.
pub const DEFAULT_SWIPE_THRESHOLD: f32 = 40.0;
/// Horizontal travel after which a drag is treated as a swipe in progress.
pub const DEFAULT_SWIPE_JITTER: f32 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    pub threshold: f32,
    pub jitter: f32,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_SWIPE_THRESHOLD,
            jitter: DEFAULT_SWIPE_JITTER,
        }
    }
}

/// What a finished gesture amounted to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Horizontal swipe past the threshold.
    Swipe(NavIntent),
    /// Press and release without meaningful travel, at the press position.
    Tap(Point),
    /// Scroll-like or below-threshold movement.
    None,
}

/// Tracks one press/drag/release sequence.
#[derive(Debug, Default)]
pub struct SwipeTracker {
    config: SwipeConfig,
    start: Option<Point>,
    horizontal: bool,
}

impl SwipeTracker {
    pub fn new(config: SwipeConfig) -> Self {
        Self {
            config,
            start: None,
            horizontal: false,
        }
    }

    pub fn is_tracking(&self) -> bool {
        self.start.is_some()
    }

    /// True once a drag has been classified as a horizontal swipe; the host
    /// should stop treating further movement as scrolling.
    pub fn is_horizontal(&self) -> bool {
        self.horizontal
    }

    pub fn begin(&mut self, at: Point) {
        self.start = Some(at);
        self.horizontal = false;
    }

    /// Returns true when default scrolling should be suppressed for this move.
    pub fn moved(&mut self, to: Point) -> bool {
        let Some(start) = self.start else {
            return false;
        };
        let dx = (start.x - to.x).abs();
        let dy = (start.y - to.y).abs();
        if dx > dy && dx > self.config.jitter {
            self.horizontal = true;
            return true;
        }
        false
    }

    /// Finishes the gesture and classifies it.
    pub fn end(&mut self, at: Point) -> Gesture {
        let Some(start) = self.start.take() else {
            return Gesture::None;
        };
        let dragged = self.is_horizontal();
        self.horizontal = false;

        let dx = start.x - at.x;
        let dy = (start.y - at.y).abs();
        if dx.abs() > self.config.threshold && dx.abs() > dy {
            // Finger moved left: reveal the next page.
            return if dx > 0.0 {
                Gesture::Swipe(NavIntent::Next)
            } else {
                Gesture::Swipe(NavIntent::Previous)
            };
        }
        // A drag that went sideways and came back is not a tap.
        if !dragged && dx.abs() <= self.config.jitter && dy <= self.config.jitter {
            return Gesture::Tap(start);
        }
        Gesture::None
    }

    /// Drops the gesture in progress, e.g. when a transition starts.
    pub fn cancel(&mut self) {
        self.start = None;
        self.horizontal = false;
    }
}

/// Horizontal third of the book surface hit by a tap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapZone {
    Previous,
    Inert,
    Next,
}

impl TapZone {
    /// Classifies a tap `offset` pixels from the left edge of a surface
    /// `width` pixels wide.
    pub fn classify(offset: f32, width: f32) -> Self {
        let third = width / 3.0;
        if offset > third * 2.0 {
            TapZone::Next
        } else if offset < third {
            TapZone::Previous
        } else {
            TapZone::Inert
        }
    }

    pub fn intent(self) -> Option<NavIntent> {
        match self {
            TapZone::Previous => Some(NavIntent::Previous),
            TapZone::Inert => None,
            TapZone::Next => Some(NavIntent::Next),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(dx: f32, dy: f32) -> Gesture {
        let mut tracker = SwipeTracker::new(SwipeConfig::default());
        tracker.begin(Point::new(200.0, 100.0));
        tracker.moved(Point::new(200.0 + dx / 2.0, 100.0 + dy / 2.0));
        tracker.end(Point::new(200.0 + dx, 100.0 + dy))
    }

    #[test]
    fn test_left_swipe_goes_next() {
        assert_eq!(swipe(-45.0, 10.0), Gesture::Swipe(NavIntent::Next));
    }

    #[test]
    fn test_right_swipe_goes_previous() {
        assert_eq!(swipe(45.0, -10.0), Gesture::Swipe(NavIntent::Previous));
    }

    #[test]
    fn test_short_swipe_is_ignored() {
        assert_eq!(swipe(-20.0, 0.0), Gesture::None);
        assert_eq!(swipe(40.0, 0.0), Gesture::None);
    }

    #[test]
    fn test_vertical_swipe_is_ignored() {
        assert_eq!(swipe(-60.0, 80.0), Gesture::None);
    }

    #[test]
    fn test_release_without_travel_is_tap() {
        assert_eq!(swipe(3.0, 2.0), Gesture::Tap(Point::new(200.0, 100.0)));
    }

    #[test]
    fn test_end_without_begin_is_ignored() {
        let mut tracker = SwipeTracker::default();
        assert_eq!(tracker.end(Point::new(0.0, 0.0)), Gesture::None);
    }

    #[test]
    fn test_gesture_is_consumed_once() {
        let mut tracker = SwipeTracker::new(SwipeConfig::default());
        tracker.begin(Point::new(100.0, 0.0));
        assert_eq!(
            tracker.end(Point::new(50.0, 0.0)),
            Gesture::Swipe(NavIntent::Next)
        );
        assert_eq!(tracker.end(Point::new(0.0, 0.0)), Gesture::None);
        assert!(!tracker.is_tracking());
    }

    #[test]
    fn test_horizontal_move_past_jitter_suppresses_scroll() {
        let mut tracker = SwipeTracker::new(SwipeConfig::default());
        tracker.begin(Point::new(100.0, 100.0));
        assert!(!tracker.moved(Point::new(95.0, 100.0)));
        assert!(!tracker.moved(Point::new(88.0, 130.0)));
        assert!(!tracker.is_horizontal());
        assert!(tracker.moved(Point::new(85.0, 102.0)));
        assert!(tracker.is_horizontal());
    }

    #[test]
    fn test_horizontal_drag_returning_to_start_is_not_tap() {
        let mut tracker = SwipeTracker::new(SwipeConfig::default());
        tracker.begin(Point::new(100.0, 100.0));
        assert!(tracker.moved(Point::new(70.0, 100.0)));
        assert_eq!(tracker.end(Point::new(98.0, 100.0)), Gesture::None);
        assert!(!tracker.is_horizontal());
    }

    #[test]
    fn test_tap_zones_split_in_thirds() {
        assert_eq!(TapZone::classify(10.0, 300.0), TapZone::Previous);
        assert_eq!(TapZone::classify(150.0, 300.0), TapZone::Inert);
        assert_eq!(TapZone::classify(250.0, 300.0), TapZone::Next);
        assert_eq!(TapZone::classify(150.0, 300.0).intent(), None);
        assert_eq!(
            TapZone::classify(299.0, 300.0).intent(),
            Some(NavIntent::Next)
        );
    }
}
