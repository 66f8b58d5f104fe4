//! Screen layout shared by the renderer and the pointer hit-testing in the
//! reducer, so both agree on where the book and buttons are.

use folio_core::gesture::Point;
use ratatui::layout::{Position, Rect};

/// Approximate pixel size of one terminal cell, used to express pointer
/// positions in the same units as the swipe thresholds.
pub const CELL_WIDTH_PX: f32 = 8.0;
pub const CELL_HEIGHT_PX: f32 = 16.0;

/// Largest book the layout will draw (including border).
const MAX_BOOK_WIDTH: u16 = 64;
const MAX_BOOK_HEIGHT: u16 = 22;

/// Rows below the book: navigation bar and instruction hint.
const NAV_HEIGHT: u16 = 1;
const HINT_HEIGHT: u16 = 1;

/// Rows the book drops by before the entrance animation starts.
pub const ENTRANCE_DROP: u16 = 2;

pub const BUTTON_WIDTH: u16 = 18;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookLayout {
    pub viewport: Rect,
    /// Book including its border.
    pub frame: Rect,
    /// Page surface inside the border; pointer gestures land here.
    pub book: Rect,
    pub prev_button: Rect,
    pub indicator: Rect,
    pub next_button: Rect,
    /// Instruction row; zero height once the hint is gone.
    pub hint: Rect,
}

impl BookLayout {
    pub fn compute(viewport: Rect, drop: u16, show_hint: bool) -> Self {
        let hint_height = if show_hint { HINT_HEIGHT } else { 0 };
        let width = viewport.width.saturating_sub(4).min(MAX_BOOK_WIDTH);
        let height = viewport
            .height
            .saturating_sub(NAV_HEIGHT + hint_height + 2)
            .min(MAX_BOOK_HEIGHT);

        let total_height = height + NAV_HEIGHT + hint_height;
        let x = viewport.x + (viewport.width.saturating_sub(width)) / 2;
        let top = viewport.y + (viewport.height.saturating_sub(total_height)) / 2;
        let y = (top + drop).min(viewport.bottom().saturating_sub(total_height));

        let frame = Rect::new(x, y, width, height);
        let book = Rect::new(
            x.saturating_add(1),
            y.saturating_add(1),
            width.saturating_sub(2),
            height.saturating_sub(2),
        );

        let nav_y = frame.bottom();
        let button_width = BUTTON_WIDTH.min(width / 3);
        let prev_button = Rect::new(x, nav_y, button_width, NAV_HEIGHT);
        let next_button = Rect::new(
            frame.right().saturating_sub(button_width),
            nav_y,
            button_width,
            NAV_HEIGHT,
        );
        let indicator = Rect::new(
            prev_button.right(),
            nav_y,
            next_button.x.saturating_sub(prev_button.right()),
            NAV_HEIGHT,
        );
        let hint = Rect::new(x, nav_y + NAV_HEIGHT, width, hint_height);

        Self {
            viewport,
            frame,
            book,
            prev_button,
            indicator,
            next_button,
            hint,
        }
    }

    pub fn in_book(&self, column: u16, row: u16) -> bool {
        self.book.contains(Position::new(column, row))
    }

    /// Viewport width expressed in pixels.
    pub fn viewport_width_px(&self) -> u32 {
        (f32::from(self.viewport.width) * CELL_WIDTH_PX) as u32
    }
}

/// Center of a terminal cell in pixel units.
pub fn cell_to_point(column: u16, row: u16) -> Point {
    Point::new(
        (f32::from(column) + 0.5) * CELL_WIDTH_PX,
        (f32::from(row) + 0.5) * CELL_HEIGHT_PX,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_is_centered_and_stacked() {
        let layout = BookLayout::compute(Rect::new(0, 0, 100, 40), 0, true);
        assert_eq!(layout.frame.width, 64);
        assert_eq!(layout.frame.height, 22);
        assert_eq!(layout.frame.x, 18);
        assert_eq!(layout.prev_button.y, layout.frame.bottom());
        assert_eq!(layout.hint.y, layout.prev_button.y + 1);
        assert_eq!(layout.next_button.right(), layout.frame.right());
        assert!(layout.in_book(50, layout.book.y));
        assert!(!layout.in_book(layout.prev_button.x, layout.prev_button.y));
    }

    #[test]
    fn test_hidden_hint_takes_no_space() {
        let layout = BookLayout::compute(Rect::new(0, 0, 100, 40), 0, false);
        assert_eq!(layout.hint.height, 0);
    }

    #[test]
    fn test_drop_moves_book_down() {
        let settled = BookLayout::compute(Rect::new(0, 0, 100, 40), 0, true);
        let dropped = BookLayout::compute(Rect::new(0, 0, 100, 40), ENTRANCE_DROP, true);
        assert_eq!(dropped.frame.y, settled.frame.y + ENTRANCE_DROP);
    }

    #[test]
    fn test_tiny_viewport_does_not_underflow() {
        let layout = BookLayout::compute(Rect::new(0, 0, 3, 2), 2, true);
        assert_eq!(layout.book.width, 0);
    }
}
