//! Pure view/render functions for the TUI.
//!
//! Functions here take `&AppState`, draw to a ratatui `Frame`, and never
//! mutate state or return effects.

use std::time::Duration;

use folio_core::navigator::{Direction, NavButton};
use folio_core::particles::{ParticleField, Rgb};
use ratatui::Frame;
use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Borders, Clear, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::state::AppState;

const BACKGROUND: Color = Color::Rgb(0x2d, 0x22, 0x3a);
const PAPER: Color = Color::Rgb(0xfb, 0xf6, 0xee);
const PAPER_TURNING: Color = Color::Rgb(0xf1, 0xe9, 0xdc);
const INK: Color = Color::Rgb(0x4a, 0x3b, 0x5c);
const ACCENT: Color = Color::Rgb(0x9c, 0x7c, 0xb5);
const MUTED: Color = Color::Rgb(0x8a, 0x7f, 0x96);

const INSTRUCTION: &str = "Click the page edges, swipe, or use ← → to turn pages";
const SWIPE_HINT: &str = "⟵  Swipe to turn pages  ⟶";

/// Renders the entire card to the frame.
pub fn render(app: &AppState, frame: &mut Frame) {
    let area = frame.area();
    frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

    if let Some(field) = &app.particles {
        render_particles(field, app.ambient.elapsed(), area, frame.buffer_mut());
    }

    if !app.book_visible() {
        return;
    }

    render_book(app, frame);
    render_nav_bar(app, frame);
    render_instruction(app, frame);

    if app.swipe_hint.is_visible(app.now) {
        render_swipe_hint(app, frame);
    }
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

fn render_particles(field: &ParticleField, elapsed: Duration, area: Rect, buf: &mut Buffer) {
    if area.is_empty() {
        return;
    }
    for particle in field.particles() {
        let pos = particle.position(elapsed);
        if !(0.0..100.0).contains(&pos.y) || pos.opacity <= 0.05 {
            continue;
        }
        let col = area.x + (pos.x / 100.0 * f32::from(area.width - 1)).round() as u16;
        let row = area.y + (pos.y / 100.0 * f32::from(area.height)) as u16;
        let glyph = match particle.size {
            s if s >= 9.0 => '●',
            s if s >= 6.0 => '•',
            _ => '·',
        };
        let mut style = Style::default().fg(rgb(particle.color)).bg(BACKGROUND);
        if pos.opacity < 0.4 {
            style = style.add_modifier(Modifier::DIM);
        }
        if let Some(cell) = buf.cell_mut((col, row)) {
            cell.set_char(glyph).set_style(style);
        }
    }
}

fn book_style(app: &AppState) -> Style {
    let style = Style::default().fg(INK).bg(PAPER);
    if app.entrance.progress(app.now) < 0.5 {
        style.add_modifier(Modifier::DIM)
    } else {
        style
    }
}

fn render_book(app: &AppState, frame: &mut Frame) {
    let layout = &app.layout;
    let style = book_style(app);

    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(ACCENT).bg(PAPER))
        .title(Line::from(format!(" {} ", app.card.title)).centered())
        .style(style);
    if let Some(recipient) = &app.card.recipient {
        block = block.title_bottom(Line::from(format!(" for {recipient} ")).right_aligned());
    }
    frame.render_widget(block, layout.frame);

    let book = layout.book;
    match app.navigator.flip_progress(app.now) {
        Some((transition, progress)) => match transition.direction {
            // The turning page folds toward the spine, uncovering the
            // destination underneath.
            Direction::Forward => {
                render_page(app, transition.to, book, style, frame);
                let width = (f32::from(book.width) * (1.0 - progress)).round() as u16;
                render_turning_page(app, transition.from, Rect { width, ..book }, frame);
            }
            // The previous page unfolds from the spine over the current one.
            Direction::Backward => {
                render_page(app, transition.from, book, style, frame);
                let width = (f32::from(book.width) * progress).round() as u16;
                render_turning_page(app, transition.to, Rect { width, ..book }, frame);
            }
        },
        None => render_page(app, app.navigator.current_index(), book, style, frame),
    }
}

fn render_turning_page(app: &AppState, index: usize, area: Rect, frame: &mut Frame) {
    if area.width < 2 {
        return;
    }
    frame.render_widget(Clear, area);
    let style = book_style(app).bg(PAPER_TURNING);
    let edge = Block::default()
        .borders(Borders::RIGHT)
        .border_style(Style::default().fg(MUTED).bg(PAPER_TURNING))
        .style(style);
    let inner = edge.inner(area);
    frame.render_widget(edge, area);
    render_page(app, index, inner, style, frame);
}

fn render_page(app: &AppState, index: usize, area: Rect, style: Style, frame: &mut Frame) {
    let Some(page) = app.card.page(index) else {
        return;
    };
    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled(
            page.heading.clone(),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .centered(),
        Line::default(),
    ];
    lines.extend(
        app.page_cache
            .lines(index)
            .iter()
            .map(|line| Line::from(format!(" {line}"))),
    );
    if let Some(footer) = &page.footer {
        lines.push(Line::default());
        lines.push(
            Line::from(Span::styled(
                footer.clone(),
                Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
            ))
            .right_aligned(),
        );
    }

    let inner = Rect {
        x: area.x.saturating_add(1),
        width: area.width.saturating_sub(2),
        ..area
    };
    frame.render_widget(Block::default().style(style), area);
    frame.render_widget(Paragraph::new(lines).style(style), inner);
}

fn button_line(button: &NavButton, arrow: &str, arrow_first: bool) -> Line<'static> {
    let text = if arrow_first {
        format!("{arrow} {}", button.label)
    } else {
        format!("{} {arrow}", button.label)
    };
    let style = if button.enabled {
        Style::default().fg(PAPER).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(MUTED).add_modifier(Modifier::DIM)
    };
    Line::from(Span::styled(text, style))
}

fn render_nav_bar(app: &AppState, frame: &mut Frame) {
    let layout = &app.layout;
    let display = app.navigator.display();

    frame.render_widget(
        Paragraph::new(button_line(&display.previous, "◀", true)).alignment(Alignment::Left),
        layout.prev_button,
    );
    frame.render_widget(
        Paragraph::new(format!("{} / {}", display.current_page, display.total_pages))
            .style(Style::default().fg(PAPER))
            .alignment(Alignment::Center),
        layout.indicator,
    );
    frame.render_widget(
        Paragraph::new(button_line(&display.next, "▶", false)).alignment(Alignment::Right),
        layout.next_button,
    );
}

fn render_instruction(app: &AppState, frame: &mut Frame) {
    let area = app.layout.hint;
    if area.height == 0 {
        return;
    }
    let opacity = app.instruction.opacity(app.now);
    let mut style = Style::default().fg(MUTED).add_modifier(Modifier::ITALIC);
    if opacity < 0.5 {
        style = style.add_modifier(Modifier::DIM);
    }
    if opacity > 0.0 {
        frame.render_widget(
            Paragraph::new(INSTRUCTION)
                .style(style)
                .alignment(Alignment::Center),
            area,
        );
    }
}

fn render_swipe_hint(app: &AppState, frame: &mut Frame) {
    let viewport = app.layout.viewport;
    let width = (SWIPE_HINT.width() as u16 + 4).min(viewport.width);
    let height = 3.min(viewport.height);
    let area = Rect::new(
        viewport.x + viewport.width.saturating_sub(width) / 2,
        viewport.bottom().saturating_sub(height),
        width,
        height,
    );
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(SWIPE_HINT)
            .alignment(Alignment::Center)
            .style(Style::default().fg(PAPER).bg(INK))
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .border_style(Style::default().fg(ACCENT).bg(INK)),
            ),
        area,
    );
}
