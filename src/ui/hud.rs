use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::game::Snapshot;

const SEPARATOR: &str = " │ ";

/// Renders the one-line status bar above the arena.
pub fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let line = info_line(
        snapshot.score,
        snapshot.snake.len(),
        snapshot.grid.width,
        snapshot.grid.height,
        usize::from(area.width),
    );

    frame.render_widget(
        Paragraph::new(line)
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray)),
        area,
    );
}

fn info_line(
    score: u32,
    length: usize,
    width: u16,
    height: u16,
    available_width: usize,
) -> Line<'static> {
    let compact = info_width(score, length, width, height, false) > available_width;
    let score_label = if compact { "S" } else { "Score" };
    let length_label = if compact { "L" } else { "Length" };

    Line::from(vec![
        Span::raw(format!("{score_label}: ")),
        Span::styled(
            score.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(SEPARATOR),
        Span::raw(format!("{length_label}: ")),
        Span::styled(length.to_string(), Style::default().fg(Color::White)),
        Span::raw(SEPARATOR),
        Span::raw(format!("{width}x{height}")),
    ])
}

fn info_width(score: u32, length: usize, width: u16, height: u16, compact: bool) -> usize {
    let score_label = if compact { "S" } else { "Score" };
    let length_label = if compact { "L" } else { "Length" };

    format!("{score_label}: {score}").width()
        + SEPARATOR.width() * 2
        + format!("{length_label}: {length}").width()
        + format!("{width}x{height}").width()
}
