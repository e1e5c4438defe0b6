use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

use crate::game::TickOutcome;

const POPUP_WIDTH: u16 = 34;
const POPUP_HEIGHT: u16 = 8;

/// Draws the game-over popup centered in `area`.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, score: u32, outcome: TickOutcome) {
    let popup = centered_popup(area, POPUP_WIDTH, POPUP_HEIGHT);
    frame.render_widget(Clear, popup);

    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(""),
        Line::from(format!("Score: {score}")),
        Line::from(cause_text(outcome)),
        Line::from(""),
        Line::from("[Enter] Play again  [Q] Quit")
            .style(Style::default().fg(Color::DarkGray)),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(" game over ")),
        popup,
    );
}

fn cause_text(outcome: TickOutcome) -> &'static str {
    match outcome {
        TickOutcome::WallCollision => "Cause: hit the wall",
        TickOutcome::SelfCollision => "Cause: hit yourself",
        TickOutcome::ArenaFilled => "The arena is full!",
        TickOutcome::Continuing | TickOutcome::Ate => "",
    }
}

/// Returns a `width` x `height` rect centered in `area`, shrunk to fit.
fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);

    center
}

#[cfg(test)]
mod tests {
    use ratatui::layout::Rect;

    use crate::game::TickOutcome;

    use super::{cause_text, centered_popup};

    #[test]
    fn popup_is_centered() {
        let popup = centered_popup(Rect::new(0, 0, 60, 20), 34, 8);

        assert_eq!(popup, Rect::new(13, 6, 34, 8));
    }

    #[test]
    fn popup_shrinks_to_a_small_area() {
        let popup = centered_popup(Rect::new(0, 0, 20, 5), 34, 8);

        assert_eq!(popup.width, 20);
        assert_eq!(popup.height, 5);
    }

    #[test]
    fn every_terminal_outcome_has_a_cause() {
        for outcome in [
            TickOutcome::WallCollision,
            TickOutcome::SelfCollision,
            TickOutcome::ArenaFilled,
        ] {
            assert!(!cause_text(outcome).is_empty());
        }
    }
}
