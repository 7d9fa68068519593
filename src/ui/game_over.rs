use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::session::Session;
use crate::game::Player;
use crate::ui::{centered, BACKGROUND, PLAYER_ONE_COLOR, PLAYER_TWO_COLOR};

pub fn render_game_over(frame: &mut Frame, area: Rect, session: &Session) {
    frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

    let panel = centered(area, 44, 13);
    frame.render_widget(Clear, panel);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Rgb(255, 220, 80)))
        .title(" 🏆 Final Score ")
        .title_style(Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "GAME OVER",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
    ];
    if let Some(winner) = session.winner() {
        let color = match winner {
            Player::One => PLAYER_ONE_COLOR,
            Player::Two => PLAYER_TWO_COLOR,
        };
        lines.push(Line::from(Span::styled(
            format!("{} WINS!", winner),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        format!("Player 1 Lives: {}", session.lives(Player::One)),
        Style::default().fg(PLAYER_ONE_COLOR),
    )));
    lines.push(Line::from(Span::styled(
        format!("Player 2 Lives: {}", session.lives(Player::Two)),
        Style::default().fg(PLAYER_TWO_COLOR),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("Press ", Style::default().fg(Color::Rgb(200, 200, 200))),
        Span::styled("SPACE", Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)),
        Span::styled(" to return to menu", Style::default().fg(Color::Rgb(200, 200, 200))),
    ]));

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::game::session::{Screen, Session};
    use crate::input::Command;
    use crate::ui::test_support::{contains, render_rows};

    #[test]
    fn test_final_tally_and_winner() {
        let mut session = Session::new(Config { lives_per_player: 1, ..Config::default() }, Some(9));
        session.handle_command(Command::Start);
        for _ in 0..1_000 {
            if session.screen() == Screen::GameOver {
                break;
            }
            session.update(&[]);
        }
        assert_eq!(session.screen(), Screen::GameOver);

        let rows = render_rows(&session, 80, 30);
        assert!(contains(&rows, "GAME OVER"));
        assert!(contains(&rows, " WINS!"));
        assert!(contains(&rows, "Player 1 Lives: "));
        assert!(contains(&rows, "Player 2 Lives: "));
        assert!(contains(&rows, "Press SPACE to return to menu"));
        assert!(contains(&rows, "Lives: 0"));
    }
}
