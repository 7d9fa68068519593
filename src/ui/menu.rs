use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::session::Session;
use crate::ui::{centered, BACKGROUND, PLAYER_ONE_COLOR, PLAYER_TWO_COLOR};

pub fn render_menu(frame: &mut Frame, area: Rect, session: &Session) {
    frame.render_widget(Block::default().style(Style::default().bg(BACKGROUND)), area);

    let panel = centered(area, 52, 22);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🏓 Four-Way Pong ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(BACKGROUND));
    let inner = block.inner(panel);
    frame.render_widget(block, panel);

    let label = Style::default().fg(Color::Rgb(180, 180, 200));
    let key = |text: &'static str| {
        Span::styled(text, Style::default().fg(Color::Rgb(255, 220, 80)).add_modifier(Modifier::BOLD))
    };
    let lives = session.config().lives_per_player;

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "4-WAY PONG",
            Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Player 1 Controls:",
            Style::default().fg(PLAYER_ONE_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![Span::styled("Top Paddle: ", label), key("A/D")]),
        Line::from(vec![Span::styled("Left Paddle: ", label), key("W/S")]),
        Line::from(""),
        Line::from(Span::styled(
            "Player 2 Controls:",
            Style::default().fg(PLAYER_TWO_COLOR).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![Span::styled("Bottom Paddle: ", label), key("←/→")]),
        Line::from(vec![Span::styled("Right Paddle: ", label), key("↑/↓")]),
        Line::from(""),
        Line::from(Span::styled(format!("Each player starts with {} lives", lives), label)),
        Line::from(Span::styled("Lose a life when the ball goes out", label)),
        Line::from(""),
        Line::from(vec![Span::styled("Press ", label), key("SPACE"), Span::styled(" to start", label)]),
        Line::from(vec![Span::styled("Press ", label), key("ESC"), Span::styled(" to return to menu", label)]),
        Line::from(vec![Span::styled("Press ", label), key("Q"), Span::styled(" to quit", label)]),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
