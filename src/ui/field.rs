use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::game::geometry::Bounds;
use crate::game::session::Session;
use crate::game::{Player, Side};
use crate::ui::{BACKGROUND, PLAYER_ONE_COLOR, PLAYER_TWO_COLOR};

pub fn render_field(frame: &mut Frame, area: Rect, session: &Session) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(60, 150, 200)))
        .title(" 🏓 Four-Way Pong ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Player 1 lives
            Constraint::Min(4),    // Field
            Constraint::Length(1), // Player 2 lives + help
        ])
        .split(inner);

    let p1 = Line::from(Span::styled(
        format!(" Player 1 Lives: {} ", session.lives(Player::One)),
        Style::default().fg(PLAYER_ONE_COLOR).add_modifier(Modifier::BOLD),
    ));
    frame.render_widget(Paragraph::new(p1), chunks[0]);

    let lines = field_lines(session, chunks[1].width as usize, chunks[1].height as usize);
    frame.render_widget(Paragraph::new(lines), chunks[1]);

    let p2 = Line::from(vec![
        Span::styled(" Esc Menu ", Style::default().fg(Color::DarkGray)),
        Span::styled("│ ", Style::default().fg(Color::Rgb(60, 60, 60))),
        Span::styled(
            format!("Player 2 Lives: {} ", session.lives(Player::Two)),
            Style::default().fg(PLAYER_TWO_COLOR).add_modifier(Modifier::BOLD),
        ),
    ]);
    frame.render_widget(Paragraph::new(p2).alignment(Alignment::Right), chunks[2]);
}

/// Scale the field onto a `width` × `height` character grid.
fn field_lines(session: &Session, width: usize, height: usize) -> Vec<Line<'static>> {
    let (w, h) = (width, height);
    if w == 0 || h == 0 {
        return Vec::new();
    }
    let config = session.config();
    let sx = w as f32 / config.field_width;
    let sy = h as f32 / config.field_height;

    let empty = Style::default().bg(BACKGROUND);
    let mut grid: Vec<Vec<(char, Style)>> = vec![vec![(' ', empty); w]; h];

    // Center cross-lines
    let line_style = Style::default().fg(Color::Rgb(128, 128, 128)).bg(BACKGROUND);
    let (mid_x, mid_y) = (w / 2, h / 2);
    for cell in grid[mid_y].iter_mut() {
        *cell = ('─', line_style);
    }
    for row in grid.iter_mut() {
        row[mid_x] = ('│', line_style);
    }
    grid[mid_y][mid_x] = ('┼', line_style);

    let paddle_style = Style::default().fg(Color::White).bg(BACKGROUND);
    for side in Side::ALL {
        let color = match side.owner() {
            Player::One => PLAYER_ONE_COLOR,
            Player::Two => PLAYER_TWO_COLOR,
        };
        let (x0, x1, y0, y1) = cells(&session.paddle(side).bounding_box(), sx, sy, w, h);
        for row in grid.iter_mut().take(y1).skip(y0) {
            for cell in row.iter_mut().take(x1).skip(x0) {
                *cell = ('█', paddle_style.fg(color));
            }
        }
    }

    let ball = session.ball();
    if !ball.is_out_of_bounds() {
        let (x0, _, y0, _) = cells(&ball.bounding_box(), sx, sy, w, h);
        let center = ball.bounding_box();
        let bx = (((center.x + center.width / 2.0) * sx) as usize).clamp(x0, w - 1);
        let by = (((center.y + center.height / 2.0) * sy) as usize).clamp(y0, h - 1);
        grid[by][bx] = ('●', Style::default().fg(Color::White).bg(BACKGROUND).add_modifier(Modifier::BOLD));
    }

    grid.into_iter()
        .map(|row| {
            let spans: Vec<Span<'static>> = row
                .into_iter()
                .map(|(ch, style)| Span::styled(String::from(ch), style))
                .collect();
            Line::from(spans)
        })
        .collect()
}

/// Half-open cell ranges covered by `bounds`; always at least one cell.
fn cells(bounds: &Bounds, sx: f32, sy: f32, w: usize, h: usize) -> (usize, usize, usize, usize) {
    let x0 = ((bounds.x.max(0.0) * sx) as usize).min(w - 1);
    let y0 = ((bounds.y.max(0.0) * sy) as usize).min(h - 1);
    let x1 = ((bounds.right() * sx).ceil().max(0.0) as usize).clamp(x0 + 1, w);
    let y1 = ((bounds.bottom() * sy).ceil().max(0.0) as usize).clamp(y0 + 1, h);
    (x0, x1, y0, y1)
}
