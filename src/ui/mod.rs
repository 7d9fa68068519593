pub mod field;
pub mod game_over;
pub mod menu;

use ratatui::prelude::*;

use crate::game::session::{Screen, Session};

pub const PLAYER_ONE_COLOR: Color = Color::Rgb(100, 150, 255);
pub const PLAYER_TWO_COLOR: Color = Color::Rgb(255, 100, 100);
pub const BACKGROUND: Color = Color::Rgb(10, 10, 20);

/// Draw whichever screen the session is on. Reads the session only.
pub fn render(frame: &mut Frame, session: &Session) {
    let area = frame.area();
    match session.screen() {
        Screen::Menu => menu::render_menu(frame, area, session),
        Screen::Playing => field::render_field(frame, area, session),
        Screen::GameOver => game_over::render_game_over(frame, area, session),
    }
}

/// Rect of `width` × `height` centered in `area`, shrunk to fit.
pub(crate) fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let w = width.min(area.width);
    let h = height.min(area.height);
    Rect::new(
        area.x + (area.width - w) / 2,
        area.y + (area.height - h) / 2,
        w,
        h,
    )
}

#[cfg(test)]
pub(crate) mod test_support {
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    use crate::game::session::Session;

    /// Render a session off-screen and return the buffer as text rows.
    pub fn render_rows(session: &Session, width: u16, height: u16) -> Vec<String> {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| super::render(frame, session)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .chunks(width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect())
            .collect()
    }

    pub fn contains(rows: &[String], needle: &str) -> bool {
        rows.iter().any(|row| row.contains(needle))
    }
}
