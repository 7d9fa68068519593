//! Terminal lifecycle
//!
//! Owns the ratatui terminal for the lifetime of the run loop and puts the
//! user's terminal back the way it was on exit, on drop and on panic.

use std::io::{self, Stdout};

use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{
        disable_raw_mode, enable_raw_mode, supports_keyboard_enhancement, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::game::session::Session;
use crate::ui;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    keyboard_enhanced: bool,
    active: bool,
}

impl Tui {
    pub fn enter() -> io::Result<Self> {
        install_panic_hook();

        enable_raw_mode()?;
        // No `Tui` exists yet to restore on drop, so undo by hand on failure
        let (terminal, keyboard_enhanced) = undo_on_error(Self::setup, || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        })?;
        tracing::info!(keyboard_enhanced, "Terminal initialized");

        Ok(Self { terminal, keyboard_enhanced, active: true })
    }

    fn setup() -> io::Result<(Terminal<CrosstermBackend<Stdout>>, bool)> {
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;

        // Release events need the kitty keyboard protocol
        let keyboard_enhanced = supports_keyboard_enhancement().unwrap_or(false);
        if keyboard_enhanced {
            execute!(
                stdout,
                PushKeyboardEnhancementFlags(
                    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                        | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                )
            )?;
        }

        let result = (|| -> io::Result<_> {
            let backend = CrosstermBackend::new(io::stdout());
            let mut terminal = Terminal::new(backend)?;
            terminal.hide_cursor()?;
            terminal.clear()?;
            Ok(terminal)
        })();
        if result.is_err() && keyboard_enhanced {
            let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        }
        result.map(|terminal| (terminal, keyboard_enhanced))
    }

    /// Whether the terminal reports key releases
    pub fn reports_key_release(&self) -> bool {
        self.keyboard_enhanced
    }

    pub fn draw(&mut self, session: &Session) -> io::Result<()> {
        self.terminal.draw(|frame| ui::render(frame, session))?;
        Ok(())
    }

    pub fn exit(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        if self.keyboard_enhanced {
            execute!(self.terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
        }
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        tracing::info!("Terminal restored");
        Ok(())
    }
}

impl Drop for Tui {
    fn drop(&mut self) {
        if let Err(e) = self.exit() {
            tracing::warn!("Failed to restore terminal: {}", e);
        }
    }
}

/// Run `setup`, calling `undo` before handing back any error.
fn undo_on_error<T>(
    setup: impl FnOnce() -> io::Result<T>,
    undo: impl FnOnce(),
) -> io::Result<T> {
    let result = setup();
    if let Err(e) = &result {
        tracing::warn!("Terminal setup failed, restoring: {}", e);
        undo();
    }
    result
}

/// Restore terminal state before the default panic message is printed
fn install_panic_hook() {
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = execute!(io::stdout(), PopKeyboardEnhancementFlags);
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_setup_is_undone() {
        let mut undone = false;
        let result: io::Result<()> = undo_on_error(
            || Err(io::Error::new(io::ErrorKind::Other, "no tty")),
            || undone = true,
        );
        assert!(result.is_err());
        assert!(undone);
    }

    #[test]
    fn test_successful_setup_is_kept() {
        let mut undone = false;
        let result = undo_on_error(|| Ok(7), || undone = true);
        assert_eq!(result.unwrap(), 7);
        assert!(!undone);
    }
}
