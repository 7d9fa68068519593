use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::game::session::{Screen, Session};
use crate::input::{Command, InputState};

pub struct App {
    pub should_quit: bool,
    pub session: Session,
    input: InputState,
}

impl App {
    pub fn new(session: Session, input: InputState) -> Self {
        Self {
            should_quit: false,
            session,
            input,
        }
    }

    pub fn on_tick(&mut self) {
        let mut frame = self.input.frame();

        // Q quits from the menus only, mid-rally it would be too easy to hit
        if frame.commands.contains(&Command::Quit) {
            if self.session.screen() != Screen::Playing {
                self.should_quit = true;
                return;
            }
            frame.commands.retain(|c| *c != Command::Quit);
        }

        for transition in self.session.tick(&frame) {
            tracing::debug!(?transition, "Tick produced transition");
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        // Ctrl+C always quits
        if key.code == KeyCode::Char('c')
            && key.modifiers.contains(KeyModifiers::CONTROL)
            && key.kind == KeyEventKind::Press
        {
            tracing::info!("Quit requested");
            self.should_quit = true;
            return;
        }
        self.input.on_key(key);
    }
}
