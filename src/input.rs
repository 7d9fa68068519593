//! Keyboard input
//!
//! Two separate views of the keyboard are produced each tick:
//! - the *held* set, consumed continuously for paddle steering
//! - the *pressed* list, edge-triggered commands consumed exactly once
//!
//! Terminals only report key releases when the kitty keyboard protocol is
//! active. Without it a held key is kept alive by the terminal's auto-repeat
//! and stops steering after a few ticks of silence. Command keys use a longer
//! window, past the terminal's repeat delay, before a press counts as a new
//! key-down.

use std::collections::HashMap;

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::game::Side;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Cancel,
    Acknowledge,
    Quit,
}

/// Direction along a paddle's movement axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Steer {
    /// Left or up
    Negative,
    /// Right or down
    Positive,
}

/// Everything the session needs from the keyboard for one tick.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputFrame {
    pub steering: Vec<(Side, Steer)>,
    pub commands: Vec<Command>,
}

#[derive(Debug, Clone)]
pub struct Bindings {
    steering: Vec<(KeyCode, Side, Steer)>,
    commands: Vec<(KeyCode, Command)>,
}

impl Default for Bindings {
    fn default() -> Self {
        Self {
            steering: vec![
                // Player 1
                (KeyCode::Char('a'), Side::Top, Steer::Negative),
                (KeyCode::Char('d'), Side::Top, Steer::Positive),
                (KeyCode::Char('w'), Side::Left, Steer::Negative),
                (KeyCode::Char('s'), Side::Left, Steer::Positive),
                // Player 2
                (KeyCode::Left, Side::Bottom, Steer::Negative),
                (KeyCode::Right, Side::Bottom, Steer::Positive),
                (KeyCode::Up, Side::Right, Steer::Negative),
                (KeyCode::Down, Side::Right, Steer::Positive),
            ],
            commands: vec![
                (KeyCode::Char(' '), Command::Start),
                (KeyCode::Char(' '), Command::Acknowledge),
                (KeyCode::Esc, Command::Cancel),
                (KeyCode::Char('q'), Command::Quit),
            ],
        }
    }
}

impl Bindings {
    fn steering_for(&self, code: KeyCode) -> impl Iterator<Item = (Side, Steer)> + '_ {
        self.steering
            .iter()
            .filter(move |(key, _, _)| *key == code)
            .map(|&(_, side, steer)| (side, steer))
    }

    fn commands_for(&self, code: KeyCode) -> impl Iterator<Item = Command> + '_ {
        self.commands
            .iter()
            .filter(move |(key, _)| *key == code)
            .map(|&(_, command)| command)
    }
}

pub struct InputState {
    bindings: Bindings,
    /// Held keys and the ticks left before they expire; `None` waits for a
    /// release event instead.
    held: HashMap<KeyCode, Option<u32>>,
    /// Ticks since the last press/repeat of each key; a press only counts
    /// as a key-down once a key has been quiet for `rearm_ticks`.
    quiet: HashMap<KeyCode, u32>,
    pressed: Vec<Command>,
    release_events: bool,
    hold_ticks: u32,
    rearm_ticks: u32,
}

impl InputState {
    pub fn new(bindings: Bindings, release_events: bool, hold_ticks: u32, rearm_ticks: u32) -> Self {
        Self {
            bindings,
            held: HashMap::new(),
            quiet: HashMap::new(),
            pressed: Vec::new(),
            release_events,
            hold_ticks,
            rearm_ticks,
        }
    }

    pub fn on_key(&mut self, key: KeyEvent) {
        let code = normalize(key.code);
        match key.kind {
            KeyEventKind::Press => {
                let key_down = if self.release_events {
                    !self.held.contains_key(&code)
                } else {
                    // Auto-repeat arrives as more presses, and the first one
                    // can come well after the steering hold has lapsed.
                    self.quiet.insert(code, 0).is_none()
                };
                self.hold(code);
                if key_down {
                    self.pressed.extend(self.bindings.commands_for(code));
                }
            }
            KeyEventKind::Repeat => {
                self.hold(code);
                if !self.release_events {
                    self.quiet.insert(code, 0);
                }
            }
            KeyEventKind::Release => {
                self.held.remove(&code);
            }
        }
    }

    fn hold(&mut self, code: KeyCode) {
        let expiry = if self.release_events { None } else { Some(self.hold_ticks) };
        self.held.insert(code, expiry);
    }

    /// Snapshot for this tick. Drains pressed commands and ages held keys.
    pub fn frame(&mut self) -> InputFrame {
        let mut steering: Vec<(Side, Steer)> = Vec::new();
        for code in self.held.keys() {
            for binding in self.bindings.steering_for(*code) {
                if !steering.contains(&binding) {
                    steering.push(binding);
                }
            }
        }
        // HashMap order is arbitrary; keep paddle updates deterministic
        steering.sort_by_key(|&(side, steer)| (side_rank(side), steer == Steer::Positive));

        let commands = std::mem::take(&mut self.pressed);

        self.held.retain(|_, ticks| match ticks {
            Some(0) => false,
            Some(n) => {
                *n -= 1;
                true
            }
            None => true,
        });
        let rearm_ticks = self.rearm_ticks;
        self.quiet.retain(|_, ticks| {
            *ticks += 1;
            *ticks < rearm_ticks
        });

        InputFrame { steering, commands }
    }

    #[cfg(test)]
    pub fn is_held(&self, code: KeyCode) -> bool {
        self.held.contains_key(&normalize(code))
    }
}

fn side_rank(side: Side) -> usize {
    Side::ALL.iter().position(|s| *s == side).unwrap_or(0)
}

/// Letters are matched case-insensitively so Shift or Caps Lock don't
/// change the bindings.
fn normalize(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
