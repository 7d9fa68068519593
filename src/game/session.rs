use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::game::ball::Ball;
use crate::game::paddle::Paddle;
use crate::game::{Player, Side};
use crate::input::{Command, InputFrame, Steer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Playing,
    GameOver,
}

/// Screen change produced by a command or by the end of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Started,
    Cancelled,
    Finished { winner: Player },
    BackToMenu,
}

/// One match of four-way pong and everything it owns.
pub struct Session {
    config: Config,
    top: Paddle,
    bottom: Paddle,
    left: Paddle,
    right: Paddle,
    ball: Ball,
    player1_lives: u32,
    player2_lives: u32,
    winner: Option<Player>,
    screen: Screen,
    rng: StdRng,
}

impl Session {
    /// `seed` pins the launch angles; `None` seeds from the OS.
    pub fn new(config: Config, seed: Option<u64>) -> Self {
        let mut rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let ball = Ball::new(&config, &mut rng);
        Self {
            top: Paddle::for_side(Side::Top, &config),
            bottom: Paddle::for_side(Side::Bottom, &config),
            left: Paddle::for_side(Side::Left, &config),
            right: Paddle::for_side(Side::Right, &config),
            ball,
            player1_lives: config.lives_per_player,
            player2_lives: config.lives_per_player,
            winner: None,
            screen: Screen::Menu,
            rng,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn winner(&self) -> Option<Player> {
        self.winner
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn lives(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player1_lives,
            Player::Two => self.player2_lives,
        }
    }

    pub fn paddle(&self, side: Side) -> &Paddle {
        match side {
            Side::Top => &self.top,
            Side::Bottom => &self.bottom,
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    fn paddle_mut(&mut self, side: Side) -> &mut Paddle {
        match side {
            Side::Top => &mut self.top,
            Side::Bottom => &mut self.bottom,
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    /// Run one frame: commands first, in the order they were pressed, then
    /// the simulation step with whatever is held.
    pub fn tick(&mut self, frame: &InputFrame) -> Vec<Transition> {
        let mut transitions: Vec<Transition> = frame
            .commands
            .iter()
            .filter_map(|&command| self.handle_command(command))
            .collect();
        transitions.extend(self.update(&frame.steering));
        transitions
    }

    /// Apply an edge-triggered command. Commands that mean nothing on the
    /// current screen are ignored.
    pub fn handle_command(&mut self, command: Command) -> Option<Transition> {
        let transition = match (self.screen, command) {
            (Screen::Menu, Command::Start) => {
                self.start();
                Transition::Started
            }
            (Screen::Playing, Command::Cancel) => {
                self.screen = Screen::Menu;
                Transition::Cancelled
            }
            (Screen::GameOver, Command::Acknowledge) => {
                self.screen = Screen::Menu;
                Transition::BackToMenu
            }
            _ => return None,
        };
        tracing::info!(?transition, screen = ?self.screen, "Screen changed");
        Some(transition)
    }

    fn start(&mut self) {
        self.player1_lives = self.config.lives_per_player;
        self.player2_lives = self.config.lives_per_player;
        self.winner = None;
        self.ball.reset(&mut self.rng);
        self.screen = Screen::Playing;
        tracing::debug!(vx = self.ball.vx, vy = self.ball.vy, speed = self.ball.speed(), "Ball launched");
    }

    /// Advance the rally by one tick. Does nothing outside of play.
    pub fn update(&mut self, steering: &[(Side, Steer)]) -> Option<Transition> {
        if self.screen != Screen::Playing {
            return None;
        }

        for &(side, steer) in steering {
            let paddle = self.paddle_mut(side);
            match steer {
                Steer::Negative => paddle.move_negative(),
                Steer::Positive => paddle.move_positive(),
            }
        }

        self.ball.integrate();
        self.ball
            .resolve_paddle_collisions(&self.top, &self.bottom, &self.left, &self.right);

        if !self.ball.is_out_of_bounds() {
            return None;
        }
        self.score_against(self.ball.exit_side())
    }

    fn score_against(&mut self, loser: Player) -> Option<Transition> {
        let lives = match loser {
            Player::One => &mut self.player1_lives,
            Player::Two => &mut self.player2_lives,
        };
        *lives = lives.saturating_sub(1);
        let remaining = *lives;
        tracing::debug!(%loser, remaining, "Ball left the field");

        if remaining == 0 {
            let winner = loser.opponent();
            self.winner = Some(winner);
            self.screen = Screen::GameOver;
            tracing::info!(%winner, "Match finished");
            Some(Transition::Finished { winner })
        } else {
            self.ball.reset(&mut self.rng);
            None
        }
    }
}
