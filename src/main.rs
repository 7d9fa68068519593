//! quadpong - four-paddle, two-player Pong in the terminal

mod app;
mod config;
mod event;
mod game;
mod input;
mod terminal;
mod ui;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use app::App;
use config::Config;
use event::{Event, EventHandler};
use game::session::Session;
use input::{Bindings, InputState};
use terminal::Tui;

#[derive(Parser)]
#[command(name = "quadpong")]
#[command(about = "Four-paddle Pong for two players", long_about = None)]
struct Cli {
    /// Config file (defaults to <config dir>/quadpong/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for ball launch angles
    #[arg(long)]
    seed: Option<u64>,

    /// Lives per player, overriding the config file
    #[arg(long)]
    lives: Option<u32>,
}

/// Log to a file; stdout/stderr belong to the TUI.
fn init_logging() {
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("quadpong");
    std::fs::create_dir_all(&log_dir).ok();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_ansi(false);

    match std::fs::File::create(log_dir.join("quadpong.log")) {
        Ok(file) => subscriber.with_writer(std::sync::Mutex::new(file)).init(),
        Err(_) => subscriber.with_writer(std::io::sink).init(),
    }
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(lives) = cli.lives {
        config.lives_per_player = lives;
        config.validate().context("invalid --lives")?;
    }
    tracing::info!(?config, seed = ?cli.seed, "Starting quadpong");

    let mut tui = Tui::enter().context("failed to initialize terminal")?;
    let input = InputState::new(
        Bindings::default(),
        tui.reports_key_release(),
        config.key_hold_ticks,
        config.key_rearm_ticks,
    );
    let event_handler = EventHandler::new(config.tick_rate_ms);
    let mut app = App::new(Session::new(config, cli.seed), input);

    // Main loop
    loop {
        tui.draw(&app.session)?;

        match event_handler.next()? {
            Event::Tick => app.on_tick(),
            Event::Key(key) => app.on_key(key),
        }

        if app.should_quit {
            break;
        }
    }

    tui.exit().context("failed to restore terminal")?;
    tracing::info!("Exiting");
    Ok(())
}
