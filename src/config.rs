//! Game configuration
//!
//! Defaults reproduce the classic 800×800 layout. A TOML file can override any
//! field, and a handful of fields can be overridden again from the command line.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

pub const FIELD_WIDTH: f32 = 800.0;
pub const FIELD_HEIGHT: f32 = 800.0;
pub const BALL_SIZE: f32 = 15.0;
pub const BALL_SPEED: f32 = 5.0;
pub const PADDLE_LENGTH: f32 = 100.0;
pub const PADDLE_THICKNESS: f32 = 15.0;
pub const PADDLE_SPEED: f32 = 8.0;
pub const PADDLE_MARGIN: f32 = 10.0;
pub const LIVES_PER_PLAYER: u32 = 3;
pub const TICK_RATE_MS: u64 = 16; // ~60 FPS
pub const KEY_HOLD_TICKS: u32 = 12;
// Past the usual 250-660 ms terminal auto-repeat delay
pub const KEY_REARM_TICKS: u32 = 40;

const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid config value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub ball_size: f32,
    pub ball_speed: f32,
    /// Long side of every paddle
    pub paddle_length: f32,
    /// Short side of every paddle
    pub paddle_thickness: f32,
    pub paddle_speed: f32,
    /// Gap between a paddle and the edge it guards
    pub paddle_margin: f32,
    pub lives_per_player: u32,
    pub tick_rate_ms: u64,
    /// How long a key counts as held after its last press/repeat, for
    /// terminals that never report key releases
    pub key_hold_ticks: u32,
    /// Silence needed, in ticks, before another press of the same key counts
    /// as a new key-down on terminals without release reporting
    pub key_rearm_ticks: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,
            ball_size: BALL_SIZE,
            ball_speed: BALL_SPEED,
            paddle_length: PADDLE_LENGTH,
            paddle_thickness: PADDLE_THICKNESS,
            paddle_speed: PADDLE_SPEED,
            paddle_margin: PADDLE_MARGIN,
            lives_per_player: LIVES_PER_PLAYER,
            tick_rate_ms: TICK_RATE_MS,
            key_hold_ticks: KEY_HOLD_TICKS,
            key_rearm_ticks: KEY_REARM_TICKS,
        }
    }
}

impl Config {
    /// Default location: `<config_dir>/quadpong/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("quadpong").join(CONFIG_FILE))
    }

    /// Load from an explicit path. The file must exist.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config: Config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` if given, otherwise from the default location if a
    /// file exists there, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = path {
            return Self::from_file(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive number, got {}", value),
                })
            }
        }

        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("ball_size", self.ball_size)?;
        positive("ball_speed", self.ball_speed)?;
        positive("paddle_length", self.paddle_length)?;
        positive("paddle_thickness", self.paddle_thickness)?;
        positive("paddle_speed", self.paddle_speed)?;

        if !(self.paddle_margin.is_finite() && self.paddle_margin >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "paddle_margin",
                reason: format!("must not be negative, got {}", self.paddle_margin),
            });
        }
        let shortest_side = self.field_width.min(self.field_height);
        if self.ball_size >= shortest_side {
            return Err(ConfigError::Invalid {
                field: "ball_size",
                reason: format!("{} does not fit a {} unit field", self.ball_size, shortest_side),
            });
        }
        if self.paddle_length > shortest_side {
            return Err(ConfigError::Invalid {
                field: "paddle_length",
                reason: format!("{} does not fit a {} unit field", self.paddle_length, shortest_side),
            });
        }
        if self.paddle_margin + self.paddle_thickness > shortest_side / 2.0 {
            return Err(ConfigError::Invalid {
                field: "paddle_margin",
                reason: "paddles would overlap the field center".to_string(),
            });
        }
        if self.lives_per_player == 0 {
            return Err(ConfigError::Invalid {
                field: "lives_per_player",
                reason: "must be at least 1".to_string(),
            });
        }
        if self.key_rearm_ticks < self.key_hold_ticks {
            return Err(ConfigError::Invalid {
                field: "key_rearm_ticks",
                reason: format!("must be at least key_hold_ticks ({})", self.key_hold_ticks),
            });
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_rate_ms",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
