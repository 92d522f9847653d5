//! Loading quiz configuration (default mode, RNG seed, leaderboard settings) from TOML.
//!
//! See `QuizConfig` for the expected schema:
//!
//! ```toml
//! [game]
//! default_mode = "fractions"
//! seed = 42
//!
//! [leaderboard]
//! key = "leaderboard"
//! top_n = 10
//! ```

use serde::Deserialize;
use tracing::{error, info};

#[derive(Clone, Debug, Deserialize, Default, PartialEq)]
pub struct QuizConfig {
  #[serde(default)]
  pub game: GameCfg,
  #[serde(default)]
  pub leaderboard: LeaderboardCfg,
}

/// Session defaults applied when a client does not pick its own.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct GameCfg {
  /// Resolved through the mode factory like any client-supplied identifier.
  #[serde(default = "default_mode")]
  pub default_mode: String,
  /// Fixed RNG seed for reproducible sessions.
  #[serde(default)]
  pub seed: Option<u64>,
}

impl Default for GameCfg {
  fn default() -> Self {
    Self { default_mode: default_mode(), seed: None }
  }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct LeaderboardCfg {
  #[serde(default = "default_key")]
  pub key: String,
  #[serde(default = "default_top_n")]
  pub top_n: usize,
}

impl Default for LeaderboardCfg {
  fn default() -> Self {
    Self { key: default_key(), top_n: default_top_n() }
  }
}

fn default_mode() -> String { "basic".into() }
fn default_key() -> String { "leaderboard".into() }
fn default_top_n() -> usize { 10 }

/// Load `QuizConfig` from QUIZ_CONFIG_PATH. Missing variable or any IO/parse error yields defaults.
pub fn load_quiz_config_from_env() -> QuizConfig {
  let Ok(path) = std::env::var("QUIZ_CONFIG_PATH") else {
    return QuizConfig::default();
  };
  match std::fs::read_to_string(&path) {
    Ok(s) => match parse_config(&s) {
      Ok(cfg) => {
        info!(target: "mathquiz_backend", %path, default_mode = %cfg.game.default_mode, top_n = cfg.leaderboard.top_n, "Loaded quiz config (TOML)");
        cfg
      }
      Err(e) => {
        error!(target: "mathquiz_backend", %path, error = %e, "Failed to parse TOML config; using defaults");
        QuizConfig::default()
      }
    },
    Err(e) => {
      error!(target: "mathquiz_backend", %path, error = %e, "Failed to read TOML config file; using defaults");
      QuizConfig::default()
    }
  }
}

pub fn parse_config(s: &str) -> Result<QuizConfig, toml::de::Error> {
  toml::from_str::<QuizConfig>(s)
}
