//! Application state shared by handlers: configuration and the leaderboard.
//!
//! Game sessions are not stored here. Each WebSocket connection owns its
//! own `Game`, so nothing in this struct is mutated per answer.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::config::{load_quiz_config_from_env, QuizConfig};
use crate::error::Result;
use crate::leaderboard::{InMemoryRankedStore, Leaderboard, RankedStore};
use crate::session::Game;

#[derive(Clone)]
pub struct AppState {
    pub config: QuizConfig,
    pub leaderboard: Leaderboard,
}

impl AppState {
    /// Build state from env: load config, construct the ranked store once.
    #[instrument(level = "info", skip_all)]
    pub fn new() -> Self {
        let config = load_quiz_config_from_env();
        let store: Arc<dyn RankedStore> = Arc::new(InMemoryRankedStore::new());
        info!(target: "mathquiz_backend", key = %config.leaderboard.key, top_n = config.leaderboard.top_n, "In-memory leaderboard store ready");
        Self::with_store(config, store)
    }

    pub fn with_store(config: QuizConfig, store: Arc<dyn RankedStore>) -> Self {
        let leaderboard = Leaderboard::new(store, &config.leaderboard);
        Self { config, leaderboard }
    }

    /// Start a session in `mode`, or the configured default mode.
    /// The default goes through the factory too, so a bad config value is an error.
    pub fn new_game(&self, mode: Option<&str>) -> Result<Game> {
        let mode = mode.unwrap_or(self.config.game.default_mode.as_str());
        match self.config.game.seed {
            Some(seed) => Game::with_seed(mode, seed),
            None => Game::new(mode),
        }
    }
}
