//! Public protocol structs for WebSocket and HTTP endpoints (serde ready).
//! Keep this small and stable to evolve backend and frontend independently.

use serde::{Deserialize, Serialize};

use crate::domain::Question;
use crate::leaderboard::LeaderboardEntry;
use crate::modes::ModeId;
use crate::session::{Game, SessionState};

/// Messages the client can send over WebSocket.
#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientWsMessage {
    Ping,
    /// Open (or replace) the connection's game session.
    Start {
        #[serde(default)]
        mode: Option<String>,
    },
    NextQuestion,
    SubmitAnswer {
        answer: String,
    },
    SubmitFraction {
        numerator: i64,
        denominator: i64,
    },
    Reset {
        #[serde(default)]
        mode: Option<String>,
    },
    ResetScore,
    GetScore,
}

/// Messages the server sends back over WebSocket.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerWsMessage {
    Pong,
    Session {
        #[serde(flatten)]
        session: SessionOut,
    },
    Question {
        question: Question,
    },
    AnswerResult {
        correct: bool,
        score: u32,
    },
    Score {
        score: u32,
    },
    Error {
        message: String,
    },
}

/// Snapshot of a session for the UI header.
#[derive(Debug, Serialize)]
pub struct SessionOut {
    pub mode: ModeId,
    pub name: String,
    pub description: String,
    pub score: u32,
    pub state: SessionState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub question: Option<Question>,
}

pub fn session_out(game: &Game) -> SessionOut {
    SessionOut {
        mode: game.mode_id(),
        name: game.game_mode_name().to_string(),
        description: game.game_mode_description().to_string(),
        score: game.score(),
        state: game.state(),
        question: game.current_question().cloned(),
    }
}

//
// HTTP request/response DTOs
//

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    #[serde(rename = "gameMode")]
    pub game_mode: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreIn {
    pub player_name: String,
    /// Signed so a negative value is reported as an invalid entry.
    pub score: i64,
    #[serde(default)]
    pub game_mode: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Serialize)]
pub struct LeaderboardOut {
    pub entries: Vec<LeaderboardEntry>,
}

#[derive(Serialize)]
pub struct ErrorOut {
    pub error: String,
}

#[derive(Serialize)]
pub struct HealthOut {
    pub ok: bool,
}
