//! Core behaviors shared by both HTTP and WebSocket handlers.
//!
//! This includes:
//!   - Driving a connection's game session from client messages
//!   - Submitting scores and reading the leaderboard

use tracing::{info, instrument, warn};

use crate::domain::UserAnswer;
use crate::error::LeaderboardError;
use crate::leaderboard::{now_iso8601, LeaderboardEntry, SubmitOutcome};
use crate::protocol::{session_out, ClientWsMessage, ScoreIn, ServerWsMessage};
use crate::session::Game;
use crate::state::AppState;

const NO_SESSION: &str = "No active session: send a start message first.";

/// Apply one client message to the connection-owned session slot.
/// `start` replaces the session; everything else requires one.
#[instrument(level = "debug", skip_all)]
pub fn handle_session_message(state: &AppState, session: &mut Option<Game>, msg: ClientWsMessage) -> ServerWsMessage {
  match msg {
    ClientWsMessage::Ping => ServerWsMessage::Pong,

    ClientWsMessage::Start { mode } => match state.new_game(mode.as_deref()) {
      Ok(game) => {
        let out = session_out(&game);
        *session = Some(game);
        ServerWsMessage::Session { session: out }
      }
      Err(e) => {
        warn!(target: "quiz", error = %e, "Session start rejected");
        ServerWsMessage::Error { message: e.to_string() }
      }
    },

    ClientWsMessage::NextQuestion => with_game(session, |game| ServerWsMessage::Question {
      question: game.generate_question().clone(),
    }),

    ClientWsMessage::SubmitAnswer { answer } => with_game(session, |game| grade(game, UserAnswer::Text(answer))),

    ClientWsMessage::SubmitFraction { numerator, denominator } => {
      with_game(session, |game| grade(game, UserAnswer::Fraction { numerator, denominator }))
    }

    ClientWsMessage::Reset { mode } => with_game(session, |game| match game.reset(mode.as_deref()) {
      Ok(()) => ServerWsMessage::Session { session: session_out(game) },
      Err(e) => {
        warn!(target: "quiz", error = %e, "Session reset rejected; previous mode kept");
        ServerWsMessage::Error { message: e.to_string() }
      }
    }),

    ClientWsMessage::ResetScore => with_game(session, |game| {
      game.reset_score();
      ServerWsMessage::Score { score: game.score() }
    }),

    ClientWsMessage::GetScore => with_game(session, |game| ServerWsMessage::Score { score: game.score() }),
  }
}

fn with_game(session: &mut Option<Game>, f: impl FnOnce(&mut Game) -> ServerWsMessage) -> ServerWsMessage {
  match session.as_mut() {
    Some(game) => f(game),
    None => ServerWsMessage::Error { message: NO_SESSION.into() },
  }
}

fn grade(game: &mut Game, answer: UserAnswer) -> ServerWsMessage {
  let correct = game.check_answer(answer);
  info!(target: "quiz", mode = %game.mode_id(), correct, score = game.score(), "Answer evaluated");
  ServerWsMessage::AnswerResult { correct, score: game.score() }
}

/// Build the entry (date defaults to now) and hand it to the leaderboard.
#[instrument(level = "info", skip(state, input), fields(player = %input.player_name, score = input.score))]
pub async fn submit_score(state: &AppState, input: ScoreIn) -> SubmitOutcome {
  let Ok(score) = u32::try_from(input.score) else {
    let e = LeaderboardError::InvalidEntry(format!("score {} is not a non-negative integer", input.score));
    warn!(target: "leaderboard", error = %e, "Score submission rejected");
    return SubmitOutcome::rejected(&e);
  };
  let entry = LeaderboardEntry {
    player_name: input.player_name,
    score,
    game_mode: input.game_mode.unwrap_or_default(),
    date: input.date.filter(|d| !d.is_empty()).unwrap_or_else(now_iso8601),
  };
  state.leaderboard.submit(entry).await
}

#[instrument(level = "info", skip(state))]
pub async fn fetch_leaderboard(state: &AppState, game_mode: Option<&str>) -> Result<Vec<LeaderboardEntry>, LeaderboardError> {
  state.leaderboard.top(game_mode).await
}
