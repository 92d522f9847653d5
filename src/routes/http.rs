//! HTTP endpoint handlers. These are thin wrappers that forward to core logic.
//! Each handler is instrumented and logs parameters and basic result info.

use std::sync::Arc;

use axum::{
  extract::{rejection::JsonRejection, Query, State},
  http::StatusCode,
  response::IntoResponse,
  Json,
};
use tracing::{error, info, instrument, warn};

use crate::leaderboard::SubmitOutcome;
use crate::logic::{fetch_leaderboard, submit_score};
use crate::modes::mode_catalog;
use crate::protocol::*;
use crate::state::AppState;

#[instrument(level = "info")]
pub async fn http_health() -> impl IntoResponse { Json(HealthOut { ok: true }) }

#[instrument(level = "info")]
pub async fn http_get_modes() -> impl IntoResponse { Json(mode_catalog()) }

#[instrument(level = "info", skip(state))]
pub async fn http_get_leaderboard(
  State(state): State<Arc<AppState>>,
  Query(q): Query<LeaderboardQuery>,
) -> impl IntoResponse {
  match fetch_leaderboard(&state, q.game_mode.as_deref()).await {
    Ok(entries) => {
      info!(target: "leaderboard", game_mode = ?q.game_mode, count = entries.len(), "HTTP leaderboard served");
      (StatusCode::OK, Json(LeaderboardOut { entries })).into_response()
    }
    Err(e) => {
      error!(target: "leaderboard", game_mode = ?q.game_mode, error = %e, "Error fetching leaderboard");
      (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorOut { error: "Failed to fetch leaderboard".into() })).into_response()
    }
  }
}

#[instrument(level = "info", skip_all)]
pub async fn http_post_score(
  State(state): State<Arc<AppState>>,
  body: Result<Json<ScoreIn>, JsonRejection>,
) -> impl IntoResponse {
  let body = match body {
    Ok(Json(body)) => body,
    Err(rejection) => {
      warn!(target: "leaderboard", error = %rejection.body_text(), "Malformed score submission");
      return Json(SubmitOutcome::failed("Invalid input"));
    }
  };
  let outcome = submit_score(&state, body).await;
  info!(target: "leaderboard", success = outcome.success, rank = ?outcome.rank, "HTTP score submission handled");
  Json(outcome)
}
