//! WebSocket upgrade + message loop. Each connection owns one game session;
//! client messages are parsed as JSON and applied to it in order. Score
//! changes are pushed as `score` messages through the session's observable,
//! except those a reply already carries (`answer_result`, `score`, `session`).

use std::sync::Arc;
use axum::{
  extract::{
    ws::{Message, WebSocket},
    State, WebSocketUpgrade,
  },
  response::IntoResponse,
};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

use crate::logic::handle_session_message;
use crate::protocol::{ClientWsMessage, ServerWsMessage};
use crate::session::Game;
use crate::state::AppState;
use crate::util::trunc_for_log;

#[instrument(level = "info", skip(state))]
pub async fn ws_upgrade(ws: WebSocketUpgrade, State(state): State<Arc<AppState>>) -> impl IntoResponse {
  info!(target: "mathquiz_backend", "WebSocket upgrade requested");
  ws.on_upgrade(move |socket| handle_ws(socket, state))
}

#[instrument(level = "info", skip(socket, state), fields(conn = %Uuid::new_v4()))]
async fn handle_ws(mut socket: WebSocket, state: Arc<AppState>) {
  info!(target: "mathquiz_backend", "WebSocket connected");
  let mut session: Option<Game> = None;
  let (score_tx, mut score_rx) = mpsc::unbounded_channel::<u32>();

  loop {
    let reply = tokio::select! {
      incoming = socket.recv() => {
        let Some(Ok(msg)) = incoming else { break };
        match msg {
          Message::Text(txt) => {
            debug!(target: "mathquiz_backend", text = %trunc_for_log(&txt, 120), "WS received");
            match serde_json::from_str::<ClientWsMessage>(&txt) {
              Ok(incoming) => {
                let starting = matches!(incoming, ClientWsMessage::Start { .. });
                let reply_msg = handle_session_message(&state, &mut session, incoming);
                let echoed = discard_pending(&mut score_rx);
                if echoed > 0 {
                  debug!(target: "mathquiz_backend", echoed, "Score change carried by reply");
                }
                // A fresh session needs its score observable wired to this socket.
                if let (true, ServerWsMessage::Session { .. }, Some(game)) = (starting, &reply_msg, session.as_mut()) {
                  let tx = score_tx.clone();
                  game.score_mut().subscribe(move |score| {
                    let _ = tx.send(score);
                  });
                }
                reply_msg
              }
              Err(e) => ServerWsMessage::Error { message: format!("Invalid JSON: {}", e) },
            }
          }
          Message::Ping(payload) => {
            let _ = socket.send(Message::Pong(payload)).await;
            continue;
          }
          Message::Close(_) => break,
          _ => continue,
        }
      }
      Some(score) = score_rx.recv() => ServerWsMessage::Score { score },
    };

    let out = serde_json::to_string(&reply).unwrap_or_else(|e| {
      serde_json::json!({ "type": "error", "message": format!("Serialization error: {}", e) }).to_string()
    });

    if let Err(e) = socket.send(Message::Text(out)).await {
      error!(target: "mathquiz_backend", error = %e, "WS send error");
      break;
    }
  }
  info!(target: "mathquiz_backend", "WebSocket disconnected");
}

/// Drop queued score notifications; returns how many were dropped.
fn discard_pending(rx: &mut mpsc::UnboundedReceiver<u32>) -> usize {
  let mut dropped = 0;
  while rx.try_recv().is_ok() {
    dropped += 1;
  }
  dropped
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::config::QuizConfig;
  use crate::leaderboard::InMemoryRankedStore;

  fn send(state: &AppState, session: &mut Option<Game>, json: &str) -> ServerWsMessage {
    let msg: ClientWsMessage = serde_json::from_str(json).expect("client json");
    handle_session_message(state, session, msg)
  }

  #[test]
  fn replies_already_carrying_the_score_are_not_echoed() {
    let state = AppState::with_store(QuizConfig::default(), Arc::new(InMemoryRankedStore::new()));
    let (tx, mut rx) = mpsc::unbounded_channel::<u32>();
    let mut session = None;
    send(&state, &mut session, r#"{"type":"start","mode":"basic"}"#);
    let game = session.as_mut().expect("session");
    game.score_mut().subscribe(move |score| {
      let _ = tx.send(score);
    });

    let answer = game.generate_question().correct_answer.to_string();
    let reply = send(&state, &mut session, &format!(r#"{{"type":"submit_answer","answer":"{answer}"}}"#));
    assert!(matches!(reply, ServerWsMessage::AnswerResult { correct: true, score: 1 }));
    assert_eq!(discard_pending(&mut rx), 1);

    let reply = send(&state, &mut session, r#"{"type":"reset_score"}"#);
    assert!(matches!(reply, ServerWsMessage::Score { score: 0 }));
    assert_eq!(discard_pending(&mut rx), 1);
    assert_eq!(discard_pending(&mut rx), 0);
    assert!(rx.try_recv().is_err());
  }
}
