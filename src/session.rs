//! Game session: active mode, current question and running score.
//!
//! State machine:
//!   Idle -> (generate) -> AwaitingAnswer -> (check) -> Graded -> (generate) -> ...
//! Generating again simply replaces the current question, and grading the same
//! question twice scores twice. `reset` returns to Idle.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::{Question, UserAnswer};
use crate::error::Result;
use crate::modes::{create_game_mode, GameMode, ModeId};
use crate::score::Score;
use crate::util::trunc_for_log;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
  Idle,
  AwaitingAnswer,
  Graded,
}

#[derive(Debug)]
pub struct Game {
  mode: GameMode,
  current: Option<Question>,
  state: SessionState,
  score: Score,
  rng: StdRng,
}

impl Game {
  /// Resolve `mode` through the factory; unknown identifiers fail here.
  pub fn new(mode: &str) -> Result<Self> {
    Self::with_rng(mode, StdRng::from_entropy())
  }

  pub fn with_seed(mode: &str, seed: u64) -> Result<Self> {
    Self::with_rng(mode, StdRng::seed_from_u64(seed))
  }

  pub fn with_rng(mode: &str, rng: StdRng) -> Result<Self> {
    let mode = create_game_mode(mode)?;
    info!(target: "quiz", mode = %mode.id(), "Game session created");
    Ok(Self { mode, current: None, state: SessionState::Idle, score: Score::default(), rng })
  }

  #[instrument(level = "debug", skip(self), fields(mode = %self.mode.id()))]
  pub fn generate_question(&mut self) -> &Question {
    let question = self.mode.generate_question(&mut self.rng);
    debug!(target: "quiz", text = %question.text, fraction = question.is_fraction(), "Question generated");
    self.state = SessionState::AwaitingAnswer;
    self.current.insert(question)
  }

  /// Grade against the current question; +1 on success. Without a current
  /// question nothing can match and the verdict is `false`.
  #[instrument(level = "debug", skip(self, answer), fields(mode = %self.mode.id()))]
  pub fn check_answer(&mut self, answer: impl Into<UserAnswer>) -> bool {
    let text = answer.into().canonical_text();
    let Some(question) = &self.current else {
      debug!(target: "quiz", "Answer submitted with no current question");
      return false;
    };
    let correct = self.mode.check_answer(&text, &question.correct_answer);
    if correct {
      self.score.increment();
    }
    self.state = SessionState::Graded;
    debug!(target: "quiz", answer = %trunc_for_log(&text, 32), correct, score = self.score.get(), "Answer graded");
    correct
  }

  pub fn score(&self) -> u32 {
    self.score.get()
  }

  /// Access to the observable score, e.g. to subscribe to changes.
  pub fn score_mut(&mut self) -> &mut Score {
    &mut self.score
  }

  pub fn reset_score(&mut self) {
    self.score.reset();
  }

  /// Clear score and current question. With `Some(mode)`, switch modes first;
  /// an unknown mode leaves the session exactly as it was.
  #[instrument(level = "info", skip(self))]
  pub fn reset(&mut self, mode: Option<&str>) -> Result<()> {
    if let Some(id) = mode {
      self.mode = create_game_mode(id)?;
    }
    self.score.reset();
    self.current = None;
    self.state = SessionState::Idle;
    info!(target: "quiz", mode = %self.mode.id(), "Game session reset");
    Ok(())
  }

  pub fn current_question(&self) -> Option<&Question> {
    self.current.as_ref()
  }

  pub fn state(&self) -> SessionState {
    self.state
  }

  pub fn mode_id(&self) -> ModeId {
    self.mode.id()
  }

  pub fn game_mode_name(&self) -> &'static str {
    self.mode.name()
  }

  pub fn game_mode_description(&self) -> &'static str {
    self.mode.description()
  }

  #[cfg(test)]
  fn pose(&mut self, question: Question) -> &Question {
    self.state = SessionState::AwaitingAnswer;
    self.current.insert(question)
  }
}
