//! Game modes: question-generation and grading strategies.
//!
//! Every mode is a unit struct implementing [`QuestionMode`]. The trait is
//! generic over the RNG and therefore not object-safe; [`GameMode`] is the
//! closed set of modes and dispatches with a `match`. [`create_game_mode`] is
//! the factory that maps a client-facing identifier onto a mode.

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::Serialize;

use crate::domain::{CorrectAnswer, Question};
use crate::error::{QuizError, Result};
use crate::grading::check_integer_answer;

pub mod advanced;
pub mod arithmetic;
pub mod basic;
pub mod large_numbers;
pub mod medium;
pub mod probability;

pub use advanced::AdvancedMode;
pub use basic::BasicMode;
pub use large_numbers::LargeNumbersMode;
pub use medium::MediumMode;
pub use probability::ProbabilityMode;

/// Strategy contract shared by all modes.
pub trait QuestionMode {
  const NAME: &'static str;
  const DESCRIPTION: &'static str;

  /// Produce one fresh question. Calls are independent of each other.
  fn generate_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Question;

  /// Grade `user_answer` against `correct`. Integer-only unless overridden.
  fn check_answer(&self, user_answer: &str, correct: &CorrectAnswer) -> bool {
    check_integer_answer(user_answer, correct)
  }
}

/// Identifier accepted by the factory.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum ModeId {
  #[serde(rename = "basic")]
  Basic,
  #[serde(rename = "fractions")]
  Fractions,
  #[serde(rename = "advanced")]
  Advanced,
  #[serde(rename = "probability")]
  Probability,
  #[serde(rename = "largeNumbers")]
  LargeNumbers,
}

impl ModeId {
  pub const ALL: [ModeId; 5] = [
    ModeId::Basic,
    ModeId::Fractions,
    ModeId::Advanced,
    ModeId::Probability,
    ModeId::LargeNumbers,
  ];

  pub fn as_str(self) -> &'static str {
    match self {
      ModeId::Basic => "basic",
      ModeId::Fractions => "fractions",
      ModeId::Advanced => "advanced",
      ModeId::Probability => "probability",
      ModeId::LargeNumbers => "largeNumbers",
    }
  }
}

impl fmt::Display for ModeId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

impl FromStr for ModeId {
  type Err = QuizError;

  fn from_str(s: &str) -> Result<Self> {
    ModeId::ALL
      .into_iter()
      .find(|id| id.as_str() == s)
      .ok_or_else(|| QuizError::UnknownMode(s.to_string()))
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameMode {
  Basic(BasicMode),
  Medium(MediumMode),
  Advanced(AdvancedMode),
  Probability(ProbabilityMode),
  LargeNumbers(LargeNumbersMode),
}

macro_rules! dispatch {
  ($self:expr, $m:ident => $body:expr) => {
    match $self {
      GameMode::Basic($m) => $body,
      GameMode::Medium($m) => $body,
      GameMode::Advanced($m) => $body,
      GameMode::Probability($m) => $body,
      GameMode::LargeNumbers($m) => $body,
    }
  };
}

impl GameMode {
  pub fn from_id(id: ModeId) -> Self {
    match id {
      ModeId::Basic => GameMode::Basic(BasicMode),
      ModeId::Fractions => GameMode::Medium(MediumMode),
      ModeId::Advanced => GameMode::Advanced(AdvancedMode),
      ModeId::Probability => GameMode::Probability(ProbabilityMode),
      ModeId::LargeNumbers => GameMode::LargeNumbers(LargeNumbersMode),
    }
  }

  pub fn id(&self) -> ModeId {
    match self {
      GameMode::Basic(_) => ModeId::Basic,
      GameMode::Medium(_) => ModeId::Fractions,
      GameMode::Advanced(_) => ModeId::Advanced,
      GameMode::Probability(_) => ModeId::Probability,
      GameMode::LargeNumbers(_) => ModeId::LargeNumbers,
    }
  }

  pub fn name(&self) -> &'static str {
    match self {
      GameMode::Basic(_) => BasicMode::NAME,
      GameMode::Medium(_) => MediumMode::NAME,
      GameMode::Advanced(_) => AdvancedMode::NAME,
      GameMode::Probability(_) => ProbabilityMode::NAME,
      GameMode::LargeNumbers(_) => LargeNumbersMode::NAME,
    }
  }

  pub fn description(&self) -> &'static str {
    match self {
      GameMode::Basic(_) => BasicMode::DESCRIPTION,
      GameMode::Medium(_) => MediumMode::DESCRIPTION,
      GameMode::Advanced(_) => AdvancedMode::DESCRIPTION,
      GameMode::Probability(_) => ProbabilityMode::DESCRIPTION,
      GameMode::LargeNumbers(_) => LargeNumbersMode::DESCRIPTION,
    }
  }

  pub fn generate_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
    dispatch!(self, m => m.generate_question(rng))
  }

  pub fn check_answer(&self, user_answer: &str, correct: &CorrectAnswer) -> bool {
    dispatch!(self, m => m.check_answer(user_answer, correct))
  }
}

/// Resolve a mode identifier. Unknown identifiers are an error, never a default.
pub fn create_game_mode(identifier: &str) -> Result<GameMode> {
  identifier.parse::<ModeId>().map(GameMode::from_id)
}

/// Entry of the mode picker.
#[derive(Clone, Debug, Serialize)]
pub struct ModeInfo {
  pub id: ModeId,
  pub name: &'static str,
  pub description: &'static str,
}

pub fn mode_catalog() -> Vec<ModeInfo> {
  ModeId::ALL
    .into_iter()
    .map(|id| {
      let mode = GameMode::from_id(id);
      ModeInfo { id, name: mode.name(), description: mode.description() }
    })
    .collect()
}
