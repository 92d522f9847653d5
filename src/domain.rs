//! Domain models: operations, posed questions and their answers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Arithmetic operation shared by every mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
  Add,
  Subtract,
  Multiply,
  Divide,
}

impl Operation {
  pub const ALL: [Operation; 4] = [
    Operation::Add,
    Operation::Subtract,
    Operation::Multiply,
    Operation::Divide,
  ];

  /// Symbol rendered in question text.
  pub fn symbol(self) -> &'static str {
    match self {
      Operation::Add => "+",
      Operation::Subtract => "-",
      Operation::Multiply => "×",
      Operation::Divide => "÷",
    }
  }
}

impl fmt::Display for Operation {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.symbol())
  }
}

/// Expected answer of a question: a plain integer or a canonical `"num/den"` string.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CorrectAnswer {
  Number(i64),
  Fraction(String),
}

impl fmt::Display for CorrectAnswer {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      CorrectAnswer::Number(n) => write!(f, "{n}"),
      CorrectAnswer::Fraction(s) => f.write_str(s),
    }
  }
}

/// Operands and reduced result of a fraction question.
///
/// `answer_num / answer_den` is always in lowest terms.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FractionQuestion {
  pub operation: Operation,
  pub num1: i64,
  pub den1: i64,
  pub num2: i64,
  pub den2: i64,
  pub answer_num: i64,
  pub answer_den: i64,
}

/// One posed problem. `fraction` carries the decomposition when the producing
/// mode generated a fraction question; its fields are flattened on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
  pub text: String,
  pub correct_answer: CorrectAnswer,
  #[serde(flatten)]
  pub fraction: Option<FractionQuestion>,
}

impl Question {
  pub fn numeric(text: String, answer: i64) -> Self {
    Self { text, correct_answer: CorrectAnswer::Number(answer), fraction: None }
  }

  pub fn is_fraction(&self) -> bool {
    self.fraction.is_some()
  }
}

/// What a player submits: raw text, or a numerator/denominator pair from a fraction input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UserAnswer {
  Text(String),
  Fraction { numerator: i64, denominator: i64 },
}

impl UserAnswer {
  /// Text form handed to the grader; pairs become `"numerator/denominator"`.
  pub fn canonical_text(&self) -> String {
    match self {
      UserAnswer::Text(s) => s.clone(),
      UserAnswer::Fraction { numerator, denominator } => format!("{numerator}/{denominator}"),
    }
  }
}

impl From<&str> for UserAnswer {
  fn from(s: &str) -> Self {
    UserAnswer::Text(s.to_string())
  }
}

impl From<String> for UserAnswer {
  fn from(s: String) -> Self {
    UserAnswer::Text(s)
  }
}

impl From<(i64, i64)> for UserAnswer {
  fn from((numerator, denominator): (i64, i64)) -> Self {
    UserAnswer::Fraction { numerator, denominator }
  }
}
