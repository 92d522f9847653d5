//! Basic: the four operations over small numbers.

use rand::Rng;

use super::arithmetic::{random_arithmetic_question, OperandRanges};
use super::QuestionMode;
use crate::domain::Question;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BasicMode;

impl QuestionMode for BasicMode {
  const NAME: &'static str = "Basic";
  const DESCRIPTION: &'static str = "Practice basic arithmetic operations with smaller numbers";

  fn generate_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
    random_arithmetic_question(rng, &OperandRanges::small())
  }
}
