//! Advanced: the four operations with operands up to a thousand.

use rand::Rng;

use super::arithmetic::{random_arithmetic_question, OperandRanges};
use super::QuestionMode;
use crate::domain::Question;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AdvancedMode;

impl QuestionMode for AdvancedMode {
  const NAME: &'static str = "Advanced";
  const DESCRIPTION: &'static str = "Practice advanced arithmetic operations with larger numbers";

  fn generate_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
    random_arithmetic_question(rng, &OperandRanges::large())
  }
}
