//! Large Numbers: six-digit multiplication and division by 3–100.

use rand::Rng;

use super::arithmetic::pick;
use super::QuestionMode;
use crate::domain::{Operation, Question};
use crate::util::format_thousands;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LargeNumbersMode;

const LARGE: std::ops::RangeInclusive<i64> = 100_000..=999_999;
const SMALL: std::ops::RangeInclusive<i64> = 3..=100;

impl QuestionMode for LargeNumbersMode {
  const NAME: &'static str = "Large Numbers";
  const DESCRIPTION: &'static str = "Practice multiplication and division with very large numbers";

  fn generate_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
    match pick(rng, &[Operation::Multiply, Operation::Divide]) {
      Operation::Multiply => {
        let a = rng.gen_range(LARGE);
        let b = rng.gen_range(SMALL);
        Question::numeric(format!("{} × {b} = ?", format_thousands(a)), a * b)
      }
      Operation::Divide => {
        let divisor = rng.gen_range(SMALL);
        let answer = rng.gen_range(LARGE);
        let dividend = answer * divisor;
        Question::numeric(format!("{} ÷ {divisor} = ?", format_thousands(dividend)), answer)
      }
      op => unreachable!("large numbers mode never selects {op:?}"),
    }
  }
}
