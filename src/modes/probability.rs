//! Probability: percentages of a total, parts of a whole, and signed sums.

use rand::Rng;

use super::arithmetic::pick;
use super::QuestionMode;
use crate::domain::Question;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProbabilityMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Kind {
  Percentage,
  PartOfWhole,
  SignedArithmetic,
}

impl QuestionMode for ProbabilityMode {
  const NAME: &'static str = "Probability";
  const DESCRIPTION: &'static str = "Practice probability calculations and estimations";

  fn generate_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
    match pick(rng, &[Kind::Percentage, Kind::PartOfWhole, Kind::SignedArithmetic]) {
      Kind::Percentage => percentage_question(rng),
      Kind::PartOfWhole => part_of_whole_question(rng),
      Kind::SignedArithmetic => signed_arithmetic_question(rng),
    }
  }
}

fn percentage_question<R: Rng + ?Sized>(rng: &mut R) -> Question {
  let percentage: i64 = rng.gen_range(1..=100);
  let total: i64 = rng.gen_range(3..=1000);
  Question::numeric(format!("What is {percentage}% of {total}?"), percent_of(percentage, total))
}

/// `percentage`% of `total`, halves rounded up.
fn percent_of(percentage: i64, total: i64) -> i64 {
  ((percentage as f64 / 100.0) * total as f64).round() as i64
}

fn part_of_whole_question<R: Rng + ?Sized>(rng: &mut R) -> Question {
  let part: i64 = rng.gen_range(3..=30);
  let total = part + rng.gen_range(1..=10);
  let percentage = ((part as f64 / total as f64) * 100.0).round() as i64;
  Question::numeric(format!("{part} girls in a class of {total}. What percentage are girls?"), percentage)
}

fn signed_arithmetic_question<R: Rng + ?Sized>(rng: &mut R) -> Question {
  let a: i64 = rng.gen_range(2..=1000);
  let b: i64 = rng.gen_range(2..=1000);
  if rng.gen_bool(0.5) {
    Question::numeric(format!("{a} + {b} = ?"), a + b)
  } else {
    Question::numeric(format!("{a} - {b} = ?"), a - b)
  }
}
