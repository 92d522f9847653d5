//! Medium ("fractions"): basic arithmetic mixed with single-digit fraction problems.
//!
//! Each call picks uniformly among five branches: the four integer operations
//! (Basic ranges) and a fraction branch. Fraction results are reduced to lowest
//! terms before they are handed out.

use rand::Rng;

use super::arithmetic::{arithmetic_question, pick, OperandRanges};
use super::QuestionMode;
use crate::domain::{CorrectAnswer, FractionQuestion, Operation, Question};
use crate::fraction::{format_fraction, simplify_fraction};
use crate::grading::check_answer_any;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MediumMode;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Branch {
  Arithmetic(Operation),
  Fraction,
}

const BRANCHES: [Branch; 5] = [
  Branch::Arithmetic(Operation::Add),
  Branch::Arithmetic(Operation::Subtract),
  Branch::Arithmetic(Operation::Multiply),
  Branch::Arithmetic(Operation::Divide),
  Branch::Fraction,
];

impl QuestionMode for MediumMode {
  const NAME: &'static str = "Medium";
  const DESCRIPTION: &'static str = "Practice arithmetic operations with smaller numbers and fractions";

  fn generate_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
    match pick(rng, &BRANCHES) {
      Branch::Arithmetic(op) => arithmetic_question(rng, op, &OperandRanges::small()),
      Branch::Fraction => self.generate_fraction_question(rng),
    }
  }

  fn check_answer(&self, user_answer: &str, correct: &CorrectAnswer) -> bool {
    check_answer_any(user_answer, correct)
  }
}

impl MediumMode {
  /// Fraction branch: four operands in 1–9 and a uniformly chosen operation.
  pub fn generate_fraction_question<R: Rng + ?Sized>(&self, rng: &mut R) -> Question {
    let op = pick(rng, &Operation::ALL);
    let num1 = rng.gen_range(1..=9);
    let den1 = rng.gen_range(1..=9);
    let num2 = rng.gen_range(1..=9);
    let den2 = rng.gen_range(1..=9);
    Self::fraction_question(op, num1, den1, num2, den2)
  }

  /// Build the question `num1/den1 <op> num2/den2` with its reduced answer.
  /// Denominators (and `num2` for division) are expected to be non-zero.
  pub fn fraction_question(operation: Operation, num1: i64, den1: i64, num2: i64, den2: i64) -> Question {
    let (raw_num, raw_den) = match operation {
      Operation::Add => (num1 * den2 + num2 * den1, den1 * den2),
      Operation::Subtract => (num1 * den2 - num2 * den1, den1 * den2),
      Operation::Multiply => (num1 * num2, den1 * den2),
      Operation::Divide => (num1 * den2, den1 * num2),
    };
    let (answer_num, answer_den) = simplify_fraction(raw_num, raw_den);

    Question {
      text: format!("{num1}/{den1} {} {num2}/{den2} = ?", operation.symbol()),
      correct_answer: CorrectAnswer::Fraction(format_fraction(answer_num, answer_den)),
      fraction: Some(FractionQuestion { operation, num1, den1, num2, den2, answer_num, answer_den }),
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::fraction::gcd;
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn half_plus_half_is_one_over_one() {
    let q = MediumMode::fraction_question(Operation::Add, 1, 2, 1, 2);
    assert_eq!(q.text, "1/2 + 1/2 = ?");
    assert_eq!(q.correct_answer, CorrectAnswer::Fraction("1/1".into()));
    let f = q.fraction.expect("fraction parts");
    assert_eq!((f.answer_num, f.answer_den), (1, 1));
  }

  #[test]
  fn division_multiplies_by_the_reciprocal() {
    let q = MediumMode::fraction_question(Operation::Divide, 2, 3, 4, 9);
    assert_eq!(q.correct_answer, CorrectAnswer::Fraction("3/2".into()));
    assert_eq!(q.text, "2/3 ÷ 4/9 = ?");
  }

  #[test]
  fn subtraction_can_be_negative_or_zero() {
    let q = MediumMode::fraction_question(Operation::Subtract, 1, 4, 3, 4);
    assert_eq!(q.correct_answer, CorrectAnswer::Fraction("-1/2".into()));
    let q = MediumMode::fraction_question(Operation::Subtract, 2, 6, 1, 3);
    assert_eq!(q.correct_answer, CorrectAnswer::Fraction("0/1".into()));
  }

  #[test]
  fn generated_fractions_are_reduced_and_consistent() {
    let mut rng = StdRng::seed_from_u64(13);
    for _ in 0..1000 {
      let q = MediumMode.generate_fraction_question(&mut rng);
      let f = q.fraction.clone().expect("fraction parts");
      for v in [f.num1, f.den1, f.num2, f.den2] {
        assert!((1..=9).contains(&v));
      }
      assert_ne!(f.answer_den, 0);
      assert_eq!(gcd(f.answer_num, f.answer_den), 1, "{}", q.text);
      assert_eq!(q.correct_answer, CorrectAnswer::Fraction(format!("{}/{}", f.answer_num, f.answer_den)));

      let (n, d) = match f.operation {
        Operation::Add => (f.num1 * f.den2 + f.num2 * f.den1, f.den1 * f.den2),
        Operation::Subtract => (f.num1 * f.den2 - f.num2 * f.den1, f.den1 * f.den2),
        Operation::Multiply => (f.num1 * f.num2, f.den1 * f.den2),
        Operation::Divide => (f.num1 * f.den2, f.den1 * f.num2),
      };
      assert_eq!(simplify_fraction(n, d), (f.answer_num, f.answer_den));
    }
  }

  #[test]
  fn grading_accepts_equivalent_fractions_and_integers() {
    let half = CorrectAnswer::Fraction("1/2".into());
    assert!(MediumMode.check_answer("2/4", &half));
    assert!(!MediumMode.check_answer("1/3", &half));
    assert!(MediumMode.check_answer("42", &CorrectAnswer::Number(42)));
  }

  #[test]
  fn branch_selection_reaches_fractions_and_integers() {
    let mut rng = StdRng::seed_from_u64(14);
    let questions: Vec<Question> = (0..200).map(|_| MediumMode.generate_question(&mut rng)).collect();
    assert!(questions.iter().any(Question::is_fraction));
    assert!(questions.iter().any(|q| matches!(q.correct_answer, CorrectAnswer::Number(_))));
  }
}
