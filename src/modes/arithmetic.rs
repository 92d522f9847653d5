//! Integer arithmetic questions shared by Basic, Advanced and the arithmetic
//! branch of Medium. Subtraction and division are reverse-constructed from the
//! answer so the result is always a positive integer.

use std::ops::RangeInclusive;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::{Operation, Question};

/// Inclusive operand ranges for each operation.
#[derive(Clone, Debug)]
pub struct OperandRanges {
  pub add: RangeInclusive<i64>,
  /// First operand (`a`) and the answer (`b`) of `(a + b) - a`.
  pub subtract: (RangeInclusive<i64>, RangeInclusive<i64>),
  pub multiply: (RangeInclusive<i64>, RangeInclusive<i64>),
  /// Divisor (`a`) and quotient (`b`) of `(a * b) ÷ a`.
  pub divide: (RangeInclusive<i64>, RangeInclusive<i64>),
}

impl OperandRanges {
  /// Small numbers with a 2–12 multiplier.
  pub fn small() -> Self {
    Self {
      add: 2..=100,
      subtract: (2..=100, 2..=100),
      multiply: (2..=12, 2..=100),
      divide: (2..=12, 2..=100),
    }
  }

  pub fn large() -> Self {
    Self {
      add: 2..=1000,
      subtract: (2..=1000, 2..=1000),
      multiply: (2..=100, 2..=100),
      divide: (2..=1000, 2..=1000),
    }
  }
}

/// Uniform choice over a fixed, non-empty selector set.
pub(crate) fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
  match items.choose(rng) {
    Some(item) => *item,
    None => unreachable!("selector set must not be empty"),
  }
}

pub fn random_arithmetic_question<R: Rng + ?Sized>(rng: &mut R, ranges: &OperandRanges) -> Question {
  let op = pick(rng, &Operation::ALL);
  arithmetic_question(rng, op, ranges)
}

pub fn arithmetic_question<R: Rng + ?Sized>(rng: &mut R, op: Operation, ranges: &OperandRanges) -> Question {
  match op {
    Operation::Add => {
      let a = rng.gen_range(ranges.add.clone());
      let b = rng.gen_range(ranges.add.clone());
      Question::numeric(format!("{a} + {b} = ?"), a + b)
    }
    Operation::Subtract => {
      let a = rng.gen_range(ranges.subtract.0.clone());
      let b = rng.gen_range(ranges.subtract.1.clone());
      Question::numeric(format!("{} - {a} = ?", a + b), b)
    }
    Operation::Multiply => {
      let a = rng.gen_range(ranges.multiply.0.clone());
      let b = rng.gen_range(ranges.multiply.1.clone());
      Question::numeric(format!("{a} × {b} = ?"), a * b)
    }
    Operation::Divide => {
      let a = rng.gen_range(ranges.divide.0.clone());
      let b = rng.gen_range(ranges.divide.1.clone());
      Question::numeric(format!("{} ÷ {a} = ?", a * b), b)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::modes::tests::{parse_binary, recompute};
  use rand::rngs::StdRng;
  use rand::SeedableRng;

  #[test]
  fn each_operation_respects_its_ranges() {
    let mut rng = StdRng::seed_from_u64(11);
    let ranges = OperandRanges::small();
    for _ in 0..500 {
      let q = arithmetic_question(&mut rng, Operation::Multiply, &ranges);
      let (a, op, b) = parse_binary(&q.text).expect("parsable");
      assert_eq!(op, Operation::Multiply);
      assert!(ranges.multiply.0.contains(&a) && ranges.multiply.1.contains(&b), "{}", q.text);

      let q = arithmetic_question(&mut rng, Operation::Subtract, &ranges);
      let (lhs, _, a) = parse_binary(&q.text).expect("parsable");
      assert!(ranges.subtract.0.contains(&a));
      assert!(lhs > a);
    }
  }

  #[test]
  fn text_and_answer_agree() {
    let mut rng = StdRng::seed_from_u64(12);
    for ranges in [OperandRanges::small(), OperandRanges::large()] {
      for _ in 0..1000 {
        let q = random_arithmetic_question(&mut rng, &ranges);
        assert_eq!(recompute(&q.text), Some(q.correct_answer.clone()), "{}", q.text);
      }
    }
  }
}
