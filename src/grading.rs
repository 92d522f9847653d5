//! Answer grading shared by all modes.
//!
//! A malformed answer is never an error, it simply fails to match.

use crate::domain::CorrectAnswer;
use crate::fraction::{canonical_fraction, parse_fraction};

/// Lenient integer parse: skips leading whitespace, accepts an optional sign,
/// then reads the longest run of ASCII digits (`"12abc"` -> 12).
/// Returns `None` when no digit is found, which matches no answer.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
  let s = s.trim_start();
  let (negative, rest) = match s.as_bytes().first() {
    Some(b'-') => (true, &s[1..]),
    Some(b'+') => (false, &s[1..]),
    _ => (false, s),
  };
  let end = rest.bytes().take_while(u8::is_ascii_digit).count();
  if end == 0 {
    return None;
  }
  let magnitude = rest[..end].parse::<i64>().ok()?;
  Some(if negative { -magnitude } else { magnitude })
}

/// Integer-only grading used by every mode without fraction questions.
pub fn check_integer_answer(user_answer: &str, correct: &CorrectAnswer) -> bool {
  match correct {
    CorrectAnswer::Number(expected) => parse_int_prefix(user_answer) == Some(*expected),
    CorrectAnswer::Fraction(_) => false,
  }
}

/// Grade against either answer shape. Fractions compare after both sides are
/// reduced to lowest terms, so `"2/4"` matches `"1/2"`.
pub fn check_answer_any(user_answer: &str, correct: &CorrectAnswer) -> bool {
  match correct {
    CorrectAnswer::Number(_) => check_integer_answer(user_answer, correct),
    CorrectAnswer::Fraction(expected) => fractions_equal(user_answer, expected),
  }
}

pub fn fractions_equal(user_answer: &str, expected: &str) -> bool {
  let (Some((un, ud)), Some((cn, cd))) = (parse_fraction(user_answer), parse_fraction(expected)) else {
    return false;
  };
  if ud == 0 || cd == 0 {
    return false;
  }
  match (canonical_fraction(un, ud), canonical_fraction(cn, cd)) {
    (Some(user), Some(correct)) => user == correct,
    _ => false,
  }
}
