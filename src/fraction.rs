//! Fraction reduction (GCD based) and parsing of `"num/den"` strings.

/// Greatest common divisor of the absolute values. `gcd(0, d) == |d|`.
/// Unsigned so `i64::MIN` has a magnitude.
pub fn gcd(a: i64, b: i64) -> u64 {
  let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
  while b != 0 {
    let r = a % b;
    a = b;
    b = r;
  }
  a
}

/// Reduce `numerator/denominator` to lowest terms.
/// `0/0` has no divisor and comes back unchanged, as does a divisor of `2^63`.
pub fn simplify_fraction(numerator: i64, denominator: i64) -> (i64, i64) {
  match i64::try_from(gcd(numerator, denominator)) {
    Ok(g) if g != 0 => (numerator / g, denominator / g),
    _ => (numerator, denominator),
  }
}

/// Reduce and carry the sign on the numerator, so `1/-2` and `-1/2` coincide.
/// `None` when the sign flip leaves `i64` (e.g. `i64::MIN/-1`).
pub fn canonical_fraction(numerator: i64, denominator: i64) -> Option<(i64, i64)> {
  let (n, d) = simplify_fraction(numerator, denominator);
  if d < 0 { Some((n.checked_neg()?, d.checked_neg()?)) } else { Some((n, d)) }
}

/// Parse `"num/den"` with optional whitespace around each side.
pub fn parse_fraction(s: &str) -> Option<(i64, i64)> {
  let (num, den) = s.split_once('/')?;
  let num = num.trim().parse::<i64>().ok()?;
  let den = den.trim().parse::<i64>().ok()?;
  Some((num, den))
}

pub fn format_fraction(numerator: i64, denominator: i64) -> String {
  format!("{numerator}/{denominator}")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn gcd_handles_zero_and_signs() {
    assert_eq!(gcd(0, 7), 7);
    assert_eq!(gcd(7, 0), 7);
    assert_eq!(gcd(0, 0), 0);
    assert_eq!(gcd(-12, 18), 6);
    assert_eq!(gcd(12, -18), 6);
  }

  #[test]
  fn zero_numerator_reduces_to_zero_over_one() {
    assert_eq!(simplify_fraction(0, 36), (0, 1));
    assert_eq!(simplify_fraction(0, 0), (0, 0));
  }

  #[test]
  fn reduction_ignores_common_factors() {
    for (n, d) in [(1, 2), (3, 7), (-5, 9), (8, 3), (0, 4)] {
      for k in 1..=12 {
        assert_eq!(simplify_fraction(k * n, k * d), simplify_fraction(n, d), "k={k} n={n} d={d}");
      }
    }
  }

  #[test]
  fn reduced_parts_are_coprime() {
    for n in -20..=20 {
      for d in 1..=20 {
        let (rn, rd) = simplify_fraction(n, d);
        assert_eq!(gcd(rn, rd), 1, "{n}/{d} -> {rn}/{rd}");
      }
    }
  }

  #[test]
  fn canonical_moves_sign_to_numerator() {
    assert_eq!(canonical_fraction(1, -2), Some((-1, 2)));
    assert_eq!(canonical_fraction(-2, -4), Some((1, 2)));
  }

  #[test]
  fn extreme_parts_do_not_overflow() {
    assert_eq!(gcd(i64::MIN, 0), 1 << 63);
    assert_eq!(gcd(i64::MIN, -1), 1);
    assert_eq!(simplify_fraction(i64::MIN, i64::MIN), (i64::MIN, i64::MIN));
    assert_eq!(simplify_fraction(i64::MIN, 2), (i64::MIN / 2, 1));
    assert_eq!(canonical_fraction(i64::MIN, -1), None);
    assert_eq!(canonical_fraction(1, i64::MIN), None);
    assert_eq!(canonical_fraction(i64::MIN, 1), Some((i64::MIN, 1)));
  }

  #[test]
  fn parse_requires_both_sides() {
    assert_eq!(parse_fraction("2/4"), Some((2, 4)));
    assert_eq!(parse_fraction(" -3 / 9 "), Some((-3, 9)));
    assert_eq!(parse_fraction("3"), None);
    assert_eq!(parse_fraction("3/"), None);
    assert_eq!(parse_fraction("a/b"), None);
    assert_eq!(parse_fraction("1/2/3"), None);
  }
}
