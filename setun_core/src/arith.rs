//! Balanced ternary arithmetic and logic over [`TritWord`] operands.
//!
//! Every function here is generic over word width: callers decide which
//! registers to feed in, and narrower operands are promoted per
//! [`TritWord::aligned_to`] before the trit-by-trit work begins.

use crate::error::DomainError;
use crate::trit::Trit;
use crate::word::TritWord;

/// Add two words of (possibly different) width, returning the sum at the
/// width of the wider operand plus the final carry-out trit.
pub fn add(a: &TritWord, b: &TritWord) -> (TritWord, Trit) {
    let width = a.len().max(b.len());
    let a = a.aligned_to(width);
    let b = b.aligned_to(width);

    let mut out = vec![Trit::Z; width];
    let mut carry = Trit::Z;
    for i in (0..width).rev() {
        let (sum, carry_out) = a.as_trits()[i].full_add(b.as_trits()[i], carry);
        out[i] = sum;
        carry = carry_out;
    }
    (TritWord::from_trits(out), carry)
}

/// Negate every trit (balanced ternary two's-complement-free negation).
pub fn negate(a: &TritWord) -> TritWord {
    TritWord::from_trits(a.as_trits().iter().map(|&t| -t).collect())
}

/// `a - b`, implemented as `a + (-b)`.
pub fn subtract(a: &TritWord, b: &TritWord) -> (TritWord, Trit) {
    add(a, &negate(b))
}

/// Bitwise-analogue logic, trit by trit, at the width of the wider operand.
pub fn and(a: &TritWord, b: &TritWord) -> TritWord {
    zip_with(a, b, Trit::and)
}

pub fn or(a: &TritWord, b: &TritWord) -> TritWord {
    zip_with(a, b, Trit::or)
}

pub fn xor(a: &TritWord, b: &TritWord) -> TritWord {
    zip_with(a, b, Trit::xor)
}

fn zip_with(a: &TritWord, b: &TritWord, f: impl Fn(Trit, Trit) -> Trit) -> TritWord {
    let width = a.len().max(b.len());
    let a = a.aligned_to(width);
    let b = b.aligned_to(width);
    let trits = a
        .as_trits()
        .iter()
        .zip(b.as_trits())
        .map(|(&x, &y)| f(x, y))
        .collect();
    TritWord::from_trits(trits)
}

/// Shift by `n` trit positions. `n > 0` shifts right (toward the LSB end):
/// every trit moves `n` places toward the least-significant side, the low
/// (LSB) trits fall off the end, and the vacated high (MSB) positions are
/// zero-filled. `n < 0` shifts left (toward the MSB end) symmetrically.
/// Width is preserved.
pub fn shift(a: &TritWord, n: i64) -> TritWord {
    let width = a.len();
    let mut out = vec![Trit::Z; width];
    if n >= 0 {
        let n = n as usize;
        if n < width {
            out[n..].copy_from_slice(&a.as_trits()[..(width - n)]);
        }
    } else {
        let n = (-n) as usize;
        if n < width {
            out[..(width - n)].copy_from_slice(&a.as_trits()[n..]);
        }
    }
    TritWord::from_trits(out)
}

/// Three-way compare: -1 if `a < b`, 0 if equal, +1 if `a > b`.
pub fn compare(a: &TritWord, b: &TritWord) -> Trit {
    match a.to_int().cmp(&b.to_int()) {
        std::cmp::Ordering::Less => Trit::N,
        std::cmp::Ordering::Equal => Trit::Z,
        std::cmp::Ordering::Greater => Trit::P,
    }
}

/// Overflow per the machine's own check: the two most significant trits of
/// the sum (positions 1 and 2) carry the same non-zero sign. Operates on
/// the word as produced by [`add`]/[`subtract`], before any truncation.
pub fn overflowed(sum: &TritWord) -> bool {
    if sum.len() < 2 {
        return false;
    }
    let t1 = sum.get_trit(1);
    let t2 = sum.get_trit(2);
    !t1.is_zero() && t1 == t2
}

/// Schoolbook multiply, producing a product word of width
/// `a.len() + b.len()`: wide enough to hold any product of the two
/// operand ranges without loss.
pub fn multiply(a: &TritWord, b: &TritWord) -> TritWord {
    let out_width = a.len() + b.len();
    let mut acc = TritWord::zero(out_width);
    let a_wide = a.aligned_to(out_width);
    for (i, &digit) in b.as_trits().iter().rev().enumerate() {
        if digit.is_zero() {
            continue;
        }
        let shifted = shift(&a_wide, -(i as i64));
        let term = match digit {
            Trit::P => shifted,
            Trit::N => negate(&shifted),
            Trit::Z => unreachable!(),
        };
        let (sum, _carry) = add(&acc, &term);
        acc = sum;
    }
    acc
}

/// Floor division: `dividend = divisor * quotient + remainder`, with
/// `remainder` taking the sign of `divisor` (true mathematical floor
/// division, matching the spec's requirement over truncating division).
/// The result widths match `divisor`'s width; returns
/// [`DomainError::DivisionByZero`] when `divisor` is zero, which the
/// caller turns into a machine halt rather than a Rust panic.
pub fn divide(dividend: &TritWord, divisor: &TritWord) -> Result<(TritWord, TritWord), DomainError> {
    if divisor.is_zero() {
        return Err(DomainError::DivisionByZero);
    }
    let n = dividend.to_int();
    let d = divisor.to_int();
    let mut q = n / d;
    let r = n % d;
    if r != 0 && (r < 0) != (d < 0) {
        q -= 1;
    }
    let r = n - q * d;

    let width = divisor.len();
    let quotient = TritWord::from_int(q, width)?;
    let remainder = TritWord::from_int(r, width)?;
    Ok((quotient, remainder))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(v: i64, len: usize) -> TritWord {
        TritWord::from_int(v, len).unwrap()
    }

    #[test]
    fn add_matches_integer_addition() {
        for (x, y) in [(0i64, 0i64), (13, 29), (-13, 29), (13, -29), (-9841, 9840)] {
            let (sum, _carry) = add(&w(x, 9), &w(y, 9));
            assert_eq!(sum.to_int(), x + y);
        }
    }

    #[test]
    fn subtract_matches_integer_subtraction() {
        let (diff, _) = subtract(&w(50, 9), &w(80, 9));
        assert_eq!(diff.to_int(), -30);
    }

    #[test]
    fn negate_is_additive_inverse() {
        let a = w(123, 9);
        let (sum, carry) = add(&a, &negate(&a));
        assert!(sum.is_zero());
        assert!(carry.is_zero());
    }

    #[test]
    fn overflow_detected_on_same_sign_top_trits() {
        let max9 = w(9841, 9);
        let (sum, _) = add(&max9, &w(1, 9));
        assert!(overflowed(&sum));
    }

    #[test]
    fn no_overflow_within_range() {
        let (sum, _) = add(&w(100, 9), &w(100, 9));
        assert!(!overflowed(&sum));
    }

    #[test]
    fn multiply_matches_integer_product() {
        for (x, y) in [(0i64, 5i64), (7, 6), (-7, 6), (7, -6), (-7, -6), (121, -121)] {
            let product = multiply(&w(x, 5), &w(y, 5));
            assert_eq!(product.to_int(), x * y);
        }
    }

    #[test]
    fn divide_is_floor_division() {
        let (q, r) = divide(&w(7, 9), &w(2, 9)).unwrap();
        assert_eq!((q.to_int(), r.to_int()), (3, 1));

        let (q, r) = divide(&w(-7, 9), &w(2, 9)).unwrap();
        assert_eq!((q.to_int(), r.to_int()), (-4, 1));

        let (q, r) = divide(&w(7, 9), &w(-2, 9)).unwrap();
        assert_eq!((q.to_int(), r.to_int()), (-4, -1));
    }

    #[test]
    fn divide_by_zero_is_domain_error() {
        assert_eq!(divide(&w(7, 9), &w(0, 9)), Err(DomainError::DivisionByZero));
    }

    #[test]
    fn shift_left_and_right_zero_fill() {
        let a = w(1, 5); // 00001 in balanced ternary digits isn't literal, but shape check suffices
        let left = shift(&a, 2);
        let right = shift(&left, -2);
        assert_eq!(right.to_int(), a.to_int());
    }

    #[test]
    fn logic_ops_are_pointwise() {
        let a = TritWord::from_symbolic("+0-").unwrap();
        let b = TritWord::from_symbolic("++-").unwrap();
        assert_eq!(and(&a, &b).to_symbolic(), "+0-");
        assert_eq!(or(&a, &b).to_symbolic(), "++-");
        assert_eq!(xor(&a, &b).to_symbolic(), "--+");
    }
}
