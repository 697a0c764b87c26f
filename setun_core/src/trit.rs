//! The single balanced ternary digit.

use std::fmt;
use std::ops::Neg;

use serde::{Deserialize, Serialize};

/// A balanced ternary digit {-1, 0, +1}.
///
/// Using a C-style enum with explicit discriminants mirrors the value
/// directly: `trit as i8` is always -1, 0, or +1.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(i8)]
pub enum Trit {
    N = -1, // Negative
    #[default]
    Z = 0, // Zero
    P = 1, // Positive
}

impl Trit {
    /// Returns the signed integer value of the Trit (-1, 0, or 1).
    #[inline]
    pub fn to_i8(self) -> i8 {
        self as i8
    }

    /// Converts an integer into a Trit. Returns `None` if the value is invalid.
    #[inline]
    pub fn from_i8(val: i8) -> Option<Self> {
        match val {
            -1 => Some(Trit::N),
            0 => Some(Trit::Z),
            1 => Some(Trit::P),
            _ => None,
        }
    }

    /// Clamps an arbitrary integer to the sign of its value, saturating at
    /// the trit range. Used where the contract calls for clamping rather
    /// than rejecting (see `TritWord::set_trit`).
    #[inline]
    pub fn clamp_i8(val: i8) -> Self {
        match val.cmp(&0) {
            std::cmp::Ordering::Less => Trit::N,
            std::cmp::Ordering::Equal => Trit::Z,
            std::cmp::Ordering::Greater => Trit::P,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Trit::Z
    }

    /// Ternary AND: sign of the product. +1 if same non-zero sign, -1 if
    /// opposite non-zero signs, 0 if either operand is zero.
    #[inline]
    pub fn and(self, other: Trit) -> Trit {
        Trit::clamp_i8((self.to_i8() * other.to_i8()).signum())
    }

    /// Ternary OR per the table in the spec (not `max` in the naive sense:
    /// the (0,-1) and (-1,0) pairs both collapse to 0).
    #[inline]
    pub fn or(self, other: Trit) -> Trit {
        use Trit::*;
        match (self, other) {
            (N, N) => N,
            (N, Z) | (Z, N) => Z,
            (N, P) | (P, N) => P,
            (Z, Z) => Z,
            (Z, P) | (P, Z) => P,
            (P, P) => P,
        }
    }

    /// Ternary exclusion (XOR), per the explicit table in the spec.
    #[inline]
    pub fn xor(self, other: Trit) -> Trit {
        use Trit::*;
        match (self, other) {
            (N, N) => P,
            (N, Z) => N,
            (N, P) => Z,
            (Z, N) => N,
            (Z, Z) => Z,
            (Z, P) => N,
            (P, N) => Z,
            (P, Z) => P,
            (P, P) => N,
        }
    }

    /// Single-trit balanced ternary full add: returns (sum, carry).
    ///
    /// `a + b + carry_in` ranges over [-3, 3]; decomposed so that
    /// `sum + 3 * carry_out == a + b + carry_in`.
    #[inline]
    pub fn full_add(self, other: Trit, carry_in: Trit) -> (Trit, Trit) {
        let total = self.to_i8() + other.to_i8() + carry_in.to_i8();
        let carry_out = match total {
            -3..=-2 => -1,
            -1..=1 => 0,
            2..=3 => 1,
            _ => unreachable!("trit sum out of [-3,3]: {total}"),
        };
        let sum = total - 3 * carry_out;
        (
            Trit::from_i8(sum).expect("sum trit out of range"),
            Trit::from_i8(carry_out).expect("carry trit out of range"),
        )
    }

    /// Single-trit multiply; never carries (product of two trits in [-1,1]
    /// is always in [-1,1]).
    #[inline]
    pub fn mul(self, other: Trit) -> Trit {
        Trit::clamp_i8(self.to_i8() * other.to_i8())
    }
}

impl Neg for Trit {
    type Output = Self;
    fn neg(self) -> Self::Output {
        match self {
            Trit::N => Trit::P,
            Trit::Z => Trit::Z,
            Trit::P => Trit::N,
        }
    }
}

impl fmt::Display for Trit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trit::N => write!(f, "-"),
            Trit::Z => write!(f, "0"),
            Trit::P => write!(f, "+"),
        }
    }
}
