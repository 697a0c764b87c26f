//! Variable-width balanced ternary words.
//!
//! Unlike a fixed-size `[Trit; N]`, every [`TritWord`] carries its own
//! length, since the machine's registers (K, F, C, S, R, ...) all have
//! different widths and the arithmetic/logic operations are parameterised
//! over operand width (spec: every trit word carries its length explicitly).
//!
//! Trit index 1 is the most significant; index `L` is the least
//! significant, matching the machine's own notation (`A(1:5)`, `K(6:8)`, ...).

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::trit::Trit;

/// A sequence of trits with explicit length `L`, MSB (index 1) first.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TritWord {
    trits: Vec<Trit>,
}

impl TritWord {
    /// Construct a word of width `len`, all zero.
    pub fn zero(len: usize) -> Self {
        TritWord {
            trits: vec![Trit::Z; len],
        }
    }

    /// Construct directly from a vector of trits, MSB first.
    pub fn from_trits(trits: Vec<Trit>) -> Self {
        TritWord { trits }
    }

    /// Number of trits in this word.
    #[inline]
    pub fn len(&self) -> usize {
        self.trits.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trits.is_empty()
    }

    /// The raw MSB-first trit slice.
    #[inline]
    pub fn as_trits(&self) -> &[Trit] {
        &self.trits
    }

    /// Read the trit at 1-based position `pos` (MSB = 1). Returns `Trit::Z`
    /// for any position outside `[1, L]`; this never fails.
    #[inline]
    pub fn get_trit(&self, pos: i64) -> Trit {
        if pos < 1 || pos as usize > self.trits.len() {
            return Trit::Z;
        }
        self.trits[pos as usize - 1]
    }

    /// Write the trit at 1-based position `pos`. Out-of-range positions are
    /// a silent no-op per the spec contract.
    #[inline]
    pub fn set_trit(&mut self, pos: i64, v: Trit) {
        if pos < 1 || pos as usize > self.trits.len() {
            return;
        }
        self.trits[pos as usize - 1] = v;
    }

    /// Write the trit at 1-based position `pos` from a raw integer value,
    /// rejecting values outside `{-1,0,1}` with a domain error (the
    /// alternative, spec-sanctioned behaviour is to clamp; this
    /// implementation always rejects so callers can rely on one contract).
    pub fn set_trit_checked(&mut self, pos: i64, v: i8) -> Result<(), DomainError> {
        let trit = Trit::from_i8(v).ok_or(DomainError::InvalidTritValue(v))?;
        self.set_trit(pos, trit);
        Ok(())
    }

    /// The sign of the highest non-zero trit, scanning from the MSB; zero
    /// if the word is entirely zero.
    pub fn sign(&self) -> Trit {
        for &t in &self.trits {
            if !t.is_zero() {
                return t;
            }
        }
        Trit::Z
    }

    pub fn is_zero(&self) -> bool {
        self.trits.iter().all(|t| t.is_zero())
    }

    /// Extract trits `p1..=p2` (1-based, inclusive) as a new word of width
    /// `p2 - p1 + 1`. Any out-of-range request yields an empty word.
    pub fn slice(&self, p1: i64, p2: i64) -> TritWord {
        if p1 < 1 || p2 < p1 || p2 > self.trits.len() as i64 {
            return TritWord::from_trits(Vec::new());
        }
        TritWord::from_trits(self.trits[(p1 as usize - 1)..(p2 as usize)].to_vec())
    }

    /// Re-align `self` to width `len` per the promotion rule: a narrower
    /// source occupies the MS trits of the result and the LS trits are
    /// zero-filled; a wider source has its LS `(L_src - len)` trits
    /// discarded. This models "short word read into the high half of a
    /// long register", not the more intuitive numeric right-alignment.
    pub fn aligned_to(&self, len: usize) -> TritWord {
        let mut out = vec![Trit::Z; len];
        let copy_len = self.trits.len().min(len);
        out[..copy_len].copy_from_slice(&self.trits[..copy_len]);
        TritWord::from_trits(out)
    }

    /// Convert to a signed integer: `sum(t_i * 3^(L-i))`.
    pub fn to_int(&self) -> i64 {
        let mut value: i64 = 0;
        for &t in &self.trits {
            value = value * 3 + t.to_i8() as i64;
        }
        value
    }

    /// Construct a width-`len` word from a signed integer, failing if the
    /// value does not fit in `len` trits.
    pub fn from_int(mut value: i64, len: usize) -> Result<Self, DomainError> {
        let (min, max) = range_for_width(len);
        if value < min || value > max {
            return Err(DomainError::IntOutOfRange { value, min, max });
        }

        let mut trits = vec![Trit::Z; len];
        for slot in trits.iter_mut().rev() {
            let rem = value % 3;
            let (trit, carry) = match rem {
                0 => (Trit::Z, 0),
                1 => (Trit::P, 0),
                -1 => (Trit::N, 0),
                2 => (Trit::N, 1),
                -2 => (Trit::P, -1),
                _ => unreachable!("trit remainder out of [-2,2]: {rem}"),
            };
            *slot = trit;
            value = value / 3 + carry;
        }
        Ok(TritWord::from_trits(trits))
    }

    /// Parse a symbolic string over `{'-','0','+'}`, leftmost character is
    /// the most significant trit.
    pub fn from_symbolic(s: &str) -> Result<Self, DomainError> {
        let mut trits = Vec::with_capacity(s.len());
        for c in s.chars() {
            let trit = match c {
                '-' | '−' => Trit::N,
                '0' => Trit::Z,
                '+' => Trit::P,
                other => return Err(DomainError::InvalidSymbol(other)),
            };
            trits.push(trit);
        }
        Ok(TritWord::from_trits(trits))
    }

    /// Render back to the `{'-','0','+'}` symbolic form.
    pub fn to_symbolic(&self) -> String {
        self.trits.iter().map(|t| t.to_string()).collect()
    }
}

/// `[MIN(L), MAX(L)]` for a trit word of width `len`: `(3^len - 1) / 2`.
pub fn range_for_width(len: usize) -> (i64, i64) {
    let max = (0..len).fold(0i64, |acc, _| acc * 3 + 1);
    (-max, max)
}

impl fmt::Debug for TritWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TritWord({} = {})", self.to_symbolic(), self.to_int())
    }
}

impl fmt::Display for TritWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_symbolic())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_set_roundtrip() {
        let mut w = TritWord::zero(9);
        for pos in 1..=9 {
            for v in [Trit::N, Trit::Z, Trit::P] {
                w.set_trit(pos, v);
                assert_eq!(w.get_trit(pos), v);
            }
        }
    }

    #[test]
    fn out_of_range_get_is_zero_and_set_is_noop() {
        let mut w = TritWord::from_symbolic("+0-").unwrap();
        assert_eq!(w.get_trit(0), Trit::Z);
        assert_eq!(w.get_trit(4), Trit::Z);
        w.set_trit(0, Trit::P);
        w.set_trit(10, Trit::P);
        assert_eq!(w.to_symbolic(), "+0-");
    }

    #[test]
    fn to_int_from_int_roundtrip() {
        for v in [-9841i64, -42, -1, 0, 1, 42, 9841] {
            let w = TritWord::from_int(v, 9).unwrap();
            assert_eq!(w.to_int(), v);
            let w2 = TritWord::from_int(w.to_int(), w.len()).unwrap();
            assert_eq!(w2.to_int(), w.to_int());
        }
    }

    #[test]
    fn from_int_rejects_out_of_range() {
        assert!(TritWord::from_int(9842, 9).is_err());
        assert!(TritWord::from_int(-9842, 9).is_err());
    }

    #[test]
    fn promotion_left_aligns_narrower_source() {
        let short = TritWord::from_symbolic("+0-").unwrap(); // 3 trits
        let wide = short.aligned_to(9);
        assert_eq!(wide.to_symbolic(), "+0-000000");
    }

    #[test]
    fn promotion_truncates_wider_source_from_ls_side() {
        let wide = TritWord::from_symbolic("+0-000000").unwrap();
        let narrow = wide.aligned_to(3);
        assert_eq!(narrow.to_symbolic(), "+0-");
    }

    #[test]
    fn slice_basic_and_out_of_range() {
        let w = TritWord::from_symbolic("+0-+0").unwrap();
        assert_eq!(w.slice(2, 4).to_symbolic(), "0-+");
        assert_eq!(w.slice(4, 2).len(), 0);
        assert_eq!(w.slice(1, 10).len(), 0);
    }

    #[test]
    fn sign_of_zero_is_zero() {
        assert_eq!(TritWord::zero(5).sign(), Trit::Z);
        assert_eq!(TritWord::from_symbolic("00+").unwrap().sign(), Trit::P);
        assert_eq!(TritWord::from_symbolic("00-").unwrap().sign(), Trit::N);
    }

    #[test]
    fn symbolic_roundtrip() {
        for s in ["+", "0", "-", "+0-", "+0-+0-+0-+0-+0-+0-"] {
            let w = TritWord::from_symbolic(s).unwrap();
            assert_eq!(w.to_symbolic(), s);
        }
    }
}
