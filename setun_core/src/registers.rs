//! The register file: K, F, C, W, S, R, MB, MR.

use serde::{Deserialize, Serialize};

use crate::trit::Trit;
use crate::word::TritWord;

pub const K_WIDTH: usize = 9;
pub const F_WIDTH: usize = 5;
pub const C_WIDTH: usize = 5;
pub const W_WIDTH: usize = 1;
pub const S_WIDTH: usize = 18;
pub const R_WIDTH: usize = 18;
pub const MB_WIDTH: usize = 4;

/// The eight architectural registers, each a fixed-width `TritWord`.
/// Assigning a value of a different width re-aligns it per the promotion
/// rule (see `TritWord::aligned_to`) rather than panicking.
#[derive(Clone, Serialize, Deserialize)]
pub struct Registers {
    pub k: TritWord,
    pub f: TritWord,
    pub c: TritWord,
    pub w: TritWord,
    pub s: TritWord,
    pub r: TritWord,
    pub mb: TritWord,
    pub mr: TritWord,
}

impl Registers {
    pub fn new() -> Self {
        Registers {
            k: TritWord::zero(K_WIDTH),
            f: TritWord::zero(F_WIDTH),
            c: TritWord::zero(C_WIDTH),
            w: TritWord::zero(W_WIDTH),
            s: TritWord::zero(S_WIDTH),
            r: TritWord::zero(R_WIDTH),
            mb: TritWord::zero(MB_WIDTH),
            mr: TritWord::zero(K_WIDTH),
        }
    }

    pub fn set_k(&mut self, v: &TritWord) {
        self.k = v.aligned_to(K_WIDTH);
    }

    pub fn set_f(&mut self, v: &TritWord) {
        self.f = v.aligned_to(F_WIDTH);
    }

    pub fn set_c(&mut self, v: &TritWord) {
        self.c = v.aligned_to(C_WIDTH);
    }

    /// `W` is set explicitly by the dispatcher per the opcode table's
    /// "Updates W from" column, not automatically on every register write:
    /// e.g. "Send to R" leaves W alone even though R just changed.
    pub fn set_w_from_sign(&mut self, sign: Trit) {
        self.w = TritWord::from_trits(vec![sign]);
    }

    pub fn set_s(&mut self, v: &TritWord) {
        self.s = v.aligned_to(S_WIDTH);
    }

    pub fn set_r(&mut self, v: &TritWord) {
        self.r = v.aligned_to(R_WIDTH);
    }

    pub fn set_mb(&mut self, v: &TritWord) {
        self.mb = v.aligned_to(MB_WIDTH);
    }

    /// `MR` latches whatever width the last memory transfer used (9 for a
    /// short cell, 18 for a long cell).
    pub fn set_mr(&mut self, v: TritWord) {
        self.mr = v;
    }

    pub fn reset(&mut self) {
        *self = Registers::new();
    }
}

impl Default for Registers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_registers_are_zero_at_their_widths() {
        let regs = Registers::new();
        assert_eq!(regs.k.len(), K_WIDTH);
        assert_eq!(regs.s.len(), S_WIDTH);
        assert!(regs.s.is_zero());
    }

    #[test]
    fn set_w_from_sign_is_explicit() {
        let mut regs = Registers::new();
        regs.set_s(&TritWord::from_int(-5, S_WIDTH).unwrap());
        regs.set_w_from_sign(regs.s.sign());
        assert_eq!(regs.w.get_trit(1), Trit::N);

        regs.set_s(&TritWord::zero(S_WIDTH));
        regs.set_w_from_sign(regs.s.sign());
        assert_eq!(regs.w.get_trit(1), Trit::Z);
    }

    #[test]
    fn assigning_narrower_value_left_aligns() {
        let mut regs = Registers::new();
        let short = TritWord::from_symbolic("+0-").unwrap();
        regs.set_s(&short);
        assert_eq!(regs.s.to_symbolic(), "+0-000000000000000");
    }
}
