//! Address modification (K-driven ±F) and program-counter stepping.

use crate::arith;
use crate::trit::Trit;
use crate::word::TritWord;

const ADDR_WIDTH: usize = 5;

/// Produces the effective instruction word `Ka` from `K` and `F`:
/// `K(9) == 0` leaves the address untouched, `+1`/`-1` add/subtract `F`
/// into `K(1:5)`. The opcode trits `K(6:8)` are copied through unchanged
/// and `Ka(9)` is always cleared. Overflow in the 5-trit address
/// arithmetic wraps silently (the carry-out trit is discarded).
pub fn control_trs(k: &TritWord, f: &TritWord) -> TritWord {
    let addr = k.slice(1, ADDR_WIDTH as i64);
    let modified = match k.get_trit(9) {
        Trit::P => arith::add(&addr, f).0,
        Trit::N => arith::subtract(&addr, f).0,
        Trit::Z => addr,
    };

    let mut trits = modified.as_trits().to_vec();
    trits.push(k.get_trit(6));
    trits.push(k.get_trit(7));
    trits.push(k.get_trit(8));
    trits.push(Trit::Z);
    TritWord::from_trits(trits)
}

/// Advances `C` for the non-jump case, per the stepping policy keyed on
/// `C(5)`: 0 -> +1 (high half to low half), +1 -> +2 (low half, skipping
/// the reserved full-word slot, to the next row's high half), -1 -> +1
/// (full-word code to next row's high half). Wraps silently like
/// `control_trs`.
pub fn next_address(c: &TritWord) -> TritWord {
    let step = match c.get_trit(ADDR_WIDTH as i64) {
        Trit::Z => 1,
        Trit::P => 2,
        Trit::N => 1,
    };
    let delta = TritWord::from_int(step, c.len()).expect("step fits in address width");
    arith::add(c, &delta).0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn w(v: i64, len: usize) -> TritWord {
        TritWord::from_int(v, len).unwrap()
    }

    #[test]
    fn control_trs_zero_leaves_address_unchanged() {
        let mut k_trits = w(13, 5).as_trits().to_vec();
        k_trits.extend_from_slice(&[Trit::P, Trit::Z, Trit::P, Trit::Z]);
        let k = TritWord::from_trits(k_trits);
        let f = w(7, 5);
        let ka = control_trs(&k, &f);
        assert_eq!(ka.slice(1, 5).to_int(), 13);
        assert_eq!(ka.get_trit(6), Trit::P);
        assert_eq!(ka.get_trit(9), Trit::Z);
    }

    #[test]
    fn control_trs_plus_adds_f() {
        let mut k_trits = w(13, 5).as_trits().to_vec();
        k_trits.extend_from_slice(&[Trit::Z, Trit::Z, Trit::Z, Trit::P]);
        let k = TritWord::from_trits(k_trits);
        let f = w(7, 5);
        let ka = control_trs(&k, &f);
        assert_eq!(ka.slice(1, 5).to_int(), 20);
    }

    #[test]
    fn control_trs_minus_subtracts_f() {
        let mut k_trits = w(13, 5).as_trits().to_vec();
        k_trits.extend_from_slice(&[Trit::Z, Trit::Z, Trit::Z, Trit::N]);
        let k = TritWord::from_trits(k_trits);
        let f = w(7, 5);
        let ka = control_trs(&k, &f);
        assert_eq!(ka.slice(1, 5).to_int(), 6);
    }

    #[test]
    fn next_address_steps_by_policy() {
        assert_eq!(next_address(&w(0, 5)).to_int(), 1);
        assert_eq!(next_address(&w(1, 5)).to_int(), 3);
        assert_eq!(next_address(&w(-1, 5)).to_int(), 0);
    }
}
