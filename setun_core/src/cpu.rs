//! The instruction dispatcher and fetch/modify/execute run loop.

use log::{debug, info, trace};

use crate::arith;
use crate::control::{control_trs, next_address};
use crate::error::{ErrorKind, HaltStatus};
use crate::io::{IoError, TapeDevice};
use crate::memory::{drum_read, drum_write, Drum, Fram};
use crate::registers::Registers;
use crate::trit::Trit;
use crate::word::{range_for_width, TritWord};

const S_WIDTH: usize = 18;
const F_WIDTH: usize = 5;
const ADDR_WIDTH: i64 = 5;

/// Owns all machine state: registers, FRAM, drum, and the optional tape
/// device backing the `-00` opcode. Single-threaded and synchronous, per
/// the concurrency model: nothing here suspends or blocks.
pub struct Cpu {
    pub regs: Registers,
    pub fram: Fram,
    pub drum: Drum,
    pub tape: Option<Box<dyn TapeDevice>>,
}

impl Cpu {
    pub fn new() -> Self {
        Cpu {
            regs: Registers::new(),
            fram: Fram::new(),
            drum: Drum::new(),
            tape: None,
        }
    }

    pub fn with_tape(tape: Box<dyn TapeDevice>) -> Self {
        Cpu {
            tape: Some(tape),
            ..Cpu::new()
        }
    }

    /// Writes a short (9-trit) cell directly, bypassing the run loop; used
    /// by program loaders and tests to seed FRAM before `run`.
    pub fn poke_short(&mut self, addr: &TritWord, v: &TritWord) {
        self.fram.st_short(addr, v);
    }

    /// Writes a long (18-trit) cell directly.
    pub fn poke_long(&mut self, addr: &TritWord, v: &TritWord) {
        self.fram.st_long(addr, v);
    }

    /// Runs fetch/modify/execute until a terminal `HaltStatus`. `C` must
    /// already hold the starting address.
    pub fn run(&mut self) -> HaltStatus {
        loop {
            let status = self.step();
            if status.is_terminal() {
                info!("halted: {status:?}");
                return status;
            }
        }
    }

    /// One fetch/modify/execute cycle (§4.9). Returns `HaltStatus::Work`
    /// to continue, any other value to stop.
    pub fn step(&mut self) -> HaltStatus {
        let k = self.fram.ld_short(&self.regs.c);
        self.regs.set_k(&k);

        let ka = control_trs(&self.regs.k, &self.regs.f);
        let op = ka.slice(6, 8);
        let addr = ka.slice(1, 5);

        trace!(
            "fetch C={} K={} op={} addr={}",
            self.regs.c, k, op, addr
        );

        self.execute(&addr, &op)
    }

    fn load_operand(&self, addr: &TritWord) -> TritWord {
        if addr.get_trit(ADDR_WIDTH) == Trit::N {
            self.fram.ld_long(addr)
        } else {
            self.fram.ld_short(addr)
        }
    }

    fn store_operand(&mut self, addr: &TritWord, v: &TritWord) {
        if addr.get_trit(ADDR_WIDTH) == Trit::N {
            self.fram.st_long(addr, v);
        } else {
            self.fram.st_short(addr, v);
        }
    }

    fn advance(&mut self) {
        let next = next_address(&self.regs.c);
        self.regs.set_c(&next);
    }

    /// Reduces a wide intermediate value back into an 18-trit `S`-width
    /// word, or signals overflow if it doesn't fit (§4.2, §7 rule 1).
    fn reduce_to_s(value: i64) -> Option<TritWord> {
        let (min, max) = range_for_width(S_WIDTH);
        if value < min || value > max {
            None
        } else {
            Some(TritWord::from_int(value, S_WIDTH).expect("checked range"))
        }
    }

    fn execute(&mut self, addr: &TritWord, op: &TritWord) -> HaltStatus {
        let opcode = (op.get_trit(1), op.get_trit(2), op.get_trit(3));
        use Trit::*;

        debug!("execute opcode={:?} addr={}", opcode, addr);

        match opcode {
            // +00 Send to S
            (P, Z, Z) => {
                let v = self.load_operand(addr);
                self.regs.set_s(&v);
                self.regs.set_w_from_sign(self.regs.s.sign());
                self.advance();
                HaltStatus::Work
            }
            // +0+ Add to S
            (P, Z, P) => {
                let v = self.load_operand(addr);
                let total = self.regs.s.to_int() + v.to_int();
                match Self::reduce_to_s(total) {
                    Some(sum) => {
                        self.regs.set_s(&sum);
                        self.regs.set_w_from_sign(self.regs.s.sign());
                        self.advance();
                        HaltStatus::Work
                    }
                    None => HaltStatus::Overflow,
                }
            }
            // +0- Subtract in S
            (P, Z, N) => {
                let v = self.load_operand(addr);
                let total = self.regs.s.to_int() - v.to_int();
                match Self::reduce_to_s(total) {
                    Some(diff) => {
                        self.regs.set_s(&diff);
                        self.regs.set_w_from_sign(self.regs.s.sign());
                        self.advance();
                        HaltStatus::Work
                    }
                    None => HaltStatus::Overflow,
                }
            }
            // ++0 Multiply 0: R <- S; S <- [A*] * R
            (P, P, Z) => {
                let v = self.load_operand(addr);
                let prev_s = self.regs.s.clone();
                self.regs.set_r(&prev_s);
                let product = v.to_int() * self.regs.r.to_int();
                match Self::reduce_to_s(product) {
                    Some(s) => {
                        self.regs.set_s(&s);
                        self.regs.set_w_from_sign(self.regs.s.sign());
                        self.advance();
                        HaltStatus::Work
                    }
                    None => HaltStatus::Overflow,
                }
            }
            // +++ Multiply +: S <- S + [A*] * R
            (P, P, P) => {
                let v = self.load_operand(addr);
                let total = self.regs.s.to_int() + v.to_int() * self.regs.r.to_int();
                match Self::reduce_to_s(total) {
                    Some(s) => {
                        self.regs.set_s(&s);
                        self.regs.set_w_from_sign(self.regs.s.sign());
                        self.advance();
                        HaltStatus::Work
                    }
                    None => HaltStatus::Overflow,
                }
            }
            // ++- Multiply -: S <- [A*] + S * R
            (P, P, N) => {
                let v = self.load_operand(addr);
                let total = v.to_int() + self.regs.s.to_int() * self.regs.r.to_int();
                match Self::reduce_to_s(total) {
                    Some(s) => {
                        self.regs.set_s(&s);
                        self.regs.set_w_from_sign(self.regs.s.sign());
                        self.advance();
                        HaltStatus::Work
                    }
                    None => HaltStatus::Overflow,
                }
            }
            // +-0 Ternary XOR with S
            (P, N, Z) => {
                let v = self.load_operand(addr);
                let result = arith::xor(&v, &self.regs.s);
                self.regs.set_s(&result);
                self.regs.set_w_from_sign(self.regs.s.sign());
                self.advance();
                HaltStatus::Work
            }
            // +-+ Send to R (W updates from S, not from R)
            (P, N, P) => {
                let v = self.load_operand(addr);
                self.regs.set_r(&v);
                self.regs.set_w_from_sign(self.regs.s.sign());
                self.advance();
                HaltStatus::Work
            }
            // +-- Halt with load to R
            (P, N, N) => {
                let v = self.load_operand(addr);
                self.regs.set_r(&v);
                HaltStatus::Done
            }
            // 0+0 Conditional jump =0
            (Z, P, Z) => {
                if self.regs.w.get_trit(1).is_zero() {
                    self.regs.set_c(addr);
                } else {
                    self.advance();
                }
                HaltStatus::Work
            }
            // 0++ Conditional jump =+
            (Z, P, P) => {
                if self.regs.w.get_trit(1) == P {
                    self.regs.set_c(addr);
                } else {
                    self.advance();
                }
                HaltStatus::Work
            }
            // 0+- Conditional jump =-
            (Z, P, N) => {
                if self.regs.w.get_trit(1) == N {
                    self.regs.set_c(addr);
                } else {
                    self.advance();
                }
                HaltStatus::Work
            }
            // 000 Unconditional jump
            (Z, Z, Z) => {
                self.regs.set_c(addr);
                HaltStatus::Work
            }
            // 00+ Store C (high 5 trits of target)
            (Z, Z, P) => {
                let existing = self.load_operand(addr);
                let mut trits = existing.as_trits().to_vec();
                for i in 0..5 {
                    trits[i] = self.regs.c.get_trit((i + 1) as i64);
                }
                self.store_operand(addr, &TritWord::from_trits(trits));
                self.advance();
                HaltStatus::Work
            }
            // 00- Store F
            (Z, Z, N) => {
                self.store_operand(addr, &self.regs.f.clone());
                self.regs.set_w_from_sign(self.regs.f.sign());
                self.advance();
                HaltStatus::Work
            }
            // 0-0 Send to F
            (Z, N, Z) => {
                let v = self.load_operand(addr);
                self.regs.set_f(&v.slice(1, F_WIDTH as i64));
                self.regs.set_w_from_sign(self.regs.f.sign());
                self.advance();
                HaltStatus::Work
            }
            // 0-+ Add to F via C
            (Z, N, P) => {
                let v = self.load_operand(addr);
                let (sum, _carry) = arith::add(&self.regs.c, &v.slice(1, F_WIDTH as i64));
                self.regs.set_f(&sum);
                self.regs.set_w_from_sign(self.regs.f.sign());
                self.advance();
                HaltStatus::Work
            }
            // 0-- Add to F
            (Z, N, N) => {
                let v = self.load_operand(addr);
                let (sum, _carry) = arith::add(&self.regs.f, &v.slice(1, F_WIDTH as i64));
                self.regs.set_f(&sum);
                self.regs.set_w_from_sign(self.regs.f.sign());
                self.advance();
                HaltStatus::Work
            }
            // -+0 Shift S by (A*)
            (N, P, Z) => {
                let v = self.load_operand(addr);
                let shifted = arith::shift(&self.regs.s, v.to_int());
                self.regs.set_s(&shifted);
                self.regs.set_w_from_sign(self.regs.s.sign());
                self.advance();
                HaltStatus::Work
            }
            // -++ Store S
            (N, P, P) => {
                self.store_operand(addr, &self.regs.s.clone());
                self.regs.set_w_from_sign(self.regs.s.sign());
                self.advance();
                HaltStatus::Work
            }
            // -+- Normalise
            (N, P, N) => {
                self.op_normalize(addr);
                self.regs.set_w_from_sign(self.regs.s.sign());
                self.advance();
                HaltStatus::Work
            }
            // -00 I/O (tape)
            (N, Z, Z) => match self.op_tape(addr) {
                Ok(()) => {
                    self.advance();
                    HaltStatus::Work
                }
                Err(_) => HaltStatus::Error(ErrorKind::Io),
            },
            // -0+ Drum write
            (N, Z, P) => {
                drum_write(&self.fram, addr, &mut self.drum, &self.regs.mb);
                self.advance();
                HaltStatus::Work
            }
            // -0- Drum read
            (N, Z, N) => {
                drum_read(&self.drum, &self.regs.mb, &mut self.fram, addr);
                self.advance();
                HaltStatus::Work
            }
            // Reserved
            (N, N, Z) | (N, N, P) | (N, N, N) => HaltStatus::Error(ErrorKind::ReservedOpcode),
        }
    }

    /// `-+-` Normalise: shift `S` left/right so trits 1,2 read `(0,+1)` or
    /// `(0,-1)`, write the shifted word to `[A*]`, and set `S` to the
    /// signed trit count moved (+ for a right shift, - for a left shift).
    /// If `S` is already normalised or zero, `[A*]` gets the original `S`
    /// and `S` becomes 0.
    fn op_normalize(&mut self, addr: &TritWord) {
        let s = self.regs.s.clone();
        if s.is_zero() || (s.get_trit(1).is_zero() && !s.get_trit(2).is_zero()) {
            self.store_operand(addr, &s);
            self.regs.set_s(&TritWord::zero(S_WIDTH));
            return;
        }

        // Locate the most-significant non-zero trit at position p and bring
        // it to position 2 directly: n = -(p - 2) (positive = right, toward
        // LSB; negative = left, toward MSB). Searching by ascending shift
        // magnitude instead would stop at the first candidate that clears
        // trit 1, which can land a *lower* non-zero trit in position 2 and
        // silently discard the true MSB when S has more than one non-zero
        // trit with a gap between them.
        let width = s.len() as i64;
        let p = (1..=width)
            .find(|&i| !s.get_trit(i).is_zero())
            .expect("s is non-zero, checked above");
        let n = -(p - 2);

        let shifted = arith::shift(&s, n);
        self.store_operand(addr, &shifted);
        self.regs
            .set_s(&TritWord::from_int(n, S_WIDTH).expect("shift count fits 18 trits"));
    }

    fn op_tape(&mut self, addr: &TritWord) -> Result<(), IoError> {
        let code = self.regs.s.slice(1, 5);
        let tape = self
            .tape
            .as_mut()
            .ok_or_else(|| IoError::Device("no tape device attached".into()))?;
        if code.sign() == Trit::N {
            let word = tape.read_word()?;
            self.store_operand(addr, &word);
        } else {
            let word = self.load_operand(addr);
            tape.write_word(&word)?;
        }
        Ok(())
    }
}

impl Default for Cpu {
    fn default() -> Self {
        Self::new()
    }
}
