//! The program-load text format: one 9-trit FRAM cell per line, written
//! as five nonary characters, blank lines and `#`-comments ignored.

use std::collections::HashSet;

use setun_core::codec::nonary_to_word;
use setun_core::control::next_address;
use setun_core::{Cpu, DomainError, TritWord};

const SHORT_WIDTH: usize = 9;
const FRAM_SHORT_CELLS: usize = 162;

/// Loads `text` into `cpu`'s FRAM starting at `base`, advancing between
/// records with the same `next_address` stepping policy the run loop
/// uses for `C`. Returns the address one step past the last record
/// written. Errors if the record count would wrap the store before
/// every line is placed (`ProgramTooLarge`) or a line isn't valid nonary.
pub fn load_program(cpu: &mut Cpu, base: &TritWord, text: &str) -> Result<TritWord, DomainError> {
    let mut addr = base.clone();
    let mut visited = HashSet::new();
    let mut count = 0usize;

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        if count >= FRAM_SHORT_CELLS || !visited.insert(addr.to_int()) {
            return Err(DomainError::ProgramTooLarge {
                trytes: count + 1,
                capacity: FRAM_SHORT_CELLS,
            });
        }

        let word = nonary_to_word(line, SHORT_WIDTH)?;
        cpu.poke_short(&addr, &word);
        count += 1;
        addr = next_address(&addr);
    }

    Ok(addr)
}

#[cfg(test)]
mod tests {
    use super::*;
    use setun_core::codec::word_to_nonary;

    #[test]
    fn loads_sequential_records_and_reports_next_address() {
        let mut cpu = Cpu::new();
        let base = TritWord::from_symbolic("----0").unwrap();
        let w1 = TritWord::from_int(42, 9).unwrap();
        let w2 = TritWord::from_int(-7, 9).unwrap();
        let text = format!("{}\n\n# comment\n{}\n", word_to_nonary(&w1), word_to_nonary(&w2));

        let next = load_program(&mut cpu, &base, &text).unwrap();
        assert_eq!(cpu.fram.ld_short(&base).to_int(), 42);

        let second = next_address(&base);
        assert_eq!(cpu.fram.ld_short(&second).to_int(), -7);
        assert_eq!(next, next_address(&second));
    }

    #[test]
    fn rejects_invalid_nonary_text() {
        let mut cpu = Cpu::new();
        let base = TritWord::from_symbolic("----0").unwrap();
        assert!(load_program(&mut cpu, &base, "QQQQQ").is_err());
    }
}
