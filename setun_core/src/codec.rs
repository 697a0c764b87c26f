//! Ternary codecs: the symbolic string and signed-integer conversions
//! live directly on [`TritWord`] (`from_symbolic`/`to_symbolic`,
//! `from_int`/`to_int`); this module adds the 9-symbol "nonary" code
//! (alphabet `W,X,Y,Z,0,1,2,3,4` = -4..+4) that packs a pair of trits per
//! character, used by the program-load text format and the instruction
//! dump (both implemented as file-format consumers in `setun_emu`, which
//! is the only place this codec's output is ever parsed or printed).

use crate::error::DomainError;
use crate::trit::Trit;
use crate::word::TritWord;

const NONARY_ALPHABET: [char; 9] = ['W', 'X', 'Y', 'Z', '0', '1', '2', '3', '4'];

/// Encodes one pair of trits (high, low) as a single nonary character:
/// value = `high*3 + low`, ranging over `[-4, 4]`.
pub fn pair_to_nonary(high: Trit, low: Trit) -> char {
    let value = high.to_i8() as i32 * 3 + low.to_i8() as i32;
    NONARY_ALPHABET[(value + 4) as usize]
}

/// Decodes a nonary character back into its (high, low) trit pair.
pub fn nonary_to_pair(c: char) -> Result<(Trit, Trit), DomainError> {
    let index = NONARY_ALPHABET
        .iter()
        .position(|&a| a == c)
        .ok_or(DomainError::InvalidNonarySymbol(c))?;
    let value = index as i32 - 4;
    let high = value.div_euclid(3);
    let low = value - high * 3;
    Ok((
        Trit::from_i8(high as i8).expect("high trit in range"),
        Trit::from_i8(low as i8).expect("low trit in range"),
    ))
}

/// Renders a trit word as nonary characters, two trits per character,
/// scanning from the MSB. An odd-length word's final character encodes
/// its last trit as the high half with an implicit zero low trit.
pub fn word_to_nonary(word: &TritWord) -> String {
    let trits = word.as_trits();
    let mut out = String::with_capacity(trits.len().div_ceil(2));
    let mut chunks = trits.chunks(2);
    while let Some(chunk) = chunks.next() {
        let high = chunk[0];
        let low = chunk.get(1).copied().unwrap_or(Trit::Z);
        out.push(pair_to_nonary(high, low));
    }
    out
}

/// Parses a nonary string into a trit word of exactly `length` trits,
/// discarding the final character's implicit zero low trit when `length`
/// is odd.
pub fn nonary_to_word(s: &str, length: usize) -> Result<TritWord, DomainError> {
    let mut trits = Vec::with_capacity(s.chars().count() * 2);
    for c in s.chars() {
        let (high, low) = nonary_to_pair(c)?;
        trits.push(high);
        trits.push(low);
    }
    trits.truncate(length);
    Ok(TritWord::from_trits(trits))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pair_roundtrip_covers_full_alphabet() {
        for &h in &[Trit::N, Trit::Z, Trit::P] {
            for &l in &[Trit::N, Trit::Z, Trit::P] {
                let c = pair_to_nonary(h, l);
                assert_eq!(nonary_to_pair(c).unwrap(), (h, l));
            }
        }
    }

    #[test]
    fn unknown_symbol_is_rejected() {
        assert!(nonary_to_pair('Q').is_err());
    }

    #[test]
    fn word_nonary_roundtrip_nine_trit_code() {
        let w = TritWord::from_symbolic("+0-0+0-00").unwrap();
        let text = word_to_nonary(&w);
        assert_eq!(text.chars().count(), 5);
        let back = nonary_to_word(&text, 9).unwrap();
        assert_eq!(back.to_symbolic(), w.to_symbolic());
    }
}
