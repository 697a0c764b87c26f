//! A line-oriented assembler for the Setun-1958 opcode table: one
//! mnemonic and one operand address per line, assembled into a 9-trit
//! `K` word (5-trit address, 3-trit opcode, and the always-zero K(9)
//! address-modification trit — this assembler never emits a modified
//! instruction, only straight-line code).

use anyhow::{anyhow, Context, Result};

use setun_core::TritWord;

const MNEMONICS: &[(&str, &str)] = &[
    ("SEND_S", "+00"),
    ("ADD_S", "+0+"),
    ("SUB_S", "+0-"),
    ("MUL0", "++0"),
    ("MULP", "+++"),
    ("MULM", "++-"),
    ("XOR_S", "+-0"),
    ("SEND_R", "+-+"),
    ("HALT", "+--"),
    ("JMP0", "0+0"),
    ("JMPP", "0++"),
    ("JMPM", "0+-"),
    ("JMP", "000"),
    ("STORE_C", "00+"),
    ("STORE_F", "00-"),
    ("SEND_F", "0-0"),
    ("ADDF_C", "0-+"),
    ("ADD_F", "0--"),
    ("SHIFT", "-+0"),
    ("STORE_S", "-++"),
    ("NORM", "-+-"),
    ("TAPE", "-00"),
    ("DRUM_W", "-0+"),
    ("DRUM_R", "-0-"),
];

fn opcode_for(mnemonic: &str) -> Option<&'static str> {
    MNEMONICS
        .iter()
        .find(|(name, _)| *name == mnemonic)
        .map(|(_, op)| *op)
}

/// Assembles one `MNEMONIC ADDRESS` line into a 9-trit `K` word.
pub fn assemble_line(line: &str) -> Result<TritWord> {
    let mut parts = line.split_whitespace();
    let mnemonic = parts
        .next()
        .ok_or_else(|| anyhow!("empty instruction line"))?;
    let addr_str = parts
        .next()
        .ok_or_else(|| anyhow!("instruction {mnemonic:?} is missing its address operand"))?;

    let op = opcode_for(mnemonic).ok_or_else(|| anyhow!("unknown mnemonic {mnemonic:?}"))?;
    let addr = TritWord::from_symbolic(addr_str)
        .with_context(|| format!("invalid address operand {addr_str:?}"))?;
    if addr.len() != 5 {
        return Err(anyhow!(
            "address operand {addr_str:?} must be exactly 5 trits, got {}",
            addr.len()
        ));
    }

    let op = TritWord::from_symbolic(op).expect("built-in opcode string is well-formed");
    let mut trits = addr.as_trits().to_vec();
    trits.extend_from_slice(op.as_trits());
    trits.push(setun_core::Trit::Z);
    Ok(TritWord::from_trits(trits))
}

/// Assembles an entire source file, one instruction per non-blank,
/// non-comment (`#`) line.
pub fn assemble(source: &str) -> Result<Vec<TritWord>> {
    let mut words = Vec::new();
    for (i, line) in source.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let word = assemble_line(line).with_context(|| format!("line {}: {line:?}", i + 1))?;
        words.push(word);
    }
    Ok(words)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_send_to_s() {
        let word = assemble_line("SEND_S 00000").unwrap();
        assert_eq!(word.to_symbolic(), "00000+000");
    }

    #[test]
    fn rejects_unknown_mnemonic() {
        assert!(assemble_line("NOPE 00000").is_err());
    }

    #[test]
    fn skips_blank_and_comment_lines() {
        let words = assemble("# header\n\nJMP 00+++\n").unwrap();
        assert_eq!(words.len(), 1);
        assert_eq!(words[0].slice(1, 5).to_int(), 13);
    }
}
