//! A flat-file `TapeDevice`: the input tape is read whole into memory as
//! symbolic trit words, one per line; output words are appended to a
//! second file as they're punched. Finite and order-preserving, per the
//! `-00` opcode's contract.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use setun_core::io::{IoError, TapeDevice};
use setun_core::TritWord;

pub struct FileTape {
    input: Vec<TritWord>,
    read_pos: usize,
    output_path: Option<PathBuf>,
}

impl FileTape {
    pub fn new(input_text: &str, output_path: Option<PathBuf>) -> Result<Self, IoError> {
        let mut input = Vec::new();
        for line in input_text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let word = TritWord::from_symbolic(line)
                .map_err(|e| IoError::Device(format!("malformed tape record {line:?}: {e}")))?;
            input.push(word);
        }
        Ok(FileTape {
            input,
            read_pos: 0,
            output_path,
        })
    }
}

impl TapeDevice for FileTape {
    fn read_word(&mut self) -> Result<TritWord, IoError> {
        let word = self.input.get(self.read_pos).cloned().ok_or(IoError::Exhausted)?;
        self.read_pos += 1;
        Ok(word)
    }

    fn write_word(&mut self, word: &TritWord) -> Result<(), IoError> {
        let path = self
            .output_path
            .as_ref()
            .ok_or_else(|| IoError::Device("no output tape configured".into()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| IoError::Device(e.to_string()))?;
        writeln!(file, "{}", word.to_symbolic()).map_err(|e| IoError::Device(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_words_in_order_then_exhausts() {
        let mut tape = FileTape::new("+0-\n00+\n", None).unwrap();
        assert_eq!(tape.read_word().unwrap().to_symbolic(), "+0-");
        assert_eq!(tape.read_word().unwrap().to_symbolic(), "00+");
        assert_eq!(tape.read_word(), Err(IoError::Exhausted));
    }

    #[test]
    fn write_without_output_path_is_an_error() {
        let mut tape = FileTape::new("", None).unwrap();
        assert!(tape.write_word(&TritWord::zero(9)).is_err());
    }
}
