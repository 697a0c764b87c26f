//! The synchronous I/O callback contract backing the `-00` tape opcode.
//!
//! The concrete tape (a file, an in-memory fixture, a UI widget) is an
//! external collaborator per the core's scope; `setun_core` only owns the
//! trait the interpreter calls through.

use crate::word::TritWord;

/// A finite, order-preserving stream of 9-trit words in each direction.
/// Both directions may fail; a failure maps to `ErrorKind::Io` and halts
/// the machine (§5, §7).
pub trait TapeDevice {
    fn read_word(&mut self) -> Result<TritWord, IoError>;
    fn write_word(&mut self, word: &TritWord) -> Result<(), IoError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IoError {
    #[error("tape exhausted")]
    Exhausted,
    #[error("tape device error: {0}")]
    Device(String),
}
