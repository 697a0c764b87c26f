//! Core emulation library for the Setun-1958 balanced-ternary machine:
//! the trit/word primitive, ternary arithmetic, the nonary codec,
//! memory decoder, register file, address modification, and the
//! instruction dispatcher/run loop.
//!
//! Program loading, diagnostics, and the typewriter/tape collaborators
//! live in the binary crates that embed this library, not here.

pub mod arith;
pub mod codec;
pub mod control;
pub mod cpu;
pub mod error;
pub mod io;
pub mod memory;
pub mod registers;
pub mod trit;
pub mod word;

pub use cpu::Cpu;
pub use error::{DomainError, ErrorKind, HaltStatus};
pub use registers::Registers;
pub use trit::Trit;
pub use word::TritWord;
