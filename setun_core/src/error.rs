//! Domain errors shared by every layer of the emulator core.

use thiserror::Error;

/// Anything that can go wrong while manipulating ternary data or machine
/// state, short of the machine halting normally. Binaries wrap this in
/// `anyhow::Error` at the edges; the core crate never panics on bad input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("value {0} is not a valid trit (expected -1, 0, or 1)")]
    InvalidTritValue(i8),

    #[error("character '{0}' is not a valid trit symbol (expected '-', '0', or '+')")]
    InvalidSymbol(char),

    #[error("character '{0}' is not a valid nonary digit (expected one of W,X,Y,Z,0,1,2,3,4)")]
    InvalidNonarySymbol(char),

    #[error("value {value} does not fit in a trit word of this width (range [{min}, {max}])")]
    IntOutOfRange { value: i64, min: i64, max: i64 },

    #[error("division by zero")]
    DivisionByZero,

    #[error("program exceeds available memory: {trytes} short cells requested, {capacity} available")]
    ProgramTooLarge { trytes: usize, capacity: usize },

    #[error("assembly error: {0}")]
    Assembly(String),
}

/// Why the run loop stopped producing `Work`, surfaced as the run loop's
/// terminal status (§7). `DomainError`s are distinct from this: they are
/// always raised to the embedder, never folded into a halt.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("reserved opcode")]
    ReservedOpcode,
    #[error("i/o failure")]
    Io,
}

/// The run loop's terminal status, one-for-one with the original's
/// `WORK`/`STOP_DONE`/`STOP_OVER`/`STOP_ERROR` enum.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum HaltStatus {
    #[error("running")]
    Work,
    #[error("halted: done")]
    Done,
    #[error("halted: arithmetic overflow")]
    Overflow,
    #[error("halted: {0}")]
    Error(ErrorKind),
}

impl HaltStatus {
    pub fn is_terminal(self) -> bool {
        !matches!(self, HaltStatus::Work)
    }
}
