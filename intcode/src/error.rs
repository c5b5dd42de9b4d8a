use {
    crate::{instruction::Opcode, machine::RunState},
    std::num::ParseIntError,
    thiserror::Error,
};

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("unknown opcode {0}")]
    UnknownOpcode(i64),

    #[error("bad mode {mode} for parameter {param}")]
    BadMode { mode: i64, param: usize },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("negative address {0}")]
    Negative(i64),

    #[error("address {addr} out of bounds (memory length {len})")]
    OutOfBounds { addr: usize, len: usize },
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("bad program token #{index} {token:?}: {source}")]
pub struct ParseError {
    pub index: usize,
    pub token: String,
    #[source]
    pub source: ParseIntError,
}

/// Everything that can stop a machine short of its halt opcode.
///
/// Errors raised while executing carry the instruction pointer of the
/// instruction that failed.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("cannot decode {word} at ip {ip}: {source}")]
    Decode { ip: usize, word: i64, #[source] source: DecodeError },

    #[error("bad memory access at ip {ip}: {source}")]
    Address { ip: usize, #[source] source: AddressError },

    #[error("input exhausted at ip {ip}")]
    InputExhausted { ip: usize },

    #[error("{opcode:?} overflowed at ip {ip}")]
    Overflow { ip: usize, opcode: Opcode },

    #[error("machine is {state} at ip {ip}")]
    NotRunnable { ip: usize, state: RunState },

    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl Error {
    /// True for errors that leave the machine untrustworthy.
    pub fn is_fatal(&self) -> bool {
        match self {
            Error::Decode   {..} | Error::Address  {..} | Error::Overflow {..} => true,
            Error::InputExhausted {..} | Error::NotRunnable {..} | Error::Parse(_) => false,
        }
    }
}
