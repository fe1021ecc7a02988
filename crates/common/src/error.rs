//! Decode and parse errors for Intcode programs.

use thiserror::Error;

/// Errors that occur while decoding an instruction cell.
///
/// These carry no location; the machine attaches the instruction pointer
/// when it surfaces them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The low two digits of the cell name no known operation.
    #[error("invalid opcode: {0}")]
    InvalidOpcode(i64),

    /// A mode digit is outside {0, 1, 2}, or a destination uses immediate mode.
    #[error("invalid addressing mode {mode} for parameter {param}")]
    InvalidAddressingMode { mode: i64, param: usize },
}

/// Errors from reading the comma-separated program text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token could not be read as a signed integer.
    #[error("malformed program: invalid integer '{token}' at position {position}")]
    MalformedProgram { position: usize, token: String },
}
