//! Runtime errors for the Intcode machine.
//!
//! Every error that comes from an instruction carries the address of that
//! instruction (`at`). All of them are fatal to the machine that raised them.

use intcode_common::DecodeError;
use thiserror::Error;

/// Errors that occur during program execution.
///
/// A suspension on empty input is not an error, and neither is halting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// The low two digits of the instruction cell name no operation.
    #[error("invalid opcode {opcode} at address {at}")]
    InvalidOpcode { at: usize, opcode: i64 },

    /// A mode digit outside {0, 1, 2}, or an immediate-mode destination.
    #[error("invalid addressing mode {mode} for parameter {param} at address {at}")]
    InvalidAddressingMode { at: usize, mode: i64, param: usize },

    /// A read, write or jump resolved to a negative address.
    #[error("negative address {address} accessed by instruction at {at}")]
    NegativeAddress { at: usize, address: i64 },

    /// The machine already failed and cannot be resumed.
    #[error("machine faulted earlier: {0}")]
    Faulted(Box<RuntimeError>),
}

impl RuntimeError {
    /// Attach the instruction address to a decode failure.
    pub(crate) fn decode(at: usize, err: DecodeError) -> Self {
        match err {
            DecodeError::InvalidOpcode(opcode) => RuntimeError::InvalidOpcode { at, opcode },
            DecodeError::InvalidAddressingMode { mode, param } => {
                RuntimeError::InvalidAddressingMode { at, mode, param }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formats() {
        assert_eq!(
            RuntimeError::InvalidOpcode { at: 4, opcode: 42 }.to_string(),
            "invalid opcode 42 at address 4"
        );
        assert_eq!(
            RuntimeError::InvalidAddressingMode {
                at: 0,
                mode: 1,
                param: 2
            }
            .to_string(),
            "invalid addressing mode 1 for parameter 2 at address 0"
        );
        assert_eq!(
            RuntimeError::NegativeAddress { at: 8, address: -3 }.to_string(),
            "negative address -3 accessed by instruction at 8"
        );
    }

    #[test]
    fn faulted_wraps_original() {
        let original = RuntimeError::InvalidOpcode { at: 0, opcode: 0 };
        let e = RuntimeError::Faulted(Box::new(original));
        assert_eq!(
            e.to_string(),
            "machine faulted earlier: invalid opcode 0 at address 0"
        );
    }

    #[test]
    fn decode_errors_gain_location() {
        assert_eq!(
            RuntimeError::decode(7, DecodeError::InvalidOpcode(13)),
            RuntimeError::InvalidOpcode { at: 7, opcode: 13 }
        );
        assert_eq!(
            RuntimeError::decode(2, DecodeError::InvalidAddressingMode { mode: 5, param: 1 }),
            RuntimeError::InvalidAddressingMode {
                at: 2,
                mode: 5,
                param: 1
            }
        );
    }
}
