//! Instruction decoding and encoding for Intcode cells.
//!
//! An instruction cell is a non-negative decimal number:
//! ```text
//! ... C B A O O
//!     | | | +-+- opcode (low two digits)
//!     | | +----- mode of parameter 0
//!     | +------- mode of parameter 1
//!     +--------- mode of parameter 2
//! ```
//! Mode digits beyond the opcode's arity are ignored.

use crate::error::DecodeError;
use crate::mode::Mode;
use crate::opcode::Opcode;

/// Maximum number of parameters any instruction takes.
pub const MAX_PARAMS: usize = 3;

/// A decoded instruction cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    /// The operation to perform.
    pub opcode: Opcode,
    /// Addressing mode per parameter. Entries past the arity are `Position`.
    pub modes: [Mode; MAX_PARAMS],
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(opcode: Opcode, modes: [Mode; MAX_PARAMS]) -> Self {
        Self { opcode, modes }
    }

    /// Decode one cell into an opcode and the modes of its parameters.
    pub fn decode(cell: i64) -> Result<Self, DecodeError> {
        let opcode = Opcode::try_from(cell % 100)?;

        let mut modes = [Mode::Position; MAX_PARAMS];
        let mut digits = cell / 100;
        for (param, mode) in modes.iter_mut().enumerate().take(opcode.arity()) {
            *mode = Mode::from_digit(digits % 10, param)?;
            digits /= 10;
        }

        if let Some(dst) = opcode.destination() {
            if modes[dst] == Mode::Immediate {
                return Err(DecodeError::InvalidAddressingMode {
                    mode: Mode::Immediate.digit(),
                    param: dst,
                });
            }
        }

        Ok(Self { opcode, modes })
    }

    /// Encode back to the canonical cell (no mode digits past the arity).
    pub fn encode(&self) -> i64 {
        let mut cell = 0;
        for mode in self.modes[..self.opcode.arity()].iter().rev() {
            cell = cell * 10 + mode.digit();
        }
        cell * 100 + self.opcode.code()
    }

    /// Number of parameters.
    pub fn arity(&self) -> usize {
        self.opcode.arity()
    }

    /// Number of cells the instruction occupies, opcode cell included.
    pub fn len(&self) -> usize {
        1 + self.arity()
    }

    /// Always false; every instruction occupies at least its opcode cell.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Mode of parameter `param`.
    pub fn mode(&self, param: usize) -> Mode {
        self.modes[param]
    }
}
