//! Parameter addressing modes.

use crate::error::DecodeError;

/// How a parameter cell is turned into an operand.
#[repr(i64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    /// The parameter is an address; the operand is `memory[parameter]`.
    #[default]
    Position = 0,
    /// The parameter is the operand. Never valid for a destination.
    Immediate = 1,
    /// The parameter is an offset from the relative base.
    Relative = 2,
}

/// All modes, in digit order.
pub const ALL_MODES: [Mode; 3] = [Mode::Position, Mode::Immediate, Mode::Relative];

impl Mode {
    /// Decode a single mode digit. `param` is only used for the error.
    pub fn from_digit(digit: i64, param: usize) -> Result<Self, DecodeError> {
        match digit {
            0 => Ok(Mode::Position),
            1 => Ok(Mode::Immediate),
            2 => Ok(Mode::Relative),
            mode => Err(DecodeError::InvalidAddressingMode { mode, param }),
        }
    }

    /// The decimal digit for this mode.
    pub fn digit(self) -> i64 {
        self as i64
    }
}
