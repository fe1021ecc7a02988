//! Opcode definitions for the Intcode instruction set.
//!
//! The opcode is the low two decimal digits of an instruction cell.

use crate::error::DecodeError;

/// Identifies the operation to perform.
///
/// The `#[repr(i64)]` attribute pins each variant to its cell value.
#[repr(i64)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// `dst <- a + b`.
    Add = 1,
    /// `dst <- a * b`.
    Mul = 2,
    /// Dequeue one input into `dst`. Suspends the machine when the queue is empty.
    Input = 3,
    /// Append `a` to the output buffer.
    Output = 4,
    /// If `a != 0`, jump to `b`.
    JumpIfTrue = 5,
    /// If `a == 0`, jump to `b`.
    JumpIfFalse = 6,
    /// `dst <- (a < b) ? 1 : 0`.
    LessThan = 7,
    /// `dst <- (a == b) ? 1 : 0`.
    Equals = 8,
    /// `rb <- rb + a`.
    AdjustRelativeBase = 9,
    /// Stop execution.
    Halt = 99,
}

/// All valid opcodes, in numeric order. Useful for exhaustive testing.
pub const ALL_OPCODES: [Opcode; 10] = [
    Opcode::Add,
    Opcode::Mul,
    Opcode::Input,
    Opcode::Output,
    Opcode::JumpIfTrue,
    Opcode::JumpIfFalse,
    Opcode::LessThan,
    Opcode::Equals,
    Opcode::AdjustRelativeBase,
    Opcode::Halt,
];

impl TryFrom<i64> for Opcode {
    type Error = DecodeError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Opcode::Add),
            2 => Ok(Opcode::Mul),
            3 => Ok(Opcode::Input),
            4 => Ok(Opcode::Output),
            5 => Ok(Opcode::JumpIfTrue),
            6 => Ok(Opcode::JumpIfFalse),
            7 => Ok(Opcode::LessThan),
            8 => Ok(Opcode::Equals),
            9 => Ok(Opcode::AdjustRelativeBase),
            99 => Ok(Opcode::Halt),
            _ => Err(DecodeError::InvalidOpcode(value)),
        }
    }
}

impl Opcode {
    /// The numeric value stored in the low two digits of the cell.
    pub fn code(self) -> i64 {
        self as i64
    }

    /// Number of parameter cells following the opcode cell.
    pub fn arity(self) -> usize {
        match self {
            Opcode::Add | Opcode::Mul | Opcode::LessThan | Opcode::Equals => 3,
            Opcode::JumpIfTrue | Opcode::JumpIfFalse => 2,
            Opcode::Input | Opcode::Output | Opcode::AdjustRelativeBase => 1,
            Opcode::Halt => 0,
        }
    }

    /// Index of the parameter this operation writes to, if any.
    ///
    /// Destination parameters may not use immediate mode.
    pub fn destination(self) -> Option<usize> {
        match self {
            Opcode::Add | Opcode::Mul | Opcode::LessThan | Opcode::Equals => Some(2),
            Opcode::Input => Some(0),
            _ => None,
        }
    }

    /// Assembly mnemonic.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Opcode::Add => "ADD",
            Opcode::Mul => "MUL",
            Opcode::Input => "IN",
            Opcode::Output => "OUT",
            Opcode::JumpIfTrue => "JNZ",
            Opcode::JumpIfFalse => "JZ",
            Opcode::LessThan => "LT",
            Opcode::Equals => "EQ",
            Opcode::AdjustRelativeBase => "ARB",
            Opcode::Halt => "HLT",
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
