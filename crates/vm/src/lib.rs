//! Intcode machine: executes programs that can suspend on input.
//!
//! The machine is a register machine with:
//! - A growable memory of `i64` cells that reads 0 past its end
//! - An instruction pointer and a relative base register
//! - A FIFO input queue and an append-only output buffer
//!
//! Execution runs until the program halts or executes `input` against an
//! empty queue. In the latter case the machine is suspended with its
//! instruction pointer still on the blocked instruction; feeding more input
//! with [`Machine::run`] resumes it.
//!
//! # Usage
//!
//! ```
//! use intcode_common::Program;
//! use intcode_vm::{Machine, State};
//!
//! let program = Program::parse("3,0,4,0,99").unwrap();
//! let mut machine = Machine::new();
//!
//! assert!(machine.execute(&program, []).unwrap().is_empty());
//! assert_eq!(machine.state(), State::Suspended);
//!
//! assert_eq!(machine.run([42]).unwrap(), &[42]);
//! assert_eq!(machine.state(), State::Halted);
//! ```

pub mod ascii;
pub mod error;
pub mod execute;
pub mod machine;
pub mod memory;

pub use error::RuntimeError;
pub use execute::Step;
pub use machine::{Machine, State};
pub use memory::Memory;

use intcode_common::Program;

/// Execute a program on a fresh machine and return everything it printed.
///
/// The machine may halt or suspend; either way the output produced so far
/// is returned.
///
/// # Errors
///
/// Returns [`RuntimeError`] if the program contains an invalid opcode or
/// addressing mode, or touches a negative address.
pub fn run(program: &Program, inputs: &[i64]) -> Result<Vec<i64>, RuntimeError> {
    let mut machine = Machine::new();
    machine.execute(program, inputs.iter().copied())?;
    Ok(machine.output().to_vec())
}
