//! Intcode common types and instruction decoding.
//!
//! This crate provides the foundational data structures shared by the
//! machine, the assembler and the cluster harness:
//!
//! - [`Program`]: a sequence of signed cells, parsed from comma-separated text
//! - [`Opcode`]: the ten operations of the instruction set
//! - [`Mode`]: parameter addressing modes (position, immediate, relative)
//! - [`Instruction`]: an opcode cell split into opcode and per-parameter modes
//! - [`DecodeError`] / [`ParseError`]: errors from decoding cells and parsing text
//!
//! Cells are `i64`. Programs exercised in practice never leave that range,
//! and arithmetic on cells wraps rather than trapping.

pub mod error;
pub mod instruction;
pub mod mode;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::{DecodeError, ParseError};
pub use instruction::Instruction;
pub use mode::Mode;
pub use opcode::Opcode;
pub use program::Program;

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy that generates a random valid Opcode.
    fn arb_opcode() -> impl Strategy<Value = Opcode> {
        prop::sample::select(&opcode::ALL_OPCODES[..])
    }

    /// Strategy that generates a random valid Mode.
    fn arb_mode() -> impl Strategy<Value = Mode> {
        prop::sample::select(&mode::ALL_MODES[..])
    }

    /// Strategy that generates a decodable Instruction: destinations never immediate.
    fn arb_instruction() -> impl Strategy<Value = Instruction> {
        (arb_opcode(), prop::array::uniform3(arb_mode())).prop_map(|(op, mut modes)| {
            if let Some(dst) = op.destination() {
                if modes[dst] == Mode::Immediate {
                    modes[dst] = Mode::Relative;
                }
            }
            for mode in modes.iter_mut().skip(op.arity()) {
                *mode = Mode::Position;
            }
            Instruction::new(op, modes)
        })
    }

    proptest! {
        /// For all decodable instructions, encode then decode produces the original.
        #[test]
        fn encode_decode_roundtrip(instr in arb_instruction()) {
            let cell = instr.encode();
            prop_assert_eq!(Instruction::decode(cell), Ok(instr));
        }

        /// Any cell either decodes or fails with one of the decode errors;
        /// decoding never panics.
        #[test]
        fn random_cell_decode(cell in any::<i64>()) {
            match Instruction::decode(cell) {
                Ok(instr) => prop_assert_eq!(instr.opcode.code(), cell % 100),
                Err(DecodeError::InvalidOpcode(_))
                | Err(DecodeError::InvalidAddressingMode { .. }) => {}
            }
        }

        /// Rendering a program and parsing it back yields the same cells.
        #[test]
        fn program_text_roundtrip(cells in prop::collection::vec(any::<i64>(), 1..64)) {
            let program = Program::new(cells);
            let text = program.to_string();
            prop_assert_eq!(Program::parse(&text), Ok(program));
        }
    }
}
