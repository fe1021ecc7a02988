//! Intcode assembler: translates between mnemonic text and programs.
//!
//! Each line holds an optional `label:` and then either an instruction or a
//! `DATA` directive:
//!
//! ```text
//! ; echo until the input is zero
//! loop:   IN  [value]
//!         OUT [value]
//!         JNZ [value] #loop
//!         HLT
//! value:  DATA 0
//! ```
//!
//! Operands are `#v` (immediate), `[v]` (position) or `[RB]`, `[RB+n]`,
//! `[RB-n]` (relative), where `v` is a signed decimal or a label.
//!
//! # Usage
//!
//! ```
//! use intcode_assembler::{assemble, disassemble};
//!
//! let program = assemble("OUT #7\nHLT\n").unwrap();
//! assert_eq!(program.cells, vec![104, 7, 99]);
//! assert_eq!(disassemble(&program), "OUT #7\nHLT\n");
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(program)) == program` holds for every program.
//! Cells that do not decode to a canonical instruction are emitted as `DATA`.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use std::collections::HashMap;

use intcode_common::{Instruction, Mode, Program};
use lexer::{tokenize_line, Value};
use parser::{parse_line, Body, Statement};

/// Assemble text into a program.
///
/// Labels may be used before they are defined. Returns the first error
/// encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    // Pass 1: parse every line and assign label addresses.
    let mut statements: Vec<(usize, Statement)> = Vec::new();
    let mut labels: HashMap<String, i64> = HashMap::new();
    let mut address = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        let Some(statement) = parse_line(&tokens, line_num)? else {
            continue;
        };

        if let Some(label) = &statement.label {
            if labels.insert(label.clone(), address as i64).is_some() {
                return Err(AsmError::DuplicateLabel {
                    line: line_num,
                    label: label.clone(),
                });
            }
        }
        if let Some(body) = &statement.body {
            address += body.len();
        }
        statements.push((line_num, statement));
    }

    // Pass 2: emit cells.
    let resolve = |value: &Value, line_num: usize| -> Result<i64, AsmError> {
        match value {
            Value::Literal(n) => Ok(*n),
            Value::Label(name) => {
                labels
                    .get(name)
                    .copied()
                    .ok_or_else(|| AsmError::UndefinedLabel {
                        line: line_num,
                        label: name.clone(),
                    })
            }
        }
    };

    let mut cells = Vec::with_capacity(address);
    for (line_num, statement) in &statements {
        match &statement.body {
            None => {}
            Some(Body::Data(values)) => {
                for value in values {
                    cells.push(resolve(value, *line_num)?);
                }
            }
            Some(Body::Instruction { opcode, operands }) => {
                let mut modes = [Mode::Position; 3];
                for (mode, operand) in modes.iter_mut().zip(operands) {
                    *mode = operand.mode;
                }
                cells.push(Instruction::new(*opcode, modes).encode());
                for operand in operands {
                    cells.push(resolve(&operand.value, *line_num)?);
                }
            }
        }
    }

    Ok(Program::new(cells))
}

/// Disassemble a program into canonical assembly text.
///
/// The output is flat text: one instruction per line, no labels, no
/// comments. Runs of non-instruction cells share one `DATA` line.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
