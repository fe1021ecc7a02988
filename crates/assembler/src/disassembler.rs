//! Disassembler: program → canonical assembly text.
//!
//! Linear sweep from address 0. A cell is printed as an instruction only if
//! it decodes, re-encodes to the same value, and all of its parameter cells
//! exist; otherwise it is data. Consecutive data cells share a `DATA` line.

use crate::parser::DATA;
use intcode_common::{Instruction, Mode, Program};

/// Disassemble a program into canonical assembly text.
///
/// The output is guaranteed to reassemble to an identical program
/// (`assemble(disassemble(program)) == program`).
pub fn disassemble(program: &Program) -> String {
    let cells = &program.cells;
    let mut lines = Vec::new();
    let mut data: Vec<i64> = Vec::new();
    let mut i = 0;

    while i < cells.len() {
        match canonical_instruction(cells, i) {
            Some(instr) => {
                flush_data(&mut data, &mut lines);
                let mut line = instr.opcode.mnemonic().to_string();
                for param in 0..instr.arity() {
                    line.push(' ');
                    line.push_str(&format_operand(instr.mode(param), cells[i + 1 + param]));
                }
                lines.push(line);
                i += instr.len();
            }
            None => {
                data.push(cells[i]);
                i += 1;
            }
        }
    }
    flush_data(&mut data, &mut lines);

    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}

fn canonical_instruction(cells: &[i64], at: usize) -> Option<Instruction> {
    let instr = Instruction::decode(cells[at]).ok()?;
    (instr.encode() == cells[at] && at + instr.len() <= cells.len()).then_some(instr)
}

fn format_operand(mode: Mode, value: i64) -> String {
    match mode {
        Mode::Position => format!("[{value}]"),
        Mode::Immediate => format!("#{value}"),
        Mode::Relative if value == 0 => "[RB]".to_string(),
        Mode::Relative => format!("[RB{value:+}]"),
    }
}

fn flush_data(data: &mut Vec<i64>, lines: &mut Vec<String>) {
    if data.is_empty() {
        return;
    }
    let values: Vec<String> = data.iter().map(i64::to_string).collect();
    lines.push(format!("{DATA} {}", values.join(" ")));
    data.clear();
}
