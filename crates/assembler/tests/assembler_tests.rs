//! Integration tests for the Intcode assembler.
//!
//! Tests cover:
//! - Assembling small programs and executing them on the machine
//! - Roundtrip properties (disassemble → assemble for arbitrary cells)
//! - Error cases with line numbers

use intcode_assembler::{assemble, disassemble, AsmError};
use intcode_common::Program;
use intcode_vm::{run, Machine, State};
use proptest::prelude::*;

// ---- Executing assembled programs ----

#[test]
fn echo_until_zero() {
    let text = "\
; echo until the input is zero
loop:   IN  [value]
        OUT [value]
        JNZ [value] #loop
        HLT
value:  DATA 0
";
    let program = assemble(text).unwrap();
    assert_eq!(run(&program, &[4, 5, 0]).unwrap(), vec![4, 5, 0]);
}

#[test]
fn countdown_with_relative_base() {
    let text = "\
        ARB #frame
        IN  [RB]
again:  OUT [RB]
        ADD [RB] #-1 [RB]
        JNZ [RB] #again
        HLT
frame:  DATA 0
";
    let program = assemble(text).unwrap();
    assert_eq!(run(&program, &[3]).unwrap(), vec![3, 2, 1]);
}

#[test]
fn assembled_program_suspends_between_inputs() {
    let text = "\
top:    IN  [a]
        IN  [b]
        MUL [a] [b] [a]
        OUT [a]
        JZ  #0 #top
a:      DATA 0
b:      DATA 0
";
    let program = assemble(text).unwrap();
    let mut machine = Machine::new();
    assert!(machine.execute(&program, [6]).unwrap().is_empty());
    assert_eq!(machine.state(), State::Suspended);
    assert_eq!(machine.run([7]).unwrap(), &[42]);
    assert_eq!(machine.run([2, 3]).unwrap(), &[6]);
}

#[test]
fn less_than_and_equals_mnemonics() {
    let text = "\
        IN  [x]
        LT  [x] #10 [small]
        EQ  [x] #10 [ten]
        OUT [small]
        OUT [ten]
        HLT
x:      DATA 0
small:  DATA 0
ten:    DATA 0
";
    let program = assemble(text).unwrap();
    assert_eq!(run(&program, &[3]).unwrap(), vec![1, 0]);
    assert_eq!(run(&program, &[10]).unwrap(), vec![0, 1]);
}

// ---- Disassembly of known programs ----

#[test]
fn disassemble_quine() {
    let quine = Program::parse("109,1,204,-1,1001,100,1,100,1008,100,16,101,1006,101,0,99")
        .unwrap();
    let text = disassemble(&quine);
    assert_eq!(
        text,
        "\
ARB #1
OUT [RB-1]
ADD [100] #1 [100]
EQ [100] #16 [101]
JZ [101] #0
HLT
"
    );
    assert_eq!(assemble(&text).unwrap(), quine);
}

#[test]
fn lowercase_and_commas_accepted() {
    let a = assemble("add #1, #2, [0]\nhlt\n").unwrap();
    let b = assemble("ADD #1 #2 [0]\nHLT\n").unwrap();
    assert_eq!(a, b);
    assert_eq!(a.cells, vec![1101, 1, 2, 0, 99]);
}

// ---- Errors ----

#[test]
fn unknown_opcode_reports_line() {
    assert_eq!(
        assemble("HLT\nFROB #1\n"),
        Err(AsmError::UnknownOpcode {
            line: 2,
            token: "FROB".to_string()
        })
    );
}

#[test]
fn immediate_destination_reports_line() {
    assert_eq!(
        assemble("\n\nADD #1 #2 #3\n"),
        Err(AsmError::ImmediateDestination {
            line: 3,
            opcode: "ADD"
        })
    );
}

#[test]
fn invalid_number_reports_line() {
    assert!(matches!(
        assemble("DATA 99999999999999999999\n"),
        Err(AsmError::InvalidNumber { line: 1, .. })
    ));
}

// ---- Roundtrip properties ----

proptest! {
    /// Any cell sequence survives disassemble → assemble.
    #[test]
    fn roundtrip_arbitrary_cells(cells in prop::collection::vec(any::<i64>(), 0..64)) {
        let program = Program::new(cells);
        let text = disassemble(&program);
        prop_assert_eq!(assemble(&text).unwrap(), program);
    }

    /// Programs made mostly of real instruction cells also roundtrip, and
    /// disassembly is stable after one pass.
    #[test]
    fn roundtrip_instruction_heavy(
        cells in prop::collection::vec(
            prop_oneof![
                prop::sample::select(vec![1i64, 2, 3, 4, 5, 6, 7, 8, 9, 99, 1001, 21101, 204, 1105]),
                -300i64..300,
            ],
            0..64,
        )
    ) {
        let program = Program::new(cells);
        let text = disassemble(&program);
        let reassembled = assemble(&text).unwrap();
        prop_assert_eq!(&reassembled, &program);
        prop_assert_eq!(disassemble(&reassembled), text);
    }
}
