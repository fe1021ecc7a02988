//! Parser for Intcode assembly tokens into statements.
//!
//! A statement is an optional label followed by either an instruction with
//! one operand per parameter or a `DATA` directive with raw cell values.

use crate::error::AsmError;
use crate::lexer::{Token, Value};
use intcode_common::opcode::ALL_OPCODES;
use intcode_common::{Mode, Opcode};

/// Directive that emits raw cells.
pub(crate) const DATA: &str = "DATA";

/// One instruction parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Operand {
    pub mode: Mode,
    pub value: Value,
}

/// What a line emits.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Body {
    Instruction { opcode: Opcode, operands: Vec<Operand> },
    Data(Vec<Value>),
}

impl Body {
    /// Number of cells this body occupies.
    pub fn len(&self) -> usize {
        match self {
            Body::Instruction { opcode, .. } => 1 + opcode.arity(),
            Body::Data(values) => values.len(),
        }
    }
}

/// A parsed line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Statement {
    pub label: Option<String>,
    pub body: Option<Body>,
}

fn lookup_opcode(mnemonic: &str) -> Option<Opcode> {
    ALL_OPCODES
        .iter()
        .find(|op| op.mnemonic() == mnemonic)
        .copied()
}

fn describe(token: &Token) -> String {
    match token {
        Token::Label(name) => format!("{name}:"),
        Token::Ident(name) => name.clone(),
        Token::Number(n) => n.to_string(),
        Token::Immediate(Value::Literal(n)) => format!("#{n}"),
        Token::Immediate(Value::Label(name)) => format!("#{name}"),
        Token::Position(Value::Literal(n)) => format!("[{n}]"),
        Token::Position(Value::Label(name)) => format!("[{name}]"),
        Token::Relative(n) => format!("[RB{n:+}]"),
    }
}

fn unexpected(token: &Token, line_num: usize) -> AsmError {
    AsmError::UnexpectedToken {
        line: line_num,
        token: describe(token),
    }
}

/// Parse the tokens of one line.
///
/// Returns `Ok(None)` for blank lines (empty token list).
pub(crate) fn parse_line(tokens: &[Token], line_num: usize) -> Result<Option<Statement>, AsmError> {
    let (label, rest) = match tokens.split_first() {
        None => return Ok(None),
        Some((Token::Label(name), rest)) => (Some(name.clone()), rest),
        Some(_) => (None, tokens),
    };

    let body = match rest.split_first() {
        None => None,
        Some((Token::Ident(word), args)) if word == DATA => Some(parse_data(args, line_num)?),
        Some((Token::Ident(word), args)) => {
            let opcode = lookup_opcode(word).ok_or_else(|| AsmError::UnknownOpcode {
                line: line_num,
                token: word.clone(),
            })?;
            Some(parse_instruction(opcode, args, line_num)?)
        }
        Some((other, _)) => return Err(unexpected(other, line_num)),
    };

    Ok(Some(Statement { label, body }))
}

fn parse_instruction(opcode: Opcode, args: &[Token], line_num: usize) -> Result<Body, AsmError> {
    let arity = opcode.arity();
    if args.len() < arity {
        return Err(AsmError::MissingArgument {
            line: line_num,
            opcode: opcode.mnemonic(),
            expected: arity,
        });
    }
    if let Some(extra) = args.get(arity) {
        return Err(unexpected(extra, line_num));
    }

    let operands = args
        .iter()
        .map(|token| match token {
            Token::Immediate(value) => Ok(Operand {
                mode: Mode::Immediate,
                value: value.clone(),
            }),
            Token::Position(value) => Ok(Operand {
                mode: Mode::Position,
                value: value.clone(),
            }),
            Token::Relative(offset) => Ok(Operand {
                mode: Mode::Relative,
                value: Value::Literal(*offset),
            }),
            other => Err(unexpected(other, line_num)),
        })
        .collect::<Result<Vec<_>, _>>()?;

    if let Some(dst) = opcode.destination() {
        if operands[dst].mode == Mode::Immediate {
            return Err(AsmError::ImmediateDestination {
                line: line_num,
                opcode: opcode.mnemonic(),
            });
        }
    }

    Ok(Body::Instruction { opcode, operands })
}

fn parse_data(args: &[Token], line_num: usize) -> Result<Body, AsmError> {
    if args.is_empty() {
        return Err(AsmError::MissingArgument {
            line: line_num,
            opcode: DATA,
            expected: 1,
        });
    }

    args.iter()
        .map(|token| match token {
            Token::Number(n) => Ok(Value::Literal(*n)),
            Token::Ident(name) => Ok(Value::Label(name.clone())),
            other => Err(unexpected(other, line_num)),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Body::Data)
}
