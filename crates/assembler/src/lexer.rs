//! Tokenizer for Intcode assembly text.

use crate::error::AsmError;

/// A number or a reference to a label's address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Value {
    Literal(i64),
    Label(String),
}

/// A single token from an assembly line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Token {
    /// A label definition (`name:`). Uppercased, colon stripped.
    Label(String),
    /// A mnemonic, or a label reference inside `DATA`. Always uppercase.
    Ident(String),
    /// A bare signed decimal literal.
    Number(i64),
    /// `#v`: immediate operand.
    Immediate(Value),
    /// `[v]`: position operand.
    Position(Value),
    /// `[RB]`, `[RB+n]`, `[RB-n]`: relative operand.
    Relative(i64),
}

/// Tokenize a single line of assembly text.
///
/// Returns an empty Vec for blank lines and comment-only lines.
/// Comments start with `;` and extend to end of line. Commas separate
/// tokens just like whitespace.
pub(crate) fn tokenize_line(line: &str, line_num: usize) -> Result<Vec<Token>, AsmError> {
    // Strip comment
    let line = match line.find(';') {
        Some(pos) => &line[..pos],
        None => line,
    };

    line.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|word| !word.is_empty())
        .map(|word| tokenize_word(word, line_num))
        .collect()
}

fn tokenize_word(word: &str, line_num: usize) -> Result<Token, AsmError> {
    let unexpected = || AsmError::UnexpectedToken {
        line: line_num,
        token: word.to_string(),
    };

    if let Some(name) = word.strip_suffix(':') {
        if !is_identifier(name) || name.eq_ignore_ascii_case("RB") {
            return Err(unexpected());
        }
        return Ok(Token::Label(name.to_uppercase()));
    }

    if let Some(rest) = word.strip_prefix('#') {
        return parse_value(rest, line_num).map(Token::Immediate);
    }

    if let Some(inner) = word.strip_prefix('[') {
        let inner = inner.strip_suffix(']').ok_or_else(unexpected)?;
        let upper = inner.to_uppercase();
        if upper == "RB" {
            return Ok(Token::Relative(0));
        }
        if let Some(offset) = upper
            .strip_prefix("RB")
            .filter(|offset| offset.starts_with(['+', '-']))
        {
            return parse_number(offset, line_num).map(Token::Relative);
        }
        return parse_value(inner, line_num).map(Token::Position);
    }

    if looks_numeric(word) {
        return parse_number(word, line_num).map(Token::Number);
    }

    if is_identifier(word) {
        return Ok(Token::Ident(word.to_uppercase()));
    }

    Err(unexpected())
}

fn parse_value(text: &str, line_num: usize) -> Result<Value, AsmError> {
    if is_identifier(text) {
        Ok(Value::Label(text.to_uppercase()))
    } else {
        parse_number(text, line_num).map(Value::Literal)
    }
}

fn parse_number(text: &str, line_num: usize) -> Result<i64, AsmError> {
    text.parse().map_err(|_| AsmError::InvalidNumber {
        line: line_num,
        token: text.to_string(),
    })
}

/// A leading digit, or a sign followed by a digit.
fn looks_numeric(word: &str) -> bool {
    let digits = word.strip_prefix(['+', '-']).unwrap_or(word);
    digits.as_bytes().first().is_some_and(|b| b.is_ascii_digit())
}

fn is_identifier(word: &str) -> bool {
    let mut chars = word.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line() {
        assert_eq!(tokenize_line("", 1).unwrap(), vec![]);
    }

    #[test]
    fn whitespace_only() {
        assert_eq!(tokenize_line("   \t  ", 1).unwrap(), vec![]);
    }

    #[test]
    fn comment_only() {
        assert_eq!(tokenize_line("; this is a comment", 1).unwrap(), vec![]);
    }

    #[test]
    fn mnemonic_lowercase_is_uppercased() {
        assert_eq!(
            tokenize_line("hlt", 1).unwrap(),
            vec![Token::Ident("HLT".to_string())]
        );
    }

    #[test]
    fn operands_of_every_mode() {
        assert_eq!(
            tokenize_line("add #5, [12] [rb-3] ; sum", 1).unwrap(),
            vec![
                Token::Ident("ADD".to_string()),
                Token::Immediate(Value::Literal(5)),
                Token::Position(Value::Literal(12)),
                Token::Relative(-3),
            ]
        );
    }

    #[test]
    fn relative_without_offset() {
        assert_eq!(tokenize_line("[RB]", 1).unwrap(), vec![Token::Relative(0)]);
        assert_eq!(tokenize_line("[rb+7]", 1).unwrap(), vec![Token::Relative(7)]);
    }

    #[test]
    fn label_definition_and_references() {
        assert_eq!(
            tokenize_line("loop: jz #0 #loop", 1).unwrap(),
            vec![
                Token::Label("LOOP".to_string()),
                Token::Ident("JZ".to_string()),
                Token::Immediate(Value::Literal(0)),
                Token::Immediate(Value::Label("LOOP".to_string())),
            ]
        );
        assert_eq!(
            tokenize_line("in [counter]", 1).unwrap()[1],
            Token::Position(Value::Label("COUNTER".to_string()))
        );
    }

    #[test]
    fn signed_numbers() {
        assert_eq!(
            tokenize_line("DATA -1 +2 0", 1).unwrap(),
            vec![
                Token::Ident("DATA".to_string()),
                Token::Number(-1),
                Token::Number(2),
                Token::Number(0),
            ]
        );
    }

    #[test]
    fn invalid_number() {
        assert_eq!(
            tokenize_line("DATA 12x", 4),
            Err(AsmError::InvalidNumber {
                line: 4,
                token: "12x".to_string()
            })
        );
    }

    #[test]
    fn unterminated_bracket() {
        assert_eq!(
            tokenize_line("OUT [5", 2),
            Err(AsmError::UnexpectedToken {
                line: 2,
                token: "[5".to_string()
            })
        );
    }

    #[test]
    fn label_starting_with_rb_is_position() {
        assert_eq!(
            tokenize_line("[rbase]", 1).unwrap(),
            vec![Token::Position(Value::Label("RBASE".to_string()))]
        );
    }

    #[test]
    fn rb_is_not_a_label() {
        assert!(tokenize_line("rb:", 1).is_err());
    }
}
