//! Program representation and the comma-separated text format.
//!
//! A program is a flat sequence of signed cells. Text files hold the cells
//! as decimal integers separated by commas, usually on a single line with a
//! trailing newline.

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// An Intcode program: the initial contents of memory.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Program {
    /// The cells, indexed from address 0.
    pub cells: Vec<i64>,
}

impl Program {
    /// Create a new program from a vector of cells.
    pub fn new(cells: Vec<i64>) -> Self {
        Self { cells }
    }

    /// Parse comma-separated decimal text.
    ///
    /// Surrounding whitespace (including the trailing newline) is ignored,
    /// as is whitespace around each token.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        text.trim()
            .split(',')
            .enumerate()
            .map(|(position, token)| {
                let token = token.trim();
                token
                    .parse::<i64>()
                    .map_err(|_| ParseError::MalformedProgram {
                        position,
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Number of cells in the program.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the program has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl From<Vec<i64>> for Program {
    fn from(cells: Vec<i64>) -> Self {
        Self::new(cells)
    }
}

impl FromStr for Program {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{cell}")?;
        }
        Ok(())
    }
}
