//! ASCII conversion for text-oriented programs.
//!
//! Some programs read and print text one character per cell. They usually
//! finish by printing a single value outside the ASCII range.

/// Encode text as one input cell per byte.
pub fn encode(text: &str) -> Vec<i64> {
    text.bytes().map(i64::from).collect()
}

/// Split output into printable text and the values that are not ASCII.
///
/// Cells in `0..=127` become characters; everything else is returned in
/// order in the second element.
pub fn decode(cells: &[i64]) -> (String, Vec<i64>) {
    let mut text = String::with_capacity(cells.len());
    let mut values = Vec::new();
    for &cell in cells {
        match u8::try_from(cell) {
            Ok(byte) if byte.is_ascii() => text.push(char::from(byte)),
            _ => values.push(cell),
        }
    }
    (text, values)
}
